use serde::{Deserialize, Serialize};

/// Request body for submitting a new prayer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitPrayerRequest {
    /// The prayer text, stored verbatim
    pub text: String,
    /// Optional hex color chosen by the submitter (e.g. "#9333ea")
    pub color: Option<String>,
}

/// Response after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitPrayerResponse {
    /// 10-digit access code the submitter needs to retrieve the prayer later
    pub code: String,
}

/// A retrieved prayer, returned once its access gate has opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerResponse {
    pub text: String,
    pub color: Option<String>,
}

/// Total number of stored prayers (display only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerCountResponse {
    pub count: u64,
}

/// Today's deterministically selected prayer, if the pool is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrayerResponse {
    pub count: u64,
    pub prayer: Option<DailyPrayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrayer {
    pub text: String,
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_roundtrip() {
        let request = SubmitPrayerRequest {
            text: "hope for peace".to_string(),
            color: Some("#9333ea".to_string()),
        };

        let json = serde_json::to_string(&request).unwrap();
        let parsed: SubmitPrayerRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, request);
    }

    #[test]
    fn submit_request_color_optional() {
        // Clients that never show the color picker omit the field entirely
        let parsed: SubmitPrayerRequest =
            serde_json::from_str(r#"{"text":"hope for peace"}"#).unwrap();

        assert_eq!(parsed.text, "hope for peace");
        assert!(parsed.color.is_none());
    }

    #[test]
    fn daily_response_empty_pool() {
        let response = DailyPrayerResponse {
            count: 0,
            prayer: None,
        };

        let json = serde_json::to_string(&response).unwrap();
        let parsed: DailyPrayerResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.count, 0);
        assert!(parsed.prayer.is_none());
    }
}
