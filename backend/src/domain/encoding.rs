//! Legacy local record encoding.
//!
//! Before the remote store existed, prayers lived client-side as
//! base64-encoded JSON (`{"prayer", "accessDate", "createdAt"}`). These
//! helpers read and write that format so legacy exports stay readable. The
//! encoding is reversible, not confidential; nothing here is cryptography.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// The legacy on-disk record shape, with its camelCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedPrayer {
    pub prayer: String,
    pub access_date: String,
    pub created_at: String,
}

/// Failure to read a legacy encoded record. Terminal for that record;
/// there is no partial recovery.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid record JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encode a record to the legacy base64/JSON format.
pub fn encode_record(record: &EncodedPrayer) -> String {
    let json = serde_json::to_string(record).unwrap_or_default();
    STANDARD.encode(json)
}

/// Decode a legacy record, failing with a terminal [`DecodeError`] when the
/// payload is not valid base64, UTF-8, or record JSON.
pub fn decode_record(encoded: &str) -> Result<EncodedPrayer, DecodeError> {
    let bytes = STANDARD.decode(encoded)?;
    let json = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode_preserves_record() {
        let record = EncodedPrayer {
            prayer: "hope for peace".to_string(),
            access_date: "2027-01-01T00:00:00.000Z".to_string(),
            created_at: "2026-08-27T10:00:00.000Z".to_string(),
        };

        let decoded = decode_record(&encode_record(&record)).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn decode_reads_legacy_camel_case_keys() {
        // Payload shape as written by the legacy client
        let json = r#"{"prayer":"hold on","accessDate":"2027-01-01T00:00:00.000Z","createdAt":"2026-01-05T08:30:00.000Z"}"#;
        let encoded = STANDARD.encode(json);

        let decoded = decode_record(&encoded).unwrap();
        assert_eq!(decoded.prayer, "hold on");
        assert_eq!(decoded.access_date, "2027-01-01T00:00:00.000Z");
    }

    #[test]
    fn decode_rejects_bad_base64() {
        assert!(matches!(
            decode_record("not-base64!!!"),
            Err(DecodeError::Base64(_))
        ));
    }

    #[test]
    fn decode_rejects_non_json_payload() {
        let encoded = STANDARD.encode("definitely not json");
        assert!(matches!(
            decode_record(&encoded),
            Err(DecodeError::Json(_))
        ));
    }
}
