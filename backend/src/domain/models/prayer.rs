//! Domain model for a stored prayer.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::gate::AccessPolicy;

/// A persisted prayer, keyed by its 10-digit access code.
///
/// Created exactly once at submission time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerRecord {
    /// 10 ASCII digits, the primary key and retrieval token
    pub code: String,
    /// Prayer body, stored verbatim
    pub text: String,
    /// Optional submitter-chosen color
    pub color: Option<String>,
    /// Gate stamped onto the record at write time
    pub access_policy: AccessPolicy,
    pub created_at: DateTime<Utc>,
}

impl PrayerRecord {
    pub fn new(
        code: String,
        text: String,
        color: Option<String>,
        access_policy: AccessPolicy,
    ) -> Self {
        Self {
            code,
            text,
            color,
            access_policy,
            created_at: Utc::now(),
        }
    }
}
