//! Access gate policies.
//!
//! A stored prayer is only readable once its gate opens. Two gating rules
//! exist in production data: a fixed future instant ("available starting
//! 2027-01-01") and a recurring day-of-month rule ("viewable only on the
//! 1st"). Both are evaluated by the single [`AccessPolicy::is_open`] check
//! against wall-clock time at retrieval, never against the stored creation
//! time, so a code can flip from closed to open without any write.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// When a stored prayer becomes readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessPolicy {
    /// Open at or after a fixed instant.
    FixedInstant { opens_at: DateTime<Utc> },
    /// Open only on the given calendar day of any month (1-31).
    DayOfMonth { day: u32 },
}

impl AccessPolicy {
    /// The deployed default: prayers open on January 1st, 2027.
    pub fn default_fixed_instant() -> Self {
        AccessPolicy::FixedInstant {
            opens_at: DateTime::parse_from_rfc3339("2027-01-01T00:00:00Z")
                .expect("static timestamp parses")
                .with_timezone(&Utc),
        }
    }

    /// Evaluate the gate against the given wall-clock time.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        match self {
            AccessPolicy::FixedInstant { opens_at } => now >= *opens_at,
            AccessPolicy::DayOfMonth { day } => now.day() == *day,
        }
    }

    /// Human-readable description of the gate condition, used in the
    /// not-yet-available error message.
    pub fn describe(&self) -> String {
        match self {
            AccessPolicy::FixedInstant { opens_at } => {
                format!("available starting {}", opens_at.format("%Y-%m-%d"))
            }
            AccessPolicy::DayOfMonth { day } => {
                format!("viewable on day {} of each month", day)
            }
        }
    }
}

impl FromStr for AccessPolicy {
    type Err = String;

    /// Parse the configuration syntax: `fixed:<rfc3339>` or `day-of-month:<1-31>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("fixed", instant)) => {
                let opens_at = DateTime::parse_from_rfc3339(instant)
                    .map_err(|e| format!("invalid access policy instant '{}': {}", instant, e))?
                    .with_timezone(&Utc);
                Ok(AccessPolicy::FixedInstant { opens_at })
            }
            Some(("day-of-month", day)) => {
                let day: u32 = day
                    .parse()
                    .map_err(|_| format!("invalid day of month: {}", day))?;
                if !(1..=31).contains(&day) {
                    return Err(format!("day of month out of range: {}", day));
                }
                Ok(AccessPolicy::DayOfMonth { day })
            }
            _ => Err(format!(
                "invalid access policy '{}': expected fixed:<rfc3339> or day-of-month:<1-31>",
                s
            )),
        }
    }
}
