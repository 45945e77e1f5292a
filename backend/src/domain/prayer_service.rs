//! Submission and retrieval orchestration.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::code::{generate_code, is_valid_code_format};
use crate::domain::daily::PoolEntry;
use crate::domain::gate::AccessPolicy;
use crate::domain::models::prayer::PrayerRecord;
use crate::storage::traits::PrayerStore;

/// Everything that can go wrong on the submission and retrieval paths.
///
/// Each failure is local to its operation; the service stays up and the
/// caller may retry manually. Store failures are always surfaced, never
/// swallowed, and never retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum PrayerError {
    #[error("please enter a valid 10-digit code")]
    InvalidFormat,
    #[error("no prayer found with this code")]
    NotFound,
    #[error("your prayer is not yet available: {}", policy.describe())]
    NotYetAvailable { policy: AccessPolicy },
    #[error("a prayer needs at least {minimum} word(s)")]
    TooFewWords { minimum: usize },
    #[error("the prayer store is unavailable, please try again")]
    StorageUnavailable(#[source] anyhow::Error),
}

/// Service for storing and retrieving prayers through the store collaborator.
#[derive(Clone)]
pub struct PrayerService {
    store: Arc<dyn PrayerStore>,
    access_policy: AccessPolicy,
    min_word_count: usize,
    daily_pool_limit: u32,
}

impl PrayerService {
    pub fn new(
        store: Arc<dyn PrayerStore>,
        access_policy: AccessPolicy,
        min_word_count: usize,
        daily_pool_limit: u32,
    ) -> Self {
        Self {
            store,
            access_policy,
            min_word_count,
            daily_pool_limit,
        }
    }

    /// Store a new prayer and return its access code.
    ///
    /// Exactly one record is created per successful call. The operation is
    /// not idempotent: retrying after a timeout may store a duplicate under
    /// a fresh code, since there is no submission dedup.
    pub async fn submit(&self, text: &str, color: Option<String>) -> Result<String, PrayerError> {
        let words = text.split_whitespace().count();
        if words < self.min_word_count {
            warn!(words, minimum = self.min_word_count, "submission too short");
            return Err(PrayerError::TooFewWords {
                minimum: self.min_word_count,
            });
        }

        let code = generate_code();
        let record = PrayerRecord::new(
            code.clone(),
            text.to_string(),
            color,
            self.access_policy.clone(),
        );

        self.store
            .put(&record)
            .await
            .map_err(PrayerError::StorageUnavailable)?;

        info!(code = %code, "prayer stored");
        Ok(code)
    }

    /// Retrieve a stored prayer by its access code.
    ///
    /// Read-only and idempotent. The gate is evaluated against wall-clock
    /// time at call time, so a closed code opens without any write.
    pub async fn retrieve(&self, code: &str) -> Result<PrayerRecord, PrayerError> {
        self.retrieve_at(code, Utc::now()).await
    }

    async fn retrieve_at(
        &self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<PrayerRecord, PrayerError> {
        // Shape check first: malformed input never reaches the store
        if !is_valid_code_format(code) {
            return Err(PrayerError::InvalidFormat);
        }

        let record = self
            .store
            .get(code)
            .await
            .map_err(PrayerError::StorageUnavailable)?
            .ok_or(PrayerError::NotFound)?;

        if !record.access_policy.is_open(now) {
            info!(code = %code, "prayer exists but gate is closed");
            return Err(PrayerError::NotYetAvailable {
                policy: record.access_policy,
            });
        }

        Ok(record)
    }

    /// Total stored prayers, for display.
    pub async fn count(&self) -> Result<u64, PrayerError> {
        self.store
            .count()
            .await
            .map_err(PrayerError::StorageUnavailable)
    }

    /// Fetch the bounded candidate pool for the daily pick.
    pub async fn daily_pool(&self) -> Result<Vec<PoolEntry>, PrayerError> {
        let records = self
            .store
            .sample(self.daily_pool_limit)
            .await
            .map_err(PrayerError::StorageUnavailable)?;
        Ok(records.iter().map(PoolEntry::from).collect())
    }
}
