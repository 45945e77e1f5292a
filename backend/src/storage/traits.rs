//! Storage abstraction for the prayer store collaborator.
//!
//! The domain layer only ever sees this trait, so the backing document
//! store can change without touching the services.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::prayer::PrayerRecord;

/// Minimal interface onto the external document store.
#[async_trait]
pub trait PrayerStore: Send + Sync {
    /// Create-or-overwrite the record at its code. A colliding code silently
    /// replaces the earlier record; uniqueness is probabilistic by design.
    async fn put(&self, record: &PrayerRecord) -> Result<()>;

    /// Point lookup by code.
    async fn get(&self, code: &str) -> Result<Option<PrayerRecord>>;

    /// Total number of stored records (display only).
    async fn count(&self) -> Result<u64>;

    /// A bounded, order-unspecified listing used to build the daily pool.
    /// No freshness or randomness guarantee beyond "up to `limit` records."
    async fn sample(&self, limit: u32) -> Result<Vec<PrayerRecord>>;
}
