//! Environment-driven service configuration, read once at startup.

use anyhow::{Context, Result};
use std::net::SocketAddr;

use crate::domain::daily::DEFAULT_SEED_OFFSET_DAYS;
use crate::domain::gate::AccessPolicy;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite:prayers.db";
const DEFAULT_ACCESS_POLICY: &str = "fixed:2027-01-01T00:00:00Z";
const DEFAULT_MIN_WORD_COUNT: usize = 1;
const DEFAULT_DAILY_POOL_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// Gate stamped onto every new record at submission time
    pub access_policy: AccessPolicy,
    /// Minimum whitespace-separated words a submission must contain
    pub min_word_count: usize,
    /// Upper bound on the daily-selection pool sample
    pub daily_pool_limit: u32,
    /// Days added to today's date before hashing the daily seed
    pub daily_seed_offset_days: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("PRAYER_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("parsing PRAYER_BIND_ADDR")?;

        let database_url =
            lookup("PRAYER_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let access_policy = lookup("PRAYER_ACCESS_POLICY")
            .unwrap_or_else(|| DEFAULT_ACCESS_POLICY.to_string())
            .parse::<AccessPolicy>()
            .map_err(|e| anyhow::anyhow!(e))
            .context("parsing PRAYER_ACCESS_POLICY")?;

        let min_word_count = match lookup("PRAYER_MIN_WORDS") {
            Some(raw) => raw.parse().context("parsing PRAYER_MIN_WORDS")?,
            None => DEFAULT_MIN_WORD_COUNT,
        };

        let daily_pool_limit = match lookup("PRAYER_DAILY_POOL_LIMIT") {
            Some(raw) => raw.parse().context("parsing PRAYER_DAILY_POOL_LIMIT")?,
            None => DEFAULT_DAILY_POOL_LIMIT,
        };

        let daily_seed_offset_days = match lookup("PRAYER_DAILY_SEED_OFFSET_DAYS") {
            Some(raw) => raw
                .parse()
                .context("parsing PRAYER_DAILY_SEED_OFFSET_DAYS")?,
            None => DEFAULT_SEED_OFFSET_DAYS,
        };

        Ok(Self {
            bind_addr,
            database_url,
            access_policy,
            min_word_count,
            daily_pool_limit,
            daily_seed_offset_days,
        })
    }
}
