//! Deterministic "prayer of the day" selection.
//!
//! Every viewer on a given calendar date sees the same pick: the seed date
//! is formatted as `YYYY-MM-DD`, hashed with the rolling multiply-by-31
//! polynomial over its UTF-16 code units (32-bit signed wrapping, then
//! absolute value), and reduced modulo the pool size. The hash is a public,
//! shareable contract, so its bit behavior must not drift.

use chrono::{DateTime, Days, Local, NaiveDate, NaiveTime, TimeZone};
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::domain::models::prayer::PrayerRecord;

/// The deployed site seeds "today's" pick with tomorrow's date. Preserved
/// as a named, configurable offset rather than silently corrected.
pub const DEFAULT_SEED_OFFSET_DAYS: u64 = 1;

/// One candidate in the daily-selection pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolEntry {
    pub text: String,
    pub color: Option<String>,
}

impl From<&PrayerRecord> for PoolEntry {
    fn from(record: &PrayerRecord) -> Self {
        PoolEntry {
            text: record.text.clone(),
            color: record.color.clone(),
        }
    }
}

/// Rolling polynomial hash over the UTF-16 code units of `seed`.
///
/// `h = h * 31 + unit`, wrapping at 32-bit signed width each step, with the
/// unsigned absolute value of the final accumulator as the result. This
/// matches 32-bit-truncated accumulation exactly, including the
/// `abs(i32::MIN)` edge, which maps to 2147483648.
pub fn hash_date_seed(seed: &str) -> u32 {
    let mut h: i32 = 0;
    for unit in seed.encode_utf16() {
        h = h.wrapping_mul(31).wrapping_add(unit as i32);
    }
    h.unsigned_abs()
}

/// Format the seed string for `date` shifted by the configured offset.
pub fn seed_string(date: NaiveDate, offset_days: u64) -> String {
    let seeded = date
        .checked_add_days(Days::new(offset_days))
        .unwrap_or(date);
    seeded.format("%Y-%m-%d").to_string()
}

/// Pick the entry for `date` out of `pool`, or `None` when the pool is empty.
///
/// Pure and deterministic: a fixed date and a fixed pool ordering always
/// yield the same entry.
pub fn pick_daily(pool: &[PoolEntry], date: NaiveDate, offset_days: u64) -> Option<&PoolEntry> {
    if pool.is_empty() {
        return None;
    }
    let hash = hash_date_seed(&seed_string(date, offset_days));
    Some(&pool[hash as usize % pool.len()])
}

struct PickerState {
    pool: Vec<PoolEntry>,
    selected: Option<PoolEntry>,
    loaded: bool,
}

/// Per-process daily-selection state.
///
/// The pool is fetched once (when the daily view is first served) and kept
/// for the lifetime of the process; midnight refreshes re-pick from the
/// already-loaded pool without another store round-trip.
pub struct DailyPicker {
    offset_days: u64,
    state: Mutex<PickerState>,
}

impl DailyPicker {
    pub fn new(offset_days: u64) -> Self {
        Self {
            offset_days,
            state: Mutex::new(PickerState {
                pool: Vec::new(),
                selected: None,
                loaded: false,
            }),
        }
    }

    /// True once a pool has been loaded, even an empty one.
    pub fn is_loaded(&self) -> bool {
        self.state.lock().expect("picker lock poisoned").loaded
    }

    /// Install the sampled pool and compute today's pick.
    pub fn load_pool(&self, pool: Vec<PoolEntry>) {
        let selected = pick_daily(&pool, Local::now().date_naive(), self.offset_days).cloned();
        info!(
            pool_size = pool.len(),
            picked = selected.is_some(),
            "daily pool loaded"
        );
        let mut state = self.state.lock().expect("picker lock poisoned");
        state.pool = pool;
        state.selected = selected;
        state.loaded = true;
    }

    /// Recompute the pick for the current date, reusing the loaded pool.
    /// A no-op when the pool was empty at load time.
    pub fn refresh(&self) {
        self.refresh_for_date(Local::now().date_naive());
    }

    fn refresh_for_date(&self, date: NaiveDate) {
        let mut state = self.state.lock().expect("picker lock poisoned");
        if state.pool.is_empty() {
            return;
        }
        state.selected = pick_daily(&state.pool, date, self.offset_days).cloned();
    }

    pub fn selected(&self) -> Option<PoolEntry> {
        self.state
            .lock()
            .expect("picker lock poisoned")
            .selected
            .clone()
    }
}

/// Handle for the scheduled midnight refresh. Aborts the timer task when
/// cancelled or dropped, so a torn-down session never leaves a dangling
/// callback behind.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Schedule `callback` to run at the next local midnight and every 24 hours
/// thereafter, until the returned handle is cancelled or dropped.
pub fn schedule_daily_refresh<F>(callback: F) -> RefreshHandle
where
    F: Fn() + Send + 'static,
{
    let task = tokio::spawn(async move {
        let wait = duration_until_next_local_midnight(Local::now());
        info!(seconds = wait.as_secs(), "daily refresh scheduled");
        tokio::time::sleep(wait).await;
        loop {
            callback();
            tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
        }
    });
    RefreshHandle { task }
}

/// Time remaining until 00:00 local time tomorrow.
fn duration_until_next_local_midnight(now: DateTime<Local>) -> Duration {
    let Some(next_day) = now.date_naive().succ_opt() else {
        // Calendar end; no meaningful midnight to wait for
        return Duration::from_secs(24 * 60 * 60);
    };
    let midnight = next_day.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(instant) => (instant - now).to_std().unwrap_or(Duration::ZERO),
        None => {
            // Midnight skipped by a DST transition; check back in an hour
            warn!("local midnight does not exist, retrying in one hour");
            Duration::from_secs(60 * 60)
        }
    }
}
