//! SQLite-backed prayer store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::domain::gate::AccessPolicy;
use crate::domain::models::prayer::PrayerRecord;
use crate::storage::traits::PrayerStore;

/// Prayer store backed by a SQLite database.
#[derive(Clone)]
pub struct SqlitePrayerStore {
    pool: Arc<SqlitePool>,
}

impl SqlitePrayerStore {
    /// Connect to the database at `url`, creating it and the schema if needed.
    pub async fn new(url: &str) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url)
                .await
                .with_context(|| format!("creating database {}", url))?;
        }

        let pool = SqlitePool::connect(url)
            .await
            .with_context(|| format!("connecting to {}", url))?;

        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Open an in-memory database with a unique name, for tests.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);
        Self::new(&url).await
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS prayers (
                code TEXT PRIMARY KEY,
                prayer TEXT NOT NULL,
                color TEXT,
                access_policy TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await
        .context("creating prayers table")?;

        Ok(())
    }

    fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<PrayerRecord> {
        let policy_json: String = row.get("access_policy");
        let access_policy: AccessPolicy = serde_json::from_str(&policy_json)
            .with_context(|| format!("parsing stored access policy: {}", policy_json))?;

        let created_at_raw: String = row.get("created_at");
        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_raw)
            .with_context(|| format!("parsing stored timestamp: {}", created_at_raw))?
            .with_timezone(&Utc);

        Ok(PrayerRecord {
            code: row.get("code"),
            text: row.get("prayer"),
            color: row.get("color"),
            access_policy,
            created_at,
        })
    }
}

#[async_trait]
impl PrayerStore for SqlitePrayerStore {
    async fn put(&self, record: &PrayerRecord) -> Result<()> {
        let policy_json =
            serde_json::to_string(&record.access_policy).context("serializing access policy")?;

        sqlx::query(
            "INSERT OR REPLACE INTO prayers (code, prayer, color, access_policy, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.code)
        .bind(&record.text)
        .bind(&record.color)
        .bind(policy_json)
        .bind(record.created_at.to_rfc3339())
        .execute(&*self.pool)
        .await
        .context("storing prayer")?;

        Ok(())
    }

    async fn get(&self, code: &str) -> Result<Option<PrayerRecord>> {
        let row = sqlx::query(
            "SELECT code, prayer, color, access_policy, created_at FROM prayers WHERE code = ?",
        )
        .bind(code)
        .fetch_optional(&*self.pool)
        .await
        .context("looking up prayer")?;

        match row {
            Some(row) => Ok(Some(Self::record_from_row(&row)?)),
            None => Ok(None),
        }
    }

    async fn count(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM prayers")
            .fetch_one(&*self.pool)
            .await
            .context("counting prayers")?;
        let n: i64 = row.get("n");
        Ok(n as u64)
    }

    async fn sample(&self, limit: u32) -> Result<Vec<PrayerRecord>> {
        let rows = sqlx::query(
            "SELECT code, prayer, color, access_policy, created_at FROM prayers LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&*self.pool)
        .await
        .context("sampling prayers")?;

        rows.iter().map(Self::record_from_row).collect()
    }
}
