//! # Slot Repository
//!
//! Reads and upserts rows of the `kv_store` table, and plugs into kassa-core
//! as its [`SlotStore`].
//!
//! ## Write Semantics
//! ```text
//! put("svensk-kassa-session", blob)
//!      │
//!      ▼
//! INSERT ... ON CONFLICT(key) DO UPDATE   ← last write wins, no history
//! ```

use chrono::Utc;
use kassa_core::{SlotStore, StoreError};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for key-value slots.
#[derive(Debug, Clone)]
pub struct SlotRepository {
    pool: SqlitePool,
}

impl SlotRepository {
    /// Creates a new SlotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SlotRepository { pool }
    }

    /// Gets the value stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key = %key, found = value.is_some(), "Slot read");
        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn put(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Slot written");
        Ok(())
    }
}

impl SlotStore for SlotRepository {
    async fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get(key).await?)
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(self.put(key, value).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::DateTime;
    use kassa_core::{FixedClock, SessionController, SESSION_SLOT_KEY};

    async fn repo() -> (Database, SlotRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let slots = db.slots();
        (db, slots)
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let (_db, slots) = repo().await;
        assert_eq!(slots.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let (_db, slots) = repo().await;
        slots.put("k", "first").await.unwrap();
        slots.put("k", "second").await.unwrap();
        assert_eq!(slots.get("k").await.unwrap().as_deref(), Some("second"));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM kv_store")
            .fetch_one(slots.pool_for_test())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_put_records_update_time() {
        let (_db, slots) = repo().await;
        let before = Utc::now();
        slots.put("k", "v").await.unwrap();

        let updated_at: DateTime<Utc> =
            sqlx::query_scalar("SELECT updated_at FROM kv_store WHERE key = 'k'")
                .fetch_one(slots.pool_for_test())
                .await
                .unwrap();
        assert!(updated_at >= before - chrono::Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_closed_pool_reports_unavailable() {
        let (db, slots) = repo().await;
        db.close().await;

        let err = SlotStore::read(&slots, "k").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_controller_persists_through_sqlite() {
        let (_db, slots) = repo().await;
        let clock = FixedClock::on(2026, 10, 19).unwrap();

        let mut controller = SessionController::with_clock(slots.clone(), clock);
        controller.load().await;
        controller.set_title("Dagskassa").await;
        controller.set_count(500, 2).await;

        let blob = slots.get(SESSION_SLOT_KEY).await.unwrap().unwrap();
        assert!(blob.contains("\"500\":2"));

        let mut restored = SessionController::with_clock(slots, clock);
        restored.load().await;
        assert_eq!(restored.session(), controller.session());
        assert_eq!(restored.totals().grand_total.kronor(), 1000);
    }

    #[tokio::test]
    async fn test_controller_survives_closed_database() {
        let (db, slots) = repo().await;
        let clock = FixedClock::on(2026, 10, 19).unwrap();

        let mut controller = SessionController::with_clock(slots, clock);
        db.close().await;

        controller.load().await;
        controller.set_count(10, 4).await;
        assert_eq!(controller.totals().grand_total.kronor(), 40);
    }

    impl SlotRepository {
        fn pool_for_test(&self) -> &SqlitePool {
            &self.pool
        }
    }
}
