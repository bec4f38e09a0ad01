//! PostgreSQL implementation of KillSwitchStore.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::KillSwitch;
use crate::domain::foundation::{DomainError, ErrorCode, KillSwitchId, Timestamp};
use crate::ports::KillSwitchStore;

/// PostgreSQL implementation of the KillSwitchStore port.
///
/// Records accumulate; the newest one by `created_at` is authoritative.
pub struct PostgresKillSwitchStore {
    pool: PgPool,
}

impl PostgresKillSwitchStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a kill-switch record.
#[derive(Debug, sqlx::FromRow)]
struct KillSwitchRow {
    id: Uuid,
    is_active: bool,
    reason: String,
    created_at: DateTime<Utc>,
}

impl From<KillSwitchRow> for KillSwitch {
    fn from(row: KillSwitchRow) -> Self {
        KillSwitch {
            id: KillSwitchId::from_uuid(row.id),
            is_active: row.is_active,
            reason: row.reason,
            created_at: Timestamp::from_datetime(row.created_at),
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

#[async_trait]
impl KillSwitchStore for PostgresKillSwitchStore {
    async fn current(&self) -> Result<Option<KillSwitch>, DomainError> {
        let row: Option<KillSwitchRow> = sqlx::query_as(
            r#"
            SELECT id, is_active, reason, created_at
            FROM kill_switch
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch kill switch", e))?;

        Ok(row.map(KillSwitch::from))
    }

    async fn append(&self, record: &KillSwitch) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO kill_switch (id, is_active, reason, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.is_active)
        .bind(&record.reason)
        .bind(*record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to append kill-switch record", e))?;

        Ok(())
    }
}
