//! PostgreSQL implementation of RevenueLedger.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{RevenueEntry, RevenueKind};
use crate::domain::foundation::{CustomerId, DomainError, ErrorCode, RevenueEntryId};
use crate::ports::RevenueLedger;

/// PostgreSQL implementation of the RevenueLedger port.
///
/// The `revenue` table is insert-only; there are no UPDATE or DELETE
/// statements in this adapter.
pub struct PostgresRevenueLedger {
    pool: PgPool,
}

impl PostgresRevenueLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a revenue entry.
#[derive(Debug, sqlx::FromRow)]
struct RevenueRow {
    id: Uuid,
    client_id: Uuid,
    amount: i64,
    r#type: String,
    date: NaiveDate,
    description: String,
    months_paid: Option<i32>,
    payment_reference: Option<String>,
}

impl TryFrom<RevenueRow> for RevenueEntry {
    type Error = DomainError;

    fn try_from(row: RevenueRow) -> Result<Self, Self::Error> {
        Ok(RevenueEntry {
            id: RevenueEntryId::from_uuid(row.id),
            client_id: CustomerId::from_uuid(row.client_id),
            amount: row.amount,
            kind: parse_kind(&row.r#type)?,
            date: row.date,
            description: row.description,
            months_paid: row.months_paid.map(|m| m as u32),
            payment_reference: row.payment_reference,
        })
    }
}

fn parse_kind(s: &str) -> Result<RevenueKind, DomainError> {
    match s {
        "subscription" => Ok(RevenueKind::Subscription),
        "one-time" => Ok(RevenueKind::OneTime),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid revenue type value: {}", s),
        )),
    }
}

fn kind_to_str(kind: RevenueKind) -> &'static str {
    match kind {
        RevenueKind::Subscription => "subscription",
        RevenueKind::OneTime => "one-time",
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

#[async_trait]
impl RevenueLedger for PostgresRevenueLedger {
    async fn append(&self, entry: &RevenueEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO revenue (
                id, client_id, amount, type, date, description,
                months_paid, payment_reference
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.client_id.as_uuid())
        .bind(entry.amount)
        .bind(kind_to_str(entry.kind))
        .bind(entry.date)
        .bind(&entry.description)
        .bind(entry.months_paid.map(|m| m as i32))
        .bind(&entry.payment_reference)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to append revenue entry", e))?;

        Ok(())
    }

    async fn list_by_client(
        &self,
        client_id: &CustomerId,
    ) -> Result<Vec<RevenueEntry>, DomainError> {
        let rows: Vec<RevenueRow> = sqlx::query_as(
            r#"
            SELECT id, client_id, amount, type, date, description,
                   months_paid, payment_reference
            FROM revenue
            WHERE client_id = $1
            ORDER BY date DESC
            "#,
        )
        .bind(client_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list revenue entries", e))?;

        rows.into_iter().map(RevenueEntry::try_from).collect()
    }
}
