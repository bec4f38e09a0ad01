//! PostgreSQL implementation of WebsiteRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{Website, WebsiteStatus};
use crate::domain::foundation::{CustomerId, DomainError, ErrorCode, Timestamp, WebsiteId};
use crate::ports::WebsiteRepository;

/// PostgreSQL implementation of the WebsiteRepository port.
pub struct PostgresWebsiteRepository {
    pool: PgPool,
}

impl PostgresWebsiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a website.
#[derive(Debug, sqlx::FromRow)]
struct WebsiteRow {
    id: Uuid,
    customer_id: Uuid,
    domain: String,
    status: String,
    blocked_reason: Option<String>,
    blocked_at: Option<DateTime<Utc>>,
    unblocked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<WebsiteRow> for Website {
    type Error = DomainError;

    fn try_from(row: WebsiteRow) -> Result<Self, Self::Error> {
        Ok(Website {
            id: WebsiteId::from_uuid(row.id),
            customer_id: CustomerId::from_uuid(row.customer_id),
            domain: row.domain,
            status: parse_status(&row.status)?,
            blocked_reason: row.blocked_reason,
            blocked_at: row.blocked_at.map(Timestamp::from_datetime),
            unblocked_at: row.unblocked_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<WebsiteStatus, DomainError> {
    match s {
        "active" => Ok(WebsiteStatus::Active),
        "blocked" => Ok(WebsiteStatus::Blocked),
        "maintenance" => Ok(WebsiteStatus::Maintenance),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid website status value: {}", s),
        )),
    }
}

fn status_to_str(status: WebsiteStatus) -> &'static str {
    match status {
        WebsiteStatus::Active => "active",
        WebsiteStatus::Blocked => "blocked",
        WebsiteStatus::Maintenance => "maintenance",
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, customer_id, domain, status, blocked_reason,
           blocked_at, unblocked_at, created_at, updated_at
    FROM websites
"#;

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

#[async_trait]
impl WebsiteRepository for PostgresWebsiteRepository {
    async fn save(&self, website: &Website) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO websites (
                id, customer_id, domain, status, blocked_reason,
                blocked_at, unblocked_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(website.id.as_uuid())
        .bind(website.customer_id.as_uuid())
        .bind(&website.domain)
        .bind(status_to_str(website.status))
        .bind(&website.blocked_reason)
        .bind(website.blocked_at.map(|t| *t.as_datetime()))
        .bind(website.unblocked_at.map(|t| *t.as_datetime()))
        .bind(*website.created_at.as_datetime())
        .bind(*website.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save website", e))?;

        Ok(())
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Option<Website>, DomainError> {
        let row: Option<WebsiteRow> =
            sqlx::query_as(&format!("{} WHERE domain = $1", SELECT_COLUMNS))
                .bind(domain)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to fetch website", e))?;

        row.map(Website::try_from).transpose()
    }

    async fn list_by_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<Website>, DomainError> {
        let rows: Vec<WebsiteRow> = sqlx::query_as(&format!(
            "{} WHERE customer_id = $1 ORDER BY domain",
            SELECT_COLUMNS
        ))
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list websites", e))?;

        rows.into_iter().map(Website::try_from).collect()
    }
}
