//! PostgreSQL implementation of SupportMessageStore.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::billing::{SupportMessage, SupportMessageStatus};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::SupportMessageStore;

/// PostgreSQL implementation of the SupportMessageStore port.
pub struct PostgresSupportMessageStore {
    pool: PgPool,
}

impl PostgresSupportMessageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn status_to_str(status: SupportMessageStatus) -> &'static str {
    match status {
        SupportMessageStatus::New => "new",
        SupportMessageStatus::Read => "read",
        SupportMessageStatus::Replied => "replied",
        SupportMessageStatus::Closed => "closed",
    }
}

#[async_trait]
impl SupportMessageStore for PostgresSupportMessageStore {
    async fn insert(&self, message: &SupportMessage) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO support_messages (
                id, domain, message, email, user_agent, page_url, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(message.id.as_uuid())
        .bind(&message.domain)
        .bind(&message.message)
        .bind(&message.email)
        .bind(&message.user_agent)
        .bind(&message.page_url)
        .bind(status_to_str(message.status))
        .bind(*message.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert support message: {}", e),
            )
        })?;

        Ok(())
    }
}
