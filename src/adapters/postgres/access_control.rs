//! PostgreSQL implementation of AccessControlStore.
//!
//! Every cascade runs inside one transaction: the customer flags and the
//! website statuses either all change or none do, which is what keeps the
//! "blocked customer with live websites" state unreachable through this
//! store.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::billing::{DeactivationPolicy, KILL_SWITCH_REASON};
use crate::domain::foundation::{CustomerId, DomainError, ErrorCode, Timestamp};
use crate::ports::{AccessControlStore, CascadeReport};

/// PostgreSQL implementation of the AccessControlStore port.
pub struct PostgresAccessControlStore {
    pool: PgPool,
}

impl PostgresAccessControlStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

#[async_trait]
impl AccessControlStore for PostgresAccessControlStore {
    async fn block_customer_cascade(
        &self,
        customer_id: &CustomerId,
        reason: &str,
        now: Timestamp,
    ) -> Result<CascadeReport, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to open transaction", e))?;

        let customer_result = sqlx::query(
            r#"
            UPDATE customers
            SET is_blocked = TRUE,
                blocked_reason = $2,
                blocked_at = $3,
                unblocked_at = NULL,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(customer_id.as_uuid())
        .bind(reason)
        .bind(*now.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to block customer", e))?;

        if customer_result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::CustomerNotFound, "Customer not found")
                    .with_detail("customer_id", customer_id.to_string()),
            );
        }

        let website_result = sqlx::query(
            r#"
            UPDATE websites
            SET status = 'blocked',
                blocked_reason = $2,
                blocked_at = $3,
                unblocked_at = NULL,
                updated_at = $3
            WHERE customer_id = $1 AND status <> 'blocked'
            "#,
        )
        .bind(customer_id.as_uuid())
        .bind(reason)
        .bind(*now.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to block websites", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit block cascade", e))?;

        Ok(CascadeReport {
            customers_affected: customer_result.rows_affected(),
            websites_affected: website_result.rows_affected(),
        })
    }

    async fn unblock_customer_cascade(
        &self,
        customer_id: &CustomerId,
        now: Timestamp,
    ) -> Result<CascadeReport, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to open transaction", e))?;

        let customer_result = sqlx::query(
            r#"
            UPDATE customers
            SET is_blocked = FALSE,
                blocked_reason = NULL,
                blocked_at = NULL,
                unblocked_at = $2,
                updated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(customer_id.as_uuid())
        .bind(*now.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to unblock customer", e))?;

        if customer_result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::CustomerNotFound, "Customer not found")
                    .with_detail("customer_id", customer_id.to_string()),
            );
        }

        // Only blocked sites come back; maintenance is operator territory.
        let website_result = sqlx::query(
            r#"
            UPDATE websites
            SET status = 'active',
                blocked_reason = NULL,
                blocked_at = NULL,
                unblocked_at = $2,
                updated_at = $2
            WHERE customer_id = $1 AND status = 'blocked'
            "#,
        )
        .bind(customer_id.as_uuid())
        .bind(*now.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to unblock websites", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit unblock cascade", e))?;

        Ok(CascadeReport {
            customers_affected: customer_result.rows_affected(),
            websites_affected: website_result.rows_affected(),
        })
    }

    async fn block_all_active(
        &self,
        reason: &str,
        now: Timestamp,
    ) -> Result<CascadeReport, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to open transaction", e))?;

        let customer_result = sqlx::query(
            r#"
            UPDATE customers
            SET is_blocked = TRUE,
                blocked_reason = $1,
                blocked_at = $2,
                unblocked_at = NULL,
                updated_at = $2
            WHERE is_active = TRUE AND is_blocked = FALSE
            "#,
        )
        .bind(reason)
        .bind(*now.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to block customers", e))?;

        let website_result = sqlx::query(
            r#"
            UPDATE websites
            SET status = 'blocked',
                blocked_reason = $1,
                blocked_at = $2,
                unblocked_at = NULL,
                updated_at = $2
            WHERE status = 'active'
            "#,
        )
        .bind(reason)
        .bind(*now.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to block websites", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit kill-switch block", e))?;

        Ok(CascadeReport {
            customers_affected: customer_result.rows_affected(),
            websites_affected: website_result.rows_affected(),
        })
    }

    async fn unblock_all_blocked(
        &self,
        policy: DeactivationPolicy,
        now: Timestamp,
    ) -> Result<CascadeReport, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to open transaction", e))?;

        let (customer_result, website_result) = match policy {
            DeactivationPolicy::RestoreAll => {
                let customers = sqlx::query(
                    r#"
                    UPDATE customers
                    SET is_blocked = FALSE,
                        blocked_reason = NULL,
                        blocked_at = NULL,
                        unblocked_at = $1,
                        updated_at = $1
                    WHERE is_blocked = TRUE
                    "#,
                )
                .bind(*now.as_datetime())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to unblock customers", e))?;

                let websites = sqlx::query(
                    r#"
                    UPDATE websites
                    SET status = 'active',
                        blocked_reason = NULL,
                        blocked_at = NULL,
                        unblocked_at = $1,
                        updated_at = $1
                    WHERE status = 'blocked'
                    "#,
                )
                .bind(*now.as_datetime())
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to unblock websites", e))?;

                (customers, websites)
            }
            DeactivationPolicy::PreserveOverdue => {
                let customers = sqlx::query(
                    r#"
                    UPDATE customers
                    SET is_blocked = FALSE,
                        blocked_reason = NULL,
                        blocked_at = NULL,
                        unblocked_at = $1,
                        updated_at = $1
                    WHERE is_blocked = TRUE AND blocked_reason = $2
                    "#,
                )
                .bind(*now.as_datetime())
                .bind(KILL_SWITCH_REASON)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to unblock customers", e))?;

                let websites = sqlx::query(
                    r#"
                    UPDATE websites
                    SET status = 'active',
                        blocked_reason = NULL,
                        blocked_at = NULL,
                        unblocked_at = $1,
                        updated_at = $1
                    WHERE status = 'blocked' AND blocked_reason = $2
                    "#,
                )
                .bind(*now.as_datetime())
                .bind(KILL_SWITCH_REASON)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to unblock websites", e))?;

                (customers, websites)
            }
        };

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit kill-switch unblock", e))?;

        Ok(CascadeReport {
            customers_affected: customer_result.rows_affected(),
            websites_affected: website_result.rows_affected(),
        })
    }
}
