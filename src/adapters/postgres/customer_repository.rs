//! PostgreSQL implementation of CustomerRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{Customer, DEFAULT_PERIOD_DAYS};
use crate::domain::foundation::{CustomerId, DomainError, ErrorCode, Timestamp};
use crate::ports::CustomerRepository;

/// PostgreSQL implementation of the CustomerRepository port.
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a customer.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    business_name: String,
    email: String,
    phone: String,
    whatsapp: Option<String>,
    website_url: Option<String>,
    subscription_start: NaiveDate,
    subscription_end_date: Option<NaiveDate>,
    price: i64,
    custom_price: Option<i64>,
    use_custom_price: bool,
    is_active: bool,
    is_regular_client: bool,
    is_blocked: bool,
    blocked_reason: Option<String>,
    blocked_at: Option<DateTime<Utc>>,
    unblocked_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: CustomerId::from_uuid(row.id),
            business_name: row.business_name,
            email: row.email,
            phone: row.phone,
            whatsapp: row.whatsapp,
            website_url: row.website_url,
            subscription_start: row.subscription_start,
            subscription_end_date: row.subscription_end_date,
            price: row.price,
            custom_price: row.custom_price,
            use_custom_price: row.use_custom_price,
            is_active: row.is_active,
            is_regular_client: row.is_regular_client,
            is_blocked: row.is_blocked,
            blocked_reason: row.blocked_reason,
            blocked_at: row.blocked_at.map(Timestamp::from_datetime),
            unblocked_at: row.unblocked_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, business_name, email, phone, whatsapp, website_url,
           subscription_start, subscription_end_date, price, custom_price,
           use_custom_price, is_active, is_regular_client, is_blocked,
           blocked_reason, blocked_at, unblocked_at, created_at, updated_at
    FROM customers
"#;

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn save(&self, customer: &Customer) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                id, business_name, email, phone, whatsapp, website_url,
                subscription_start, subscription_end_date, price, custom_price,
                use_custom_price, is_active, is_regular_client, is_blocked,
                blocked_reason, blocked_at, unblocked_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                      $11, $12, $13, $14, $15, $16, $17, $18, $19)
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.business_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.whatsapp)
        .bind(&customer.website_url)
        .bind(customer.subscription_start)
        .bind(customer.subscription_end_date)
        .bind(customer.price)
        .bind(customer.custom_price)
        .bind(customer.use_custom_price)
        .bind(customer.is_active)
        .bind(customer.is_regular_client)
        .bind(customer.is_blocked)
        .bind(&customer.blocked_reason)
        .bind(customer.blocked_at.map(|t| *t.as_datetime()))
        .bind(customer.unblocked_at.map(|t| *t.as_datetime()))
        .bind(*customer.created_at.as_datetime())
        .bind(*customer.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to save customer", e))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        let row: Option<CustomerRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to fetch customer", e))?;

        Ok(row.map(Customer::from))
    }

    async fn list_all(&self) -> Result<Vec<Customer>, DomainError> {
        let rows: Vec<CustomerRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at", SELECT_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("Failed to list customers", e))?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn deactivate_if_expired(
        &self,
        id: &CustomerId,
        today: NaiveDate,
        now: Timestamp,
    ) -> Result<bool, DomainError> {
        // The guard re-evaluates the effective period end in SQL: a racing
        // settlement that extended the end date makes it miss.
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET is_active = FALSE, updated_at = $3
            WHERE id = $1
              AND is_active = TRUE
              AND COALESCE(subscription_end_date, subscription_start + $4) <= $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(today)
        .bind(*now.as_datetime())
        .bind(DEFAULT_PERIOD_DAYS as i32)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to deactivate customer", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn apply_settlement(
        &self,
        id: &CustomerId,
        new_end: NaiveDate,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET is_active = TRUE,
                is_blocked = FALSE,
                blocked_reason = NULL,
                blocked_at = NULL,
                unblocked_at = $3,
                subscription_end_date = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(new_end)
        .bind(*now.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to apply settlement", e))?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::CustomerNotFound, "Customer not found")
                    .with_detail("customer_id", id.to_string()),
            );
        }

        Ok(())
    }
}
