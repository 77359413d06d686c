use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::payment::errors::PaymentError;
use crate::payment::models::NewTransaction;
use crate::payment::models::Transaction;
use crate::payment::ports::TransactionRepository;

pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: i32,
    order_token: String,
    payment_status: String,
    user_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: row.id,
            order_token: row.order_token,
            payment_status: row.payment_status,
            user_id: row.user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn create(&self, transaction: NewTransaction) -> Result<Transaction, PaymentError> {
        sqlx::query_as::<_, TransactionRow>(
            "INSERT INTO transactions (order_token, payment_status, user_id) \
             VALUES ($1, $2, $3) \
             RETURNING id, order_token, payment_status, user_id, created_at, updated_at",
        )
        .bind(&transaction.order_token)
        .bind(&transaction.payment_status)
        .bind(transaction.user_id)
        .fetch_one(&self.pool)
        .await
        .map(Transaction::from)
        .map_err(|e| PaymentError::Database(e.to_string()))
    }

    async fn update_status(&self, order_token: &str, status: &str) -> Result<(), PaymentError> {
        // An unknown order id is tolerated; the gateway may notify about
        // orders this instance never recorded
        sqlx::query(
            "UPDATE transactions SET payment_status = $2, updated_at = now() \
             WHERE order_token = $1",
        )
        .bind(order_token)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| PaymentError::Database(e.to_string()))?;

        Ok(())
    }
}
