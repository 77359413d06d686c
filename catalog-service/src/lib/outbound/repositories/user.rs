use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::user::errors::UserError;
use crate::user::models::NewUser;
use crate::user::models::User;
use crate::user::ports::UserRepository;

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    email: String,
    password_hash: String,
    token_balance: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            token_balance: row.token_balance,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, token_balance, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash) \
             VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(&new_user.username)
            .bind(&new_user.email)
            .bind(&new_user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map(User::from)
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation()
                        && db_err.constraint() == Some("users_email_key")
                    {
                        return UserError::EmailTaken;
                    }
                }
                UserError::Database(e.to_string())
            })
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(|e| UserError::Database(e.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");

        sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(User::from))
            .map_err(|e| UserError::Database(e.to_string()))
    }

    async fn update_username(&self, id: i32, username: &str) -> Result<(), UserError> {
        let result = sqlx::query("UPDATE users SET username = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound);
        }

        Ok(())
    }

    async fn credit_tokens(&self, id: i32, amount: i32) -> Result<(), UserError> {
        // A missing user makes this a no-op, matching the webhook's
        // tolerance for unknown ids
        sqlx::query(
            "UPDATE users SET token_balance = token_balance + $2, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(amount)
        .execute(&self.pool)
        .await
        .map_err(|e| UserError::Database(e.to_string()))?;

        Ok(())
    }
}
