use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::Favorite;
use crate::book::models::FavoriteWithBook;
use crate::book::ports::FavoriteRepository;

pub struct PostgresFavoriteRepository {
    pool: PgPool,
}

impl PostgresFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    id: i32,
    user_id: i32,
    book_id: i32,
    created_at: DateTime<Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            book_id: row.book_id,
            created_at: row.created_at,
        }
    }
}

/// Flat row for the favorites-with-books join; book columns are aliased
/// with a `book_` prefix.
#[derive(sqlx::FromRow)]
struct FavoriteWithBookRow {
    id: i32,
    user_id: i32,
    book_id: i32,
    created_at: DateTime<Utc>,
    book_title: String,
    book_image_url: Option<String>,
    book_category: Option<String>,
    book_author: String,
    book_summary: String,
    book_price: i32,
    book_publish_date: Option<String>,
    book_created_at: DateTime<Utc>,
    book_updated_at: DateTime<Utc>,
}

impl From<FavoriteWithBookRow> for FavoriteWithBook {
    fn from(row: FavoriteWithBookRow) -> Self {
        Self {
            favorite: Favorite {
                id: row.id,
                user_id: row.user_id,
                book_id: row.book_id,
                created_at: row.created_at,
            },
            book: Book {
                id: row.book_id,
                title: row.book_title,
                image_url: row.book_image_url,
                category: row.book_category,
                author: row.book_author,
                summary: row.book_summary,
                price: row.book_price,
                publish_date: row.book_publish_date,
                created_at: row.book_created_at,
                updated_at: row.book_updated_at,
            },
        }
    }
}

#[async_trait]
impl FavoriteRepository for PostgresFavoriteRepository {
    async fn create(&self, user_id: i32, book_id: i32) -> Result<Favorite, BookError> {
        sqlx::query_as::<_, FavoriteRow>(
            "INSERT INTO favorite_books (user_id, book_id) VALUES ($1, $2) \
             RETURNING id, user_id, book_id, created_at",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await
        .map(Favorite::from)
        .map_err(|e| BookError::Database(e.to_string()))
    }

    async fn find_by_user_and_book(
        &self,
        user_id: i32,
        book_id: i32,
    ) -> Result<Option<Favorite>, BookError> {
        sqlx::query_as::<_, FavoriteRow>(
            "SELECT id, user_id, book_id, created_at FROM favorite_books \
             WHERE user_id = $1 AND book_id = $2",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Favorite::from))
        .map_err(|e| BookError::Database(e.to_string()))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Favorite>, BookError> {
        sqlx::query_as::<_, FavoriteRow>(
            "SELECT id, user_id, book_id, created_at FROM favorite_books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(Favorite::from))
        .map_err(|e| BookError::Database(e.to_string()))
    }

    async fn delete(&self, id: i32) -> Result<(), BookError> {
        let result = sqlx::query("DELETE FROM favorite_books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| BookError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BookError::FavoriteNotFound);
        }

        Ok(())
    }

    async fn list_with_books(&self, user_id: i32) -> Result<Vec<FavoriteWithBook>, BookError> {
        sqlx::query_as::<_, FavoriteWithBookRow>(
            "SELECT f.id, f.user_id, f.book_id, f.created_at, \
                    b.title AS book_title, b.image_url AS book_image_url, \
                    b.category AS book_category, b.author AS book_author, \
                    b.summary AS book_summary, b.price AS book_price, \
                    b.publish_date AS book_publish_date, \
                    b.created_at AS book_created_at, b.updated_at AS book_updated_at \
             FROM favorite_books f \
             JOIN books b ON b.id = f.book_id \
             WHERE f.user_id = $1 \
             ORDER BY f.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map(|rows| rows.into_iter().map(FavoriteWithBook::from).collect())
        .map_err(|e| BookError::Database(e.to_string()))
    }
}
