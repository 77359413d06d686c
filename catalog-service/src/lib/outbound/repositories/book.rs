use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use sqlx::Postgres;
use sqlx::QueryBuilder;

use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::ListBooksQuery;
use crate::book::models::SortOrder;
use crate::book::ports::BookRepository;

pub struct PostgresBookRepository {
    pool: PgPool,
}

impl PostgresBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i32,
    title: String,
    image_url: Option<String>,
    category: Option<String>,
    author: String,
    summary: String,
    price: i32,
    publish_date: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            image_url: row.image_url,
            category: row.category,
            author: row.author,
            summary: row.summary,
            price: row.price,
            publish_date: row.publish_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const BOOK_COLUMNS: &str = "id, title, image_url, category, author, summary, price, \
                            publish_date, created_at, updated_at";

/// Append the WHERE clause shared by the count and page queries.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &ListBooksQuery) {
    let mut separator = " WHERE ";

    if let Some(search) = &query.search {
        builder
            .push(separator)
            .push("title ILIKE ")
            .push_bind(format!("%{}%", search));
        separator = " AND ";
    }

    if !query.categories.is_empty() {
        builder
            .push(separator)
            .push("category = ANY(")
            .push_bind(query.categories.clone())
            .push(")");
    }
}

#[async_trait]
impl BookRepository for PostgresBookRepository {
    async fn list(&self, query: &ListBooksQuery) -> Result<(i64, Vec<Book>), BookError> {
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) FROM books");
        push_filters(&mut count_builder, query);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| BookError::Database(e.to_string()))?;

        let mut builder = QueryBuilder::new(format!("SELECT {BOOK_COLUMNS} FROM books"));
        push_filters(&mut builder, query);
        builder.push(" ORDER BY price ").push(match query.order {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        });
        builder
            .push(" LIMIT ")
            .push_bind(query.limit)
            .push(" OFFSET ")
            .push_bind(query.offset());

        let rows: Vec<BookRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BookError::Database(e.to_string()))?;

        Ok((total, rows.into_iter().map(Book::from).collect()))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, BookError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1");

        sqlx::query_as::<_, BookRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(Book::from))
            .map_err(|e| BookError::Database(e.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id");

        sqlx::query_as::<_, BookRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(Book::from).collect())
            .map_err(|e| BookError::Database(e.to_string()))
    }

    async fn distinct_categories(&self) -> Result<Vec<Option<String>>, BookError> {
        sqlx::query_scalar::<_, Option<String>>("SELECT DISTINCT category FROM books")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| BookError::Database(e.to_string()))
    }
}
