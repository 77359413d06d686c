use async_trait::async_trait;

use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::Favorite;
use crate::book::models::FavoriteWithBook;
use crate::book::models::ListBooksQuery;

/// Read access to the catalog.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Run the listing query; returns the total row count alongside the
    /// requested page.
    async fn list(&self, query: &ListBooksQuery) -> Result<(i64, Vec<Book>), BookError>;

    /// Retrieve a book by id (None if not found).
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, BookError>;

    /// Every book in the catalog (recommendation prompt input).
    async fn list_all(&self) -> Result<Vec<Book>, BookError>;

    /// Distinct category values, raw (nulls included).
    async fn distinct_categories(&self) -> Result<Vec<Option<String>>, BookError>;
}

/// Persistence for user bookmarks.
#[async_trait]
pub trait FavoriteRepository: Send + Sync + 'static {
    async fn create(&self, user_id: i32, book_id: i32) -> Result<Favorite, BookError>;

    async fn find_by_user_and_book(
        &self,
        user_id: i32,
        book_id: i32,
    ) -> Result<Option<Favorite>, BookError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Favorite>, BookError>;

    async fn delete(&self, id: i32) -> Result<(), BookError>;

    /// A user's favorites joined with their books.
    async fn list_with_books(&self, user_id: i32) -> Result<Vec<FavoriteWithBook>, BookError>;
}

/// Outbound call to the generative text model.
#[async_trait]
pub trait ContentGenerator: Send + Sync + 'static {
    /// Send the prompt and return the model's raw text output (expected to
    /// be a JSON integer array, per the configured response schema).
    async fn generate(&self, prompt: &str) -> Result<String, BookError>;
}
