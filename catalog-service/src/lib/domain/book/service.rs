use std::sync::Arc;

use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::book::models::BookPage;
use crate::book::models::FavoriteWithBook;
use crate::book::models::ListBooksQuery;
use crate::book::models::Recommendation;
use crate::book::models::RecommendedBook;
use crate::book::ports::BookRepository;
use crate::book::ports::ContentGenerator;
use crate::book::ports::FavoriteRepository;

/// Domain service for the catalog: listing, detail, categories, favorites,
/// and AI recommendations.
pub struct BookService {
    books: Arc<dyn BookRepository>,
    favorites: Arc<dyn FavoriteRepository>,
    generator: Arc<dyn ContentGenerator>,
}

impl BookService {
    pub fn new(
        books: Arc<dyn BookRepository>,
        favorites: Arc<dyn FavoriteRepository>,
        generator: Arc<dyn ContentGenerator>,
    ) -> Self {
        Self {
            books,
            favorites,
            generator,
        }
    }

    /// Run a listing query and shape the result into a page.
    pub async fn list(&self, query: ListBooksQuery) -> Result<BookPage, BookError> {
        let (total_data, books) = self.books.list(&query).await?;

        let total_pages = (total_data + query.limit - 1) / query.limit;

        Ok(BookPage {
            current_page: query.page,
            total_pages,
            total_data,
            books,
        })
    }

    /// Fetch one book.
    ///
    /// # Errors
    /// * `NotFound` - no catalog entry with this id
    pub async fn detail(&self, id: i32) -> Result<Book, BookError> {
        self.books
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound)
    }

    /// Distinct category names, with nulls and blanks dropped.
    pub async fn categories(&self) -> Result<Vec<String>, BookError> {
        let raw = self.books.distinct_categories().await?;

        Ok(raw
            .into_iter()
            .flatten()
            .filter(|c| !c.is_empty())
            .collect())
    }

    /// Bookmark a book for a user.
    ///
    /// # Errors
    /// * `NotFound` - the book does not exist
    /// * `DuplicateFavorite` - this (user, book) pair is already bookmarked
    pub async fn add_favorite(&self, user_id: i32, book_id: i32) -> Result<Book, BookError> {
        let book = self
            .books
            .find_by_id(book_id)
            .await?
            .ok_or(BookError::NotFound)?;

        if self
            .favorites
            .find_by_user_and_book(user_id, book_id)
            .await?
            .is_some()
        {
            return Err(BookError::DuplicateFavorite);
        }

        self.favorites.create(user_id, book_id).await?;

        Ok(book)
    }

    /// A user's favorites with their books.
    ///
    /// # Errors
    /// * `NoFavorites` - the user has no bookmarks
    pub async fn favorites(&self, user_id: i32) -> Result<Vec<FavoriteWithBook>, BookError> {
        let rows = self.favorites.list_with_books(user_id).await?;

        if rows.is_empty() {
            return Err(BookError::NoFavorites);
        }

        Ok(rows)
    }

    /// Remove a bookmark. Only the owning user may do so.
    ///
    /// # Errors
    /// * `FavoriteNotFound` - no bookmark with this id
    /// * `NotFavoriteOwner` - the bookmark belongs to someone else
    pub async fn remove_favorite(&self, user_id: i32, favorite_id: i32) -> Result<(), BookError> {
        let favorite = self
            .favorites
            .find_by_id(favorite_id)
            .await?
            .ok_or(BookError::FavoriteNotFound)?;

        if favorite.user_id != user_id {
            return Err(BookError::NotFavoriteOwner);
        }

        self.favorites.delete(favorite.id).await
    }

    /// Ask the generative model for up to three catalog picks matching the
    /// theme, then resolve the returned ids against the catalog.
    ///
    /// The caller's token balance gates the feature; the balance checked is
    /// the one attached at authentication time.
    ///
    /// # Errors
    /// * `InsufficientTokens` - balance is zero
    /// * `Generation` - the provider failed or returned unparseable output
    pub async fn recommend(
        &self,
        token_balance: i32,
        theme: Option<String>,
    ) -> Result<Recommendation, BookError> {
        if token_balance == 0 {
            return Err(BookError::InsufficientTokens);
        }

        let catalog = self.books.list_all().await?;
        let listing = catalog
            .iter()
            .map(|book| format!("-{} (ID: {})", book.title, book.id))
            .collect::<Vec<_>>()
            .join("\n");

        let theme = theme.unwrap_or_default();
        let prompt = format!(
            "Recommend 3 books from the list below:\n{listing}\n\
             based on the following criteria: {theme}. The criteria matches when it \
             appears in the title or summary, or when you judge the book's topic to be \
             {theme}. If no book matches, return an empty array of IDs."
        );

        let output = self.generator.generate(&prompt).await?;

        let generation: Vec<i64> = serde_json::from_str(&output)
            .map_err(|e| BookError::Generation(format!("unparseable id list: {}", e)))?;

        let mut books = Vec::new();
        for id in &generation {
            let Ok(id) = i32::try_from(*id) else {
                continue;
            };
            if let Some(book) = self.books.find_by_id(id).await? {
                books.push(RecommendedBook {
                    title: book.title,
                    summary: book.summary,
                });
            }
        }

        Ok(Recommendation { generation, books })
    }
}
