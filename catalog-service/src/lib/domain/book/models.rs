use chrono::DateTime;
use chrono::Utc;

use crate::book::errors::BookError;

/// Catalog entry. Read-only from the API's perspective; rows are seeded
/// out of band.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub author: String,
    pub summary: String,
    pub price: i32,
    pub publish_date: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's bookmark on a catalog entry.
#[derive(Debug, Clone)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub created_at: DateTime<Utc>,
}

/// Favorite joined with the book it points at.
#[derive(Debug, Clone)]
pub struct FavoriteWithBook {
    pub favorite: Favorite,
    pub book: Book,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Validated listing query: free-text title search, category filter,
/// price sort, and pagination.
#[derive(Debug, Clone)]
pub struct ListBooksQuery {
    pub search: Option<String>,
    pub categories: Vec<String>,
    pub order: SortOrder,
    pub page: i64,
    pub limit: i64,
}

impl ListBooksQuery {
    /// Parse the raw query-string values.
    ///
    /// Defaults: page 1, limit 10, ascending price. The limit must parse as
    /// a number; page and limit must both be at least 1. The category value
    /// may hold several comma-separated names; blanks are dropped.
    pub fn parse(
        search: Option<String>,
        category: Option<String>,
        order: Option<String>,
        page: Option<String>,
        limit: Option<String>,
    ) -> Result<Self, BookError> {
        let limit = match limit {
            None => 10,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| BookError::LimitNotNumeric)?,
        };

        // A page value that does not parse falls through to the range check
        let page = match page {
            None => 1,
            Some(raw) => raw.parse::<i64>().unwrap_or(0),
        };

        if page < 1 || limit < 1 {
            return Err(BookError::PageOrLimitOutOfRange);
        }

        let categories = category
            .map(|raw| {
                raw.split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let order = match order.as_deref() {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        };

        Ok(Self {
            search: search.filter(|s| !s.is_empty()),
            categories,
            order,
            page,
            limit,
        })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// One page of listing results.
#[derive(Debug, Clone)]
pub struct BookPage {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_data: i64,
    pub books: Vec<Book>,
}

/// Outcome of a recommendation request: the raw id list the generator
/// produced and the catalog entries it resolved to.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub generation: Vec<i64>,
    pub books: Vec<RecommendedBook>,
}

#[derive(Debug, Clone)]
pub struct RecommendedBook {
    pub title: String,
    pub summary: String,
}

/// Parse a path segment as a book id: a positive 32-bit integer.
pub fn parse_book_id(raw: &str) -> Result<i32, BookError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(BookError::InvalidBookId)
}

/// Parse a path segment as a favorite id: a positive 32-bit integer.
pub fn parse_favorite_id(raw: &str) -> Result<i32, BookError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(BookError::InvalidFavoriteId)
}
