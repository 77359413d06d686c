use thiserror::Error;

/// Top-level error for catalog, favorite, and recommendation operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid book ID format")]
    InvalidBookId,

    #[error("Invalid favorite ID format")]
    InvalidFavoriteId,

    #[error("Limit must be a number")]
    LimitNotNumeric,

    #[error("Page and limit must be greater than 0")]
    PageOrLimitOutOfRange,

    #[error("Book not found")]
    NotFound,

    #[error("Favorite book not found")]
    FavoriteNotFound,

    #[error("No favorite books found")]
    NoFavorites,

    #[error("This book is already in your favorites")]
    DuplicateFavorite,

    #[error("You are not authorized to remove this favorite book")]
    NotFavoriteOwner,

    #[error("You need to buy token first")]
    InsufficientTokens,

    #[error("Content generation failed: {0}")]
    Generation(String),

    #[error("Database error: {0}")]
    Database(String),
}
