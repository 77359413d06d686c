use axum::async_trait;
use axum::extract::FromRequest;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::book::errors::BookError;
use crate::book::models::Book;
use crate::payment::errors::PaymentError;
use crate::user::errors::UserError;

pub mod add_favorite;
pub mod book_detail;
pub mod buy_token;
pub mod categories;
pub mod get_profile;
pub mod google_signin;
pub mod list_books;
pub mod list_favorites;
pub mod login;
pub mod payment_notification;
pub mod recommend;
pub mod register;
pub mod remove_favorite;
pub mod update_profile;

/// Central translator from a failed operation to an HTTP response.
///
/// This is the only place status codes are decided. Every variant carries an
/// optional message; when none is given, a fixed fallback is used. The body
/// is always `{"message"}` and never includes internal detail — database and
/// provider errors are logged at the conversion sites and surface as the
/// bare `Internal` variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request fields failed validation.
    Validation(Option<String>),
    /// A uniqueness rule was violated.
    UniqueConstraint(Option<String>),
    /// Malformed or unprocessable request input. Shares the
    /// unique-constraint fallback message.
    BadRequest(Option<String>),
    /// Unreadable request (e.g. a body that is not valid JSON).
    InvalidRequest(Option<String>),
    Unauthorized(Option<String>),
    /// Access-token verification failed. The response message is fixed
    /// regardless of the cause.
    InvalidToken,
    Forbidden(Option<String>),
    NotFound(Option<String>),
    /// Paid feature invoked without credit.
    Payment(Option<String>),
    Internal(Option<String>),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                msg.unwrap_or_else(|| "Validation error".to_string()),
            ),
            ApiError::UniqueConstraint(msg) => (
                StatusCode::BAD_REQUEST,
                msg.unwrap_or_else(|| "Unique constraint error".to_string()),
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                msg.unwrap_or_else(|| "Unique constraint error".to_string()),
            ),
            ApiError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                msg.unwrap_or_else(|| "Bad Request".to_string()),
            ),
            ApiError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                msg.unwrap_or_else(|| "Unauthorized access".to_string()),
            ),
            ApiError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            ApiError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                msg.unwrap_or_else(|| "Forbidden access".to_string()),
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                msg.unwrap_or_else(|| "Resource not found".to_string()),
            ),
            ApiError::Payment(msg) => (
                StatusCode::PAYMENT_REQUIRED,
                msg.unwrap_or_else(|| "Payment required".to_string()),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                msg.unwrap_or_else(|| "Internal Server Error".to_string()),
            ),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match &err {
            UserError::Validation(_) => ApiError::Validation(Some(err.to_string())),
            UserError::EmailTaken => ApiError::UniqueConstraint(Some(err.to_string())),
            UserError::NotFound => ApiError::NotFound(Some(err.to_string())),
            UserError::MissingGoogleToken => ApiError::BadRequest(Some(err.to_string())),
            UserError::IdentityVerification(detail) => {
                tracing::error!(error = %detail, "Identity verification failed");
                ApiError::Internal(None)
            }
            UserError::PasswordHash(detail) => {
                tracing::error!(error = %detail, "Password hashing failed");
                ApiError::Internal(None)
            }
            UserError::Database(detail) => {
                tracing::error!(error = %detail, "Database error");
                ApiError::Internal(None)
            }
        }
    }
}

impl From<BookError> for ApiError {
    fn from(err: BookError) -> Self {
        match &err {
            BookError::InvalidBookId
            | BookError::InvalidFavoriteId
            | BookError::LimitNotNumeric
            | BookError::PageOrLimitOutOfRange
            | BookError::DuplicateFavorite => ApiError::BadRequest(Some(err.to_string())),
            BookError::NotFound | BookError::FavoriteNotFound | BookError::NoFavorites => {
                ApiError::NotFound(Some(err.to_string()))
            }
            BookError::NotFavoriteOwner => ApiError::Forbidden(Some(err.to_string())),
            BookError::InsufficientTokens => ApiError::Payment(Some(err.to_string())),
            BookError::Generation(detail) => {
                tracing::error!(error = %detail, "Content generation failed");
                ApiError::Internal(None)
            }
            BookError::Database(detail) => {
                tracing::error!(error = %detail, "Database error");
                ApiError::Internal(None)
            }
        }
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        match err {
            PaymentError::Gateway(detail) => {
                tracing::error!(error = %detail, "Payment gateway error");
                ApiError::Internal(None)
            }
            PaymentError::Database(detail) => {
                tracing::error!(error = %detail, "Database error");
                ApiError::Internal(None)
            }
        }
    }
}

/// JSON body extractor whose rejection goes through the classifier instead
/// of axum's plain-text default.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|_| ApiError::InvalidRequest(None))?;
        Ok(Self(value))
    }
}

/// Catalog entry as exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookData {
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

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            image_url: book.image_url.clone(),
            category: book.category.clone(),
            author: book.author.clone(),
            summary: book.summary.clone(),
            price: book.price,
            publish_date: book.publish_date.clone(),
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}
