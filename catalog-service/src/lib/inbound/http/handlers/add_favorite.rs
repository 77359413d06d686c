use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use super::BookData;
use crate::book::models::parse_book_id;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(book_id): Path<String>,
) -> Result<(StatusCode, Json<AddFavoriteResponse>), ApiError> {
    let book_id = parse_book_id(&book_id)?;

    let book = state.book_service.add_favorite(auth_user.id, book_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(AddFavoriteResponse {
            message: "Book added to favorites successfully".to_string(),
            book: (&book).into(),
        }),
    ))
}

#[derive(Debug, Clone, Serialize)]
pub struct AddFavoriteResponse {
    pub message: String,
    pub book: BookData,
}
