use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use super::BookData;
use crate::book::models::parse_book_id;
use crate::inbound::http::router::AppState;

pub async fn book_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookDetailResponse>, ApiError> {
    let id = parse_book_id(&id)?;

    let book = state.book_service.detail(id).await?;

    Ok(Json(BookDetailResponse {
        data: (&book).into(),
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct BookDetailResponse {
    pub data: BookData,
}
