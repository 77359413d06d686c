use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::router::AppState;

pub async fn categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let categories = state.book_service.categories().await?;

    Ok(Json(CategoriesResponse { categories }))
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}
