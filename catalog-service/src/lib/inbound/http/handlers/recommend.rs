use axum::extract::Query;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::book::models::RecommendedBook;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn recommend(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let recommendation = state
        .book_service
        .recommend(auth_user.token_balance, params.category)
        .await?;

    Ok(Json(RecommendResponse {
        message: "Hello from Gemini API".to_string(),
        generation: recommendation.generation,
        books: recommendation
            .books
            .iter()
            .map(RecommendedBookData::from)
            .collect(),
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendParams {
    /// Theme the recommendations should match.
    category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub message: String,
    /// Raw id list as produced by the generator.
    pub generation: Vec<i64>,
    #[serde(rename = "Books")]
    pub books: Vec<RecommendedBookData>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendedBookData {
    pub title: String,
    pub summary: String,
}

impl From<&RecommendedBook> for RecommendedBookData {
    fn from(book: &RecommendedBook) -> Self {
        Self {
            title: book.title.clone(),
            summary: book.summary.clone(),
        }
    }
}
