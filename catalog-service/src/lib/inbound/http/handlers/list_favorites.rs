use axum::extract::State;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::BookData;
use crate::book::models::FavoriteWithBook;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let favorites = state.book_service.favorites(auth_user.id).await?;

    Ok(Json(FavoritesResponse {
        data: favorites.iter().map(FavoriteData::from).collect(),
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoritesResponse {
    pub data: Vec<FavoriteData>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteData {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "Book")]
    pub book: BookData,
}

impl From<&FavoriteWithBook> for FavoriteData {
    fn from(row: &FavoriteWithBook) -> Self {
        Self {
            id: row.favorite.id,
            user_id: row.favorite.user_id,
            book_id: row.favorite.book_id,
            created_at: row.favorite.created_at,
            book: (&row.book).into(),
        }
    }
}
