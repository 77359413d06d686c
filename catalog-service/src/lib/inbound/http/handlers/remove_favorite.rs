use axum::extract::Path;
use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::book::models::parse_favorite_id;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<RemoveFavoriteResponse>, ApiError> {
    let id = parse_favorite_id(&id)?;

    state.book_service.remove_favorite(auth_user.id, id).await?;

    Ok(Json(RemoveFavoriteResponse {
        message: "Favorite book removed successfully".to_string(),
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct RemoveFavoriteResponse {
    pub message: String,
}
