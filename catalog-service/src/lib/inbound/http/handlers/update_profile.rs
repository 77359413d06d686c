use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    state
        .user_service
        .update_profile(auth_user.id, body.username)
        .await?;

    Ok(Json(UpdateProfileResponse {
        message: "Profile updated successfully".to_string(),
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    // An absent username leaves the profile untouched but still succeeds
    username: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileResponse {
    pub message: String,
}
