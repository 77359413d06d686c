use axum::extract::State;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::models::User;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state.user_service.get_profile(auth_user.id).await?;

    Ok(Json(ProfileResponse {
        data: (&user).into(),
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub data: ProfileData,
}

/// Profile view of an account. The password hash is deliberately absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Recommendation-credit balance (not the access token).
    #[serde(rename = "token")]
    pub token_balance: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for ProfileData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            token_balance: user.token_balance,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
