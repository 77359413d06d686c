use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use crate::inbound::http::router::AppState;

pub async fn google_signin(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<GoogleSigninRequest>,
) -> Result<Json<GoogleSigninResponse>, ApiError> {
    let user = state.user_service.google_signin(body.google_token).await?;

    let claims = auth::Claims::new(user.id, user.email);
    let access_token = state.authenticator.generate_token(&claims).map_err(|e| {
        tracing::error!(error = %e, "Token generation failed");
        ApiError::Internal(None)
    })?;

    Ok(Json(GoogleSigninResponse { access_token }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSigninRequest {
    #[serde(rename = "googleToken")]
    google_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleSigninResponse {
    pub access_token: String,
}
