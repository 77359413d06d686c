use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = body
        .email
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::Validation(Some("Email is required".to_string())))?;
    let password = body
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::Validation(Some("Password is required".to_string())))?;

    // Unknown email and wrong password get the same response, so a caller
    // cannot probe which addresses are registered
    let user = state
        .user_service
        .get_user_by_email(&email)
        .await
        .map_err(|e| match e {
            UserError::NotFound => {
                ApiError::Unauthorized(Some("Invalid email or password".to_string()))
            }
            other => ApiError::from(other),
        })?;

    let claims = auth::Claims::new(user.id, user.email.clone());
    let result = state
        .authenticator
        .authenticate(&password, &user.password_hash, &claims)
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                ApiError::Unauthorized(Some("Invalid email or password".to_string()))
            }
            auth::AuthenticationError::PasswordError(err) => {
                tracing::error!(error = %err, "Password verification failed");
                ApiError::Internal(None)
            }
            auth::AuthenticationError::JwtError(err) => {
                tracing::error!(error = %err, "Token generation failed");
                ApiError::Internal(None)
            }
        })?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        access_token: result.access_token,
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub access_token: String,
}
