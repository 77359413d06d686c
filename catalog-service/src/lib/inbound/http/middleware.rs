use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Authenticated caller attached to the request by the authentication gate.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub email: String,
    /// Credit balance at authentication time (gates the recommendation
    /// feature).
    pub token_balance: i32,
}

/// Authentication gate: resolve the Bearer credential to a user or reject
/// the request before it reaches a protected handler.
///
/// Never writes to the data store; its only effect is the
/// [`AuthenticatedUser`] attached to the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized(Some("Please login first".to_string())))?;

    let header = header
        .to_str()
        .map_err(|_| ApiError::Unauthorized(Some("Invalid token format".to_string())))?;

    let token = extract_bearer_token(header)?;

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token rejected");
        ApiError::InvalidToken
    })?;

    let user = state
        .user_service
        .get_user(claims.id)
        .await
        .map_err(|e| match e {
            UserError::NotFound => {
                tracing::warn!(user_id = claims.id, "Token subject no longer exists");
                ApiError::InvalidToken
            }
            other => ApiError::from(other),
        })?;

    req.extensions_mut().insert(AuthenticatedUser {
        id: user.id,
        email: user.email,
        token_balance: user.token_balance,
    });

    Ok(next.run(req).await)
}

/// Authorization gate: confirm an authenticated identity is on the request.
///
/// Defense in depth behind [`authenticate`]; unlike the rest of the error
/// paths it writes its response directly rather than going through the
/// classifier.
pub async fn require_authentication(req: Request, next: Next) -> Response {
    if req.extensions().get::<AuthenticatedUser>().is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "You must be logged in to perform this action." })),
        )
            .into_response();
    }

    next.run(req).await
}

/// Strict `Bearer <token>` parse: the first space-separated segment must be
/// exactly the scheme and the second must be non-empty. Leading whitespace
/// or a doubled separator therefore fails the check.
fn extract_bearer_token(header: &str) -> Result<&str, ApiError> {
    let mut parts = header.splitn(3, ' ');
    let scheme = parts.next().unwrap_or_default();
    let token = parts.next().unwrap_or_default();

    if scheme != "Bearer" || token.is_empty() {
        return Err(ApiError::Unauthorized(Some(
            "Invalid token format".to_string(),
        )));
    }

    Ok(token)
}
