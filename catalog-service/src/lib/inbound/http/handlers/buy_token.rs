use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn buy_token(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<Json<BuyTokenResponse>, ApiError> {
    let session = state
        .payment_service
        .checkout(auth_user.id, &auth_user.email)
        .await?;

    Ok(Json(BuyTokenResponse {
        redirect_url: session.redirect_url,
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct BuyTokenResponse {
    pub redirect_url: String,
}
