use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use crate::inbound::http::router::AppState;

/// Gateway webhook. Unauthenticated: the caller is the payment gateway, and
/// the reported status is confirmed against the gateway's own API before
/// anything is written.
pub async fn payment_notification(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<serde_json::Value>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let order_id = body
        .get("order_id")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    state.payment_service.handle_notification(order_id).await?;

    Ok(Json(NotificationResponse {
        message: "OK".to_string(),
    }))
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub message: String,
}
