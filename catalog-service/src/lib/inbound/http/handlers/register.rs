use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use crate::inbound::http::router::AppState;
use crate::user::models::RegisterCommand;
use crate::user::models::User;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let command = RegisterCommand::parse(body.username, body.email, body.password)?;

    let user = state.user_service.register(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            data: (&user).into(),
        }),
    ))
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub data: RegisteredUserData,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisteredUserData {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl From<&User> for RegisteredUserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}
