use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::AuthToken;
use crate::domain::user::models::Credentials;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Json(body) = body?;
    let credentials = Credentials {
        username: body.username,
        password: body.password,
    };

    state
        .auth_service
        .login(credentials)
        .await
        .map_err(|e| {
            tracing::warn!("Login rejected: {}", e);
            ApiError::from(e)
        })
        .map(|token| ApiSuccess::new(StatusCode::OK, token.into()))
}

/// HTTP request body for login (raw JSON)
///
/// Missing fields default to empty strings and fail like wrong credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

impl From<AuthToken> for LoginResponseData {
    fn from(token: AuthToken) -> Self {
        Self {
            token: token.access_token,
            token_type: "Bearer",
            expires_in: token.expires_in,
        }
    }
}
