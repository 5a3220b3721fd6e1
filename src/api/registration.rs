use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde_json::Value;

use crate::api::state::AppState;
use crate::error::{AppError, Result};
use crate::services::token_validator::{self, ValidatedRegistration};

pub const VALIDATE_PATH: &str = "/validate-patient-registration";

/// Validate a patient self-registration token
///
/// Accepts `{ "token": "..." }` and answers with the doctor, clinic and
/// scale data needed by the registration form. Never consumes the token.
async fn validate_registration(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<ValidatedRegistration>> {
    // Oversized or unreadable bodies still get a JSON 400
    let body = body.map_err(|e| {
        tracing::info!(status = %e.status(), "Registration request body rejected");
        AppError::InvalidBody
    })?;

    let token = parse_token(&body)?;

    let store = state.store.as_deref().ok_or(AppError::Misconfigured)?;

    let registration = token_validator::validate_token(store, &token, Utc::now()).await?;

    Ok(Json(registration))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Extracts a non-empty string `token` from a JSON body
fn parse_token(body: &[u8]) -> Result<String> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::MissingToken);
    }

    let payload: Value = serde_json::from_slice(body).map_err(|_| AppError::InvalidBody)?;

    payload
        .get("token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or(AppError::MissingToken)
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        VALIDATE_PATH,
        post(validate_registration).fallback(method_not_allowed),
    )
}
