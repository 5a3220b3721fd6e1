use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing token")]
    MissingToken,

    #[error("Invalid request body")]
    InvalidBody,

    #[error("Token inválido")]
    InvalidToken,

    // Used and expired tokens deliberately share one message.
    #[error("Token expirado o usado")]
    TokenUnavailable,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Server misconfigured")]
    Misconfigured,

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingToken
            | AppError::InvalidBody
            | AppError::InvalidToken
            | AppError::TokenUnavailable => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Misconfigured | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
