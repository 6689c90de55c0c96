use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Ledger(e) => match e {
                LedgerError::Validation(_) => StatusCode::BAD_REQUEST,
                LedgerError::NotFound(_) => StatusCode::NOT_FOUND,
                LedgerError::Authorization => StatusCode::FORBIDDEN,
                LedgerError::ImmutableState
                | LedgerError::Collision { .. }
                | LedgerError::InvalidStateTransition => StatusCode::CONFLICT,
            },
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
