use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use yatra_catalog::InventoryError;
use yatra_core::{IdentityError, OtpError};
use yatra_ledger::LedgerError;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    TransportError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::TransportError(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::Validation(_) | LedgerError::JourneyDateOutOfWindow => {
                AppError::ValidationError(message)
            }
            LedgerError::TicketNotFound(_) => AppError::NotFoundError(message),
            LedgerError::InvalidState { .. } => AppError::ConflictError(message),
            LedgerError::Inventory(InventoryError::TrainNotFound(_)) => AppError::NotFoundError(message),
            LedgerError::Inventory(InventoryError::SoldOut { .. }) => AppError::ConflictError(message),
            LedgerError::Identity(IdentityError::AlreadyExists(_)) => AppError::ConflictError(message),
            LedgerError::Identity(IdentityError::InvalidEmail(_)) => AppError::ValidationError(message),
            LedgerError::Identity(IdentityError::NotFound(_)) => AppError::NotFoundError(message),
            LedgerError::PnrSpaceExhausted | LedgerError::Store(_) => {
                AppError::InternalServerError(message)
            }
        }
    }
}

impl From<OtpError> for AppError {
    fn from(err: OtpError) -> Self {
        match err {
            OtpError::DeliveryFailed(_) => AppError::TransportError(err.to_string()),
        }
    }
}
