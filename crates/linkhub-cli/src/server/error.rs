//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, error, warn};

use linkhub_core::LinkHubError;

/// Errors returned by route handlers
#[derive(Debug)]
pub enum AppError {
    /// Error from the store
    Store(LinkHubError),
    /// Malformed request input
    BadRequest(String),
    /// A blocking store task panicked or was cancelled
    Internal(String),
}

impl From<LinkHubError> for AppError {
    fn from(err: LinkHubError) -> Self {
        AppError::Store(err)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Store(LinkHubError::Validation { .. }) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Store(LinkHubError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(LinkHubError::Forbidden) => StatusCode::FORBIDDEN,
            AppError::Store(LinkHubError::Storage(_)) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Store(LinkHubError::Storage(err)) => {
                match err.recovery_suggestion() {
                    Some(hint) if err.is_recoverable() => {
                        warn!("Storage failure: {} ({})", err, hint)
                    }
                    Some(hint) => error!("Storage failure: {} ({})", err, hint),
                    None => error!("Storage failure: {}", err),
                }
                "Storage unavailable".to_string()
            }
            AppError::Store(err) => {
                if err.is_client_error() {
                    debug!("Rejected request: {}", err);
                }
                err.to_string()
            }
            AppError::BadRequest(message) => message,
            AppError::Internal(detail) => {
                error!("Store task failed: {}", detail);
                "Internal error".to_string()
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
