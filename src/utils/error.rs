use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::store::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Any failure below the handler, tagged with what the request was doing.
    #[error("{context}: {source}")]
    Internal {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    pub fn internal(context: &'static str, source: StoreError) -> Self {
        AppError::Internal { context, source }
    }

    /// Like [`AppError::internal`], but lets an unsupported listing surface as 501.
    pub fn listing(context: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::NotImplemented(msg) => AppError::NotImplemented(msg),
            other => AppError::internal(context, other),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg) => {
                warn!(message = %msg, "Rejected request");
            }
            AppError::NotImplemented(msg) => {
                warn!(message = %msg, "Operation not implemented");
            }
            AppError::Internal { context, source } => {
                error!(error = ?source, "Error occurred {}", context.to_lowercase());
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        self.log();

        match self {
            AppError::ValidationError(msg) | AppError::NotImplemented(msg) => {
                error_response(msg, None, status)
            }
            AppError::Internal { context, source } => {
                error_response(context, Some(source.to_string()), status)
            }
        }
    }
}
