//! Server-specific error types
//!
//! [`AppError`] is where engine and source errors become HTTP responses.
//! Feature-level API errors convert into it rather than choosing status codes
//! themselves.

use crate::api::response::ErrorResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hotel_common::HotelError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    /// Uploaded or stored data that does not match the booking schema
    #[error("{0}")]
    InvalidData(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidData(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::InvalidData(_) => "INVALID_DATA",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Unavailable(_) => "SOURCE_UNAVAILABLE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<HotelError> for AppError {
    fn from(err: HotelError) -> Self {
        match err {
            HotelError::InvalidDate(_)
            | HotelError::InvalidArgument(_)
            | HotelError::EmptyDataset(_) => AppError::Validation(err.to_string()),
            HotelError::SchemaMismatch(_) | HotelError::Csv(_) => {
                AppError::InvalidData(err.to_string())
            },
            HotelError::NotFound(message) => AppError::NotFound(message),
            HotelError::SourceUnavailable(_) => AppError::Unavailable(err.to_string()),
            HotelError::Io(_) | HotelError::Serialization(_) | HotelError::Database(_) => {
                AppError::Internal(err.to_string())
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "An internal error occurred".to_string()
            },
            AppError::Unavailable(message) => {
                tracing::warn!("Dataset unavailable: {}", message);
                message.clone()
            },
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(self.code(), message))).into_response()
    }
}
