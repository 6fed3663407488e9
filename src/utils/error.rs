use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::booking::BookingError;
use crate::catalog::CatalogError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Booking(BookingError::CategoryNotFound) => StatusCode::NOT_FOUND,
            AppError::Booking(BookingError::InvalidSeat { .. }) => StatusCode::BAD_REQUEST,
            AppError::Booking(BookingError::SeatTaken(_)) => StatusCode::CONFLICT,
            AppError::Catalog(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::Forbidden(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Booking(BookingError::CategoryNotFound) => "CATEGORY_NOT_FOUND",
            AppError::Booking(BookingError::InvalidSeat { .. }) => "INVALID_SEAT",
            AppError::Booking(BookingError::SeatTaken(_)) => "SEAT_TAKEN",
            AppError::Catalog(_) => "VALIDATION_ERROR",
        }
    }

    fn log(&self) {
        error!(error = ?self, code = self.code(), "Application error");
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // Booking and catalog failures are recoverable, user-facing
        // outcomes; their messages are safe to expose as-is.
        let public_message = self.to_string();

        error_response(code, public_message, None, status)
    }
}
