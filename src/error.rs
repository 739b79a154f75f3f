//! Error types for the ShareIt services

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Why a caller was refused access to a resource.
///
/// These refusals are reported as 404 on the wire, like a missing entity,
/// but stay distinguishable inside the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// The booker is the owner of the item they tried to book
    OwnerCannotBook,
    /// Only the item owner may approve or reject a booking
    NotItemOwner,
    /// A booking is visible to its booker and the item owner only
    NotOwnerOrBooker,
}

impl std::fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            AccessDenied::OwnerCannotBook => "Owner cannot book own item",
            AccessDenied::NotItemOwner => "Only the item owner can change booking status",
            AccessDenied::NotOwnerOrBooker => "Cannot view this booking",
        };
        f.write_str(message)
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Denied(AccessDenied),

    #[error("Booking conflict: {0}")]
    BookingOverlap(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{0}")]
    UnsupportedOperation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short name of the error kind, as reported in response bodies
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) | AppError::Denied(_) => "NotFound",
            AppError::BookingOverlap(_) => "BookingOverlap",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Validation(_) => "Validation",
            AppError::Forbidden(_) => "Forbidden",
            AppError::UnsupportedOperation(_) => "UnsupportedOperation",
            AppError::Conflict(_) => "Conflict",
            AppError::Database(_) => "Database",
            AppError::Upstream(_) => "Upstream",
            AppError::Internal(_) => "Internal",
        }
    }

    /// HTTP status the error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) | AppError::Denied(_) | AppError::BookingOverlap(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::BadRequest(_)
            | AppError::Validation(_)
            | AppError::UnsupportedOperation(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub kind: String,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::NotFound(msg)
            | AppError::BookingOverlap(msg)
            | AppError::BadRequest(msg)
            | AppError::Validation(msg)
            | AppError::Forbidden(msg)
            | AppError::UnsupportedOperation(msg)
            | AppError::Conflict(msg)
            | AppError::Upstream(msg) => msg.clone(),
            AppError::Denied(reason) => reason.to_string(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        let body = Json(ErrorResponse {
            kind: self.kind().to_string(),
            error: message,
        });

        (self.status(), body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
