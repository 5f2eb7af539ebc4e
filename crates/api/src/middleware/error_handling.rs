//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Rosteria
//! API. It maps domain-specific errors to appropriate HTTP status codes and
//! JSON error responses, ensuring a consistent error handling experience
//! across the entire API.
//!
//! The implementation is based on Axum's error handling mechanisms and
//! integrates with Rosteria's custom error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rosteria_core::errors::RosterError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps domain-specific `RosterError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub RosterError);

/// Converts application errors to HTTP responses
///
/// This implementation maps each error type to the appropriate HTTP status
/// code and formats the error message into a JSON response body.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        // Combine status code and JSON body into a response
        (status, body).into_response()
    }
}

impl AppError {
    /// The HTTP status this error maps to, without building a response.
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            RosterError::NotFound(_) => StatusCode::NOT_FOUND,
            RosterError::Validation(_) => StatusCode::BAD_REQUEST,
            RosterError::Duplicate(_) => StatusCode::CONFLICT,
            RosterError::Expired(_) => StatusCode::GONE,
            RosterError::Authentication(_) => StatusCode::UNAUTHORIZED,
            RosterError::Authorization(_) => StatusCode::FORBIDDEN,
            RosterError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            RosterError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RosterError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Automatic conversion from RosterError to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, RosterError>` in handler functions that return
/// `Result<T, AppError>`.
impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// This implementation allows using `?` operator with functions that return
/// `Result<T, eyre::Report>` in handler functions that return
/// `Result<T, AppError>`. It wraps the eyre error in a
/// `RosterError::Database` variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(RosterError::Database(err))
    }
}
