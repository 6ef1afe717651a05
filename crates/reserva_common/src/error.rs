// --- File: crates/reserva_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for all Reserva errors.
///
/// This enum provides a common set of error variants that can be used across
/// all crates. Each crate can extend this by implementing
/// From<SpecificError> for ReservaError.
#[derive(Error, Debug)]
pub enum ReservaError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred during authentication or authorization
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during external service call
    #[error("External service error: {service_name} - {message}")]
    ExternalServiceError {
        service_name: String,
        message: String,
    },

    /// Error occurred due to a conflict (e.g., resource already exists)
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Error occurred due to a timeout
    #[error("Timeout: {0}")]
    TimeoutError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
///
/// This trait can be implemented by error types to provide a consistent way
/// to convert errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ReservaError {
    fn status_code(&self) -> u16 {
        match self {
            ReservaError::HttpError(_) => 500,
            ReservaError::ParseError(_) => 400,
            ReservaError::ConfigError(_) => 500,
            ReservaError::AuthError(_) => 401,
            ReservaError::ValidationError(_) => 400,
            ReservaError::ExternalServiceError { .. } => 502,
            ReservaError::ConflictError(_) => 409,
            ReservaError::NotFoundError(_) => 404,
            ReservaError::TimeoutError(_) => 504,
            ReservaError::InternalError(_) => 500,
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for ReservaError {
    fn from(err: reqwest::Error) -> Self {
        ReservaError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ReservaError {
    fn from(err: serde_json::Error) -> Self {
        ReservaError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for ReservaError {
    fn from(err: std::io::Error) -> Self {
        ReservaError::InternalError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> ReservaError {
    ReservaError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> ReservaError {
    ReservaError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> ReservaError {
    ReservaError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> ReservaError {
    ReservaError::ConflictError(message.to_string())
}

pub fn external_service_error<T: fmt::Display>(service_name: &str, message: T) -> ReservaError {
    ReservaError::ExternalServiceError {
        service_name: service_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> ReservaError {
    ReservaError::InternalError(message.to_string())
}
