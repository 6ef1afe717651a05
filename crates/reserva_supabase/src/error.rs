// --- File: crates/reserva_supabase/src/error.rs ---
use reserva_common::services::StoreError;
use reserva_common::{external_service_error, HttpStatusCode, ReservaError};
use thiserror::Error;

/// Supabase-specific error types.
#[derive(Error, Debug)]
pub enum SupabaseError {
    /// Error occurred during a request to the Supabase API
    #[error("Supabase request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the auth (GoTrue) API
    #[error("Supabase auth error: {message} (Status: {status})")]
    AuthApiError { status: u16, message: String },

    /// Error returned by the data (PostgREST) API, with the service's own
    /// error code when it provided one
    #[error("Supabase data error: {message} (Status: {status})")]
    DataApiError {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Error parsing a Supabase API response
    #[error("Failed to parse Supabase response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing or incomplete Supabase configuration
    #[error("Supabase configuration missing or incomplete")]
    ConfigError,

    /// Operation requires a signed-in session
    #[error("No active session")]
    NoSession,
}

/// Convert SupabaseError into the shared store error kinds.
///
/// PostgREST reports missing tables as 42P01 (undefined_table) or PGRST205,
/// and row-level-security rejections as 42501 (insufficient_privilege); both
/// are distinguished from plain connectivity failures.
impl From<SupabaseError> for StoreError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::RequestError(e) => StoreError::RemoteUnavailable(e.to_string()),
            SupabaseError::AuthApiError { status, message } => {
                StoreError::Api { status, message }
            }
            SupabaseError::DataApiError {
                status,
                code,
                message,
            } => match (status, code.as_deref()) {
                (_, Some("42P01")) | (_, Some("PGRST205")) => {
                    StoreError::ConfigurationMissing(message)
                }
                (_, Some("42501")) | (401, _) | (403, _) => StoreError::PermissionDenied(message),
                _ => StoreError::Api { status, message },
            },
            SupabaseError::ParseError(e) => StoreError::Parse(e.to_string()),
            SupabaseError::ConfigError => {
                StoreError::ConfigurationMissing("Supabase configuration missing".to_string())
            }
            SupabaseError::NoSession => StoreError::PermissionDenied("No active session".into()),
        }
    }
}

/// Convert SupabaseError to ReservaError
impl From<SupabaseError> for ReservaError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::RequestError(e) => {
                ReservaError::HttpError(format!("Supabase request error: {}", e))
            }
            SupabaseError::AuthApiError { status, message } => {
                ReservaError::AuthError(format!("Status: {}, Message: {}", status, message))
            }
            SupabaseError::DataApiError {
                status, message, ..
            } => external_service_error(
                "Supabase API",
                format!("Status: {}, Message: {}", status, message),
            ),
            SupabaseError::ParseError(e) => {
                ReservaError::ParseError(format!("Supabase response parse error: {}", e))
            }
            SupabaseError::ConfigError => {
                ReservaError::ConfigError("Supabase configuration missing or incomplete".to_string())
            }
            SupabaseError::NoSession => ReservaError::AuthError("No active session".to_string()),
        }
    }
}

impl HttpStatusCode for SupabaseError {
    fn status_code(&self) -> u16 {
        match self {
            SupabaseError::RequestError(_) => 503,
            SupabaseError::AuthApiError { status, .. } => *status,
            SupabaseError::DataApiError { status, .. } => *status,
            SupabaseError::ParseError(_) => 502,
            SupabaseError::ConfigError => 500,
            SupabaseError::NoSession => 401,
        }
    }
}
