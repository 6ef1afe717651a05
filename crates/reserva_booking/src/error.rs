// --- File: crates/reserva_booking/src/error.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reserva_common::services::StoreError;
use reserva_common::{HttpStatusCode, ReservaError};
use serde_json::json;
use thiserror::Error;

/// Booking-specific error types.
///
/// Display strings double as the user-facing messages of the uniform result
/// shape, matching the copy the gym's interface shows.
#[derive(Error, Debug)]
pub enum BookingError {
    /// Operation requires a signed-in user
    #[error("Debes iniciar sesión para realizar una reserva")]
    Unauthenticated,

    /// Admin-only operation attempted by a non-admin
    #[error("No autorizado")]
    NotAuthorized,

    /// The slot is missing or no longer flagged available
    #[error("El slot seleccionado no está disponible")]
    SlotUnavailable,

    /// A confirmed booking already references the slot
    #[error("Este horario ya está reservado")]
    SlotAlreadyBooked,

    /// The one-trial-per-user limit was hit
    #[error("Ya has utilizado tu clase de prueba gratuita. ¡Contáctanos para conocer nuestros planes!")]
    TrialAlreadyUsed,

    /// Resource absent or not owned by the caller
    #[error("Reserva no encontrada o no autorizada")]
    NotFoundOrForbidden,

    /// The service catalog is empty; the deployment needs provisioning
    #[error("No hay servicios configurados. Contacta al administrador.")]
    CatalogEmpty,

    /// Request parameters failed validation
    #[error("Parámetros inválidos: {0}")]
    InvalidRequest(String),

    /// Error from the hosted store
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HttpStatusCode for BookingError {
    fn status_code(&self) -> u16 {
        match self {
            BookingError::Unauthenticated => 401,
            BookingError::NotAuthorized => 403,
            BookingError::SlotUnavailable => 409,
            BookingError::SlotAlreadyBooked => 409,
            BookingError::TrialAlreadyUsed => 409,
            BookingError::NotFoundOrForbidden => 404,
            BookingError::CatalogEmpty => 503,
            BookingError::InvalidRequest(_) => 400,
            BookingError::Store(e) => e.status_code(),
        }
    }
}

/// Failures surface as the uniform JSON error body the interface renders.
impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status.as_u16(),
            }
        }));
        (status, body).into_response()
    }
}

/// Convert BookingError to ReservaError
impl From<BookingError> for ReservaError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Unauthenticated | BookingError::NotAuthorized => {
                ReservaError::AuthError(err.to_string())
            }
            BookingError::SlotUnavailable
            | BookingError::SlotAlreadyBooked
            | BookingError::TrialAlreadyUsed => ReservaError::ConflictError(err.to_string()),
            BookingError::NotFoundOrForbidden => ReservaError::NotFoundError(err.to_string()),
            BookingError::CatalogEmpty => ReservaError::ConfigError(err.to_string()),
            BookingError::InvalidRequest(msg) => ReservaError::ValidationError(msg),
            BookingError::Store(e) => ReservaError::from(e),
        }
    }
}
