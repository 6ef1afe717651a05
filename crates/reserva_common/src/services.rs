// --- File: crates/reserva_common/src/services.rs ---
//! Service abstractions for the hosted booking store.
//!
//! This module defines the trait the booking logic depends on, decoupling it
//! from the concrete Supabase-backed implementation so the domain operations
//! can be exercised against an in-memory store in tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;
use uuid::Uuid;

use crate::error::{HttpStatusCode, ReservaError};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Errors surfaced by the hosted data store.
///
/// The remote service fails in semantically distinct ways that the original
/// widget collapsed into one string; they are kept apart here so callers can
/// react to each kind.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Transport or connectivity failure reaching the backing service
    #[error("Backing service unreachable: {0}")]
    RemoteUnavailable(String),

    /// Row-level-security or policy rejection by the backing service
    #[error("Permission denied by the backing service: {0}")]
    PermissionDenied(String),

    /// Expected storage collection is absent (deployment not provisioned)
    #[error("Storage not provisioned: {0}")]
    ConfigurationMissing(String),

    /// Any other error reported by the backing service
    #[error("Backing service error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Malformed payload from the backing service
    #[error("Failed to parse backing service response: {0}")]
    Parse(String),

    /// A fixed wall-clock deadline elapsed before the service answered
    #[error("Timed out waiting for the backing service: {0}")]
    Timeout(String),
}

impl HttpStatusCode for StoreError {
    fn status_code(&self) -> u16 {
        match self {
            StoreError::RemoteUnavailable(_) => 503,
            StoreError::PermissionDenied(_) => 403,
            StoreError::ConfigurationMissing(_) => 500,
            StoreError::Api { status, .. } => *status,
            StoreError::Parse(_) => 502,
            StoreError::Timeout(_) => 504,
        }
    }
}

impl From<StoreError> for ReservaError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RemoteUnavailable(msg) => ReservaError::HttpError(msg),
            StoreError::PermissionDenied(msg) => ReservaError::AuthError(msg),
            StoreError::ConfigurationMissing(msg) => ReservaError::ConfigError(msg),
            StoreError::Api { status, message } => ReservaError::ExternalServiceError {
                service_name: format!("data store (status {})", status),
                message,
            },
            StoreError::Parse(msg) => ReservaError::ParseError(msg),
            StoreError::Timeout(msg) => ReservaError::TimeoutError(msg),
        }
    }
}

/// Lifecycle states of a booking. A booking is never hard-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bookable offering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRow {
    pub id: Uuid,
    pub name: String,
    /// Session length in minutes.
    pub duration: i64,
}

/// A bookable time instant for one service.
///
/// The stored `available` flag is an optimization hint, not authoritative:
/// true availability is derived from the absence of a confirmed booking plus
/// the weekly-hours filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotRow {
    pub id: Uuid,
    pub service_id: Uuid,
    pub date_time: DateTime<Utc>,
    pub available: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A booking linking a user to a slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub slot_id: Uuid,
    pub service_id: Uuid,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Slot display data embedded in booking listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotInfo {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub service_id: Uuid,
}

/// Service display data embedded in booking listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub id: Uuid,
    pub name: String,
    pub duration: i64,
}

/// A booking joined with its slot and service display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDetailRow {
    #[serde(flatten)]
    pub booking: BookingRow,
    /// Embedded slot row, keyed by its collection name on the wire.
    #[serde(rename = "slots")]
    pub slot: Option<SlotInfo>,
    /// Embedded service row, keyed by its collection name on the wire.
    #[serde(rename = "services")]
    pub service: Option<ServiceInfo>,
}

/// Insert payload for a new booking.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub slot_id: Uuid,
    pub service_id: Uuid,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a generated slot.
#[derive(Debug, Clone, Serialize)]
pub struct NewSlot {
    pub service_id: Uuid,
    pub date_time: DateTime<Utc>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

/// A trait for the hosted booking store.
///
/// Methods mirror the row-level query surface the booking operations need:
/// equality/range filtered reads, embedded joins for display data, and
/// duplicate-aware conditional writes.
pub trait BookingStore: Send + Sync {
    /// All services ordered by name, optionally truncated.
    fn fetch_services(&self, limit: Option<u32>) -> BoxFuture<'_, Vec<ServiceRow>, StoreError>;

    /// A single service by id, if present.
    fn fetch_service(&self, id: Uuid) -> BoxFuture<'_, Option<ServiceRow>, StoreError>;

    /// Slots for a service with `available = true` inside [from, to],
    /// ordered by time.
    fn fetch_open_slots(
        &self,
        service_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<SlotRow>, StoreError>;

    /// A single slot by id, if present.
    fn fetch_slot(&self, id: Uuid) -> BoxFuture<'_, Option<SlotRow>, StoreError>;

    /// Confirmed bookings referencing any of the given slots.
    fn fetch_confirmed_bookings_for_slots<'a>(
        &'a self,
        slot_ids: &'a [Uuid],
    ) -> BoxFuture<'a, Vec<BookingRow>, StoreError>;

    /// A user's bookings in any of the given states, joined with slot and
    /// service display data, newest first.
    fn fetch_user_bookings<'a>(
        &'a self,
        user_id: Uuid,
        statuses: &'a [BookingStatus],
    ) -> BoxFuture<'a, Vec<BookingDetailRow>, StoreError>;

    /// A booking by id restricted to its owner, if both match.
    fn fetch_user_booking(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> BoxFuture<'_, Option<BookingRow>, StoreError>;

    /// Conditionally insert a booking: the write is ignored when a confirmed
    /// booking already references the slot, in which case `None` is returned.
    fn insert_booking_if_slot_free(
        &self,
        booking: NewBooking,
    ) -> BoxFuture<'_, Option<BookingRow>, StoreError>;

    /// Update a booking's status, returning the updated row if it exists.
    fn set_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> BoxFuture<'_, Option<BookingRow>, StoreError>;

    /// Batch-insert generated slots, ignoring rows that collide on the
    /// (service_id, date_time) uniqueness key. Returns the rows actually
    /// inserted.
    fn upsert_slots(&self, slots: Vec<NewSlot>) -> BoxFuture<'_, Vec<SlotRow>, StoreError>;

    /// Every booking with embedded display data, optionally filtered by
    /// status, newest first.
    fn fetch_all_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> BoxFuture<'_, Vec<BookingDetailRow>, StoreError>;
}
