// --- File: crates/reserva_booking/src/admin.rs ---
//! Booking administration operations.
//!
//! The allow-list is evaluated here, on the server side of the widget, and
//! admin storage calls still carry the caller's own bearer token so the
//! store's row-level security stays the enforcement boundary. The list is an
//! interface hint, never the sole access control.

use crate::error::BookingError;
use chrono::{DateTime, Duration, Utc};
use reserva_common::services::{BookingDetailRow, BookingStatus, BookingStore};
use reserva_config::AppConfig;
use reserva_supabase::AuthUser;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// True iff the user's email (case-insensitive) is in the configured
/// allow-list. No user or no list means no admin.
pub fn is_admin(config: &AppConfig, user: Option<&AuthUser>) -> bool {
    let Some(email) = user.and_then(|u| u.email.as_deref()) else {
        return false;
    };
    let email = email.to_lowercase();
    config
        .admin
        .as_ref()
        .map(|admin| admin.emails.iter().any(|allowed| allowed.to_lowercase() == email))
        .unwrap_or(false)
}

#[derive(Deserialize, Debug, Default)]
pub struct AdminBookingsQuery {
    /// Restrict the listing to one status.
    #[serde(default)]
    pub status: Option<BookingStatus>,
}

#[derive(Serialize, Debug)]
pub struct AllBookingsResponse {
    pub bookings: Vec<BookingDetailRow>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingStats {
    pub total: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub completed: usize,
    /// Bookings created in the trailing seven days.
    pub this_week: usize,
    /// Confirmed bookings whose slot lies in the future.
    pub upcoming: usize,
}

#[derive(Deserialize, Debug)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct StatusUpdateResponse {
    pub success: bool,
    pub message: String,
}

/// Every booking in the system, optionally filtered by status, newest first.
pub async fn list_all_bookings(
    store: &dyn BookingStore,
    config: &AppConfig,
    user: Option<&AuthUser>,
    query: AdminBookingsQuery,
) -> Result<AllBookingsResponse, BookingError> {
    if !is_admin(config, user) {
        return Err(BookingError::NotAuthorized);
    }
    let bookings = store.fetch_all_bookings(query.status).await?;
    debug!("Admin listing returned {} bookings", bookings.len());
    Ok(AllBookingsResponse { bookings })
}

/// Derive the admin dashboard counters from a bookings listing. Pure.
pub fn compute_stats(bookings: &[BookingDetailRow], now: DateTime<Utc>) -> BookingStats {
    let week_ago = now - Duration::days(7);
    BookingStats {
        total: bookings.len(),
        confirmed: bookings
            .iter()
            .filter(|b| b.booking.status == BookingStatus::Confirmed)
            .count(),
        cancelled: bookings
            .iter()
            .filter(|b| b.booking.status == BookingStatus::Cancelled)
            .count(),
        completed: bookings
            .iter()
            .filter(|b| b.booking.status == BookingStatus::Completed)
            .count(),
        this_week: bookings
            .iter()
            .filter(|b| b.booking.created_at >= week_ago)
            .count(),
        upcoming: bookings
            .iter()
            .filter(|b| {
                b.booking.status == BookingStatus::Confirmed
                    && b.slot
                        .as_ref()
                        .map(|slot| slot.date_time >= now)
                        .unwrap_or(false)
            })
            .count(),
    }
}

/// Booking statistics for the admin dashboard.
pub async fn booking_stats(
    store: &dyn BookingStore,
    config: &AppConfig,
    user: Option<&AuthUser>,
    now: DateTime<Utc>,
) -> Result<BookingStats, BookingError> {
    if !is_admin(config, user) {
        return Err(BookingError::NotAuthorized);
    }
    let bookings = store.fetch_all_bookings(None).await?;
    Ok(compute_stats(&bookings, now))
}

/// Admin-driven status transition, bypassing the ownership check.
pub async fn update_booking_status(
    store: &dyn BookingStore,
    config: &AppConfig,
    user: Option<&AuthUser>,
    booking_id: Uuid,
    request: UpdateBookingStatusRequest,
) -> Result<StatusUpdateResponse, BookingError> {
    if !is_admin(config, user) {
        return Err(BookingError::NotAuthorized);
    }

    match store.set_booking_status(booking_id, request.status).await? {
        Some(updated) => {
            info!("Booking {} moved to {}", updated.id, updated.status);
            Ok(StatusUpdateResponse {
                success: true,
                message: "Estado actualizado".to_string(),
            })
        }
        None => Err(BookingError::NotFoundOrForbidden),
    }
}
