// --- File: crates/reserva_booking/src/logic.rs ---
use crate::error::BookingError;
use crate::hours::WeeklyHours;
use chrono::{DateTime, Datelike, Duration as ChronoDuration, LocalResult, NaiveDate, TimeZone, Utc};
use reserva_common::services::{
    BookingDetailRow, BookingStatus, BookingStore, NewBooking, NewSlot, ServiceRow, SlotRow,
};
use reserva_supabase::AuthUser;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Statuses that consume the one-trial-per-user allowance. A cancelled trial
/// booking frees the allowance again.
const TRIAL_CONSUMING_STATUSES: [BookingStatus; 2] =
    [BookingStatus::Confirmed, BookingStatus::Completed];

// --- Data Structures ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    pub service_id: Uuid,

    /// Start date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2024-06-03"))]
    pub start_date: String,

    /// End date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2024-06-09"))]
    pub end_date: String,
}

#[derive(Serialize, Debug)]
pub struct ServicesResponse {
    pub services: Vec<ServiceRow>,
}

#[derive(Serialize, Debug)]
pub struct AvailableSlotsResponse {
    pub slots: Vec<SlotRow>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateBookingRequest {
    pub service_id: Uuid,
    pub slot_id: Uuid,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    pub booking_id: Option<Uuid>,
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct UserBookingsResponse {
    pub bookings: Vec<BookingDetailRow>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CancellationResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct GenerateSlotsRequest {
    pub service_id: Uuid,
    /// First day to generate, YYYY-MM-DD.
    pub start_date: NaiveDate,
    /// Last day to generate (inclusive), YYYY-MM-DD.
    pub end_date: NaiveDate,
    /// Session length the slots are generated for; defaults to one hour.
    pub duration_minutes: Option<i64>,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SlotGenerationResponse {
    pub success: bool,
    /// Slots planned over the range.
    pub planned: usize,
    /// Slots actually inserted; regenerating an overlapping range inserts
    /// fewer rows than it plans.
    pub created: usize,
    pub message: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BootstrapResponse {
    pub service_id: Uuid,
    pub service_name: String,
}

// --- Trial detection ---

/// Whether a service name marks the one-per-user trial/gift offering.
pub fn is_trial_service(name: &str) -> bool {
    let name = name.to_lowercase();
    name.contains("prueba") || name.contains("regalo")
}

/// Whether any booking in the listing consumed the trial allowance.
fn has_trial_booking(history: &[BookingDetailRow]) -> bool {
    history.iter().any(|detail| {
        detail
            .service
            .as_ref()
            .map(|service| is_trial_service(&service.name))
            .unwrap_or(false)
    })
}

// --- Catalog ---

/// All services ordered by name. An empty catalog is a success, not an
/// error; the distinct store failure kinds pass through untouched.
pub async fn list_services(store: &dyn BookingStore) -> Result<ServicesResponse, BookingError> {
    let services = store.fetch_services(None).await?;
    debug!("Fetched {} services", services.len());
    Ok(ServicesResponse { services })
}

// --- Availability ---

/// Derived availability: drop slots referenced by a confirmed booking, then
/// drop slots outside the weekly opening hours. The stored `available` flag
/// already restricted the fetch but is never trusted on its own.
pub fn filter_bookable_slots(
    slots: Vec<SlotRow>,
    confirmed: &[reserva_common::services::BookingRow],
    hours: &WeeklyHours,
) -> Vec<SlotRow> {
    let booked: HashSet<Uuid> = confirmed.iter().map(|b| b.slot_id).collect();
    slots
        .into_iter()
        .filter(|slot| !booked.contains(&slot.id) && hours.is_open_at(slot.date_time))
        .collect()
}

/// Slots a user can actually book for a service within [from, to].
pub async fn list_available_slots(
    store: &dyn BookingStore,
    hours: &WeeklyHours,
    service_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<AvailableSlotsResponse, BookingError> {
    let slots = store.fetch_open_slots(service_id, from, to).await?;
    if slots.is_empty() {
        return Ok(AvailableSlotsResponse { slots });
    }

    let slot_ids: Vec<Uuid> = slots.iter().map(|slot| slot.id).collect();
    let confirmed = store.fetch_confirmed_bookings_for_slots(&slot_ids).await?;

    let slots = filter_bookable_slots(slots, &confirmed, hours);
    debug!(
        "{} bookable slots remain for service {}",
        slots.len(),
        service_id
    );
    Ok(AvailableSlotsResponse { slots })
}

// --- Booking creation (the correctness-sensitive path) ---

/// Create a confirmed booking for the signed-in user.
///
/// The slot and confirmed-booking prechecks are best-effort fast-fails; the
/// write itself is conditional on the storage-side uniqueness constraint, so
/// two racing requests cannot both obtain a confirmed booking. The stored
/// `available` flag is left untouched after the insert.
pub async fn create_booking(
    store: &dyn BookingStore,
    user: Option<&AuthUser>,
    request: CreateBookingRequest,
) -> Result<BookingResponse, BookingError> {
    let user = user.ok_or(BookingError::Unauthenticated)?;

    let is_trial = match store.fetch_service(request.service_id).await? {
        Some(service) => is_trial_service(&service.name),
        None => false,
    };
    if is_trial {
        let history = store
            .fetch_user_bookings(user.id, &TRIAL_CONSUMING_STATUSES)
            .await?;
        if has_trial_booking(&history) {
            return Err(BookingError::TrialAlreadyUsed);
        }
    }

    let slot = store.fetch_slot(request.slot_id).await?;
    let slot = match slot {
        Some(slot) if slot.available => slot,
        _ => return Err(BookingError::SlotUnavailable),
    };

    let existing = store
        .fetch_confirmed_bookings_for_slots(&[request.slot_id])
        .await?;
    if !existing.is_empty() {
        return Err(BookingError::SlotAlreadyBooked);
    }

    let inserted = store
        .insert_booking_if_slot_free(NewBooking {
            user_id: user.id,
            slot_id: slot.id,
            service_id: request.service_id,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        })
        .await?;

    match inserted {
        Some(booking) => {
            info!("Booking {} created for slot {}", booking.id, slot.id);
            Ok(BookingResponse {
                success: true,
                booking_id: Some(booking.id),
                message: "Reserva confirmada exitosamente".to_string(),
            })
        }
        // Another request won the slot between the precheck and the write.
        None => Err(BookingError::SlotAlreadyBooked),
    }
}

// --- Booking lifecycle ---

/// The signed-in user's confirmed bookings, newest first, with slot and
/// service display data.
pub async fn list_user_bookings(
    store: &dyn BookingStore,
    user: Option<&AuthUser>,
) -> Result<UserBookingsResponse, BookingError> {
    let user = user.ok_or(BookingError::Unauthenticated)?;
    let bookings = store
        .fetch_user_bookings(user.id, &[BookingStatus::Confirmed])
        .await?;
    Ok(UserBookingsResponse { bookings })
}

/// Cancel a booking owned by the signed-in user (soft delete).
pub async fn cancel_booking(
    store: &dyn BookingStore,
    user: Option<&AuthUser>,
    booking_id: Uuid,
) -> Result<CancellationResponse, BookingError> {
    let user = user.ok_or(BookingError::Unauthenticated)?;

    // Ownership check before any mutation
    let booking = store
        .fetch_user_booking(booking_id, user.id)
        .await?
        .ok_or(BookingError::NotFoundOrForbidden)?;

    match store
        .set_booking_status(booking.id, BookingStatus::Cancelled)
        .await?
    {
        Some(_) => Ok(CancellationResponse {
            success: true,
            message: "Reserva cancelada exitosamente".to_string(),
        }),
        None => Err(BookingError::NotFoundOrForbidden),
    }
}

// --- Slot generation ---

/// Plan one slot per whole hour inside the open interval of each configured
/// day in [start_date, end_date]. Pure; the write happens in
/// [`generate_slots`].
pub fn plan_slots(
    hours: &WeeklyHours,
    service_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Vec<NewSlot> {
    let tz = hours.time_zone();
    let created_at = Utc::now();
    let mut slots = Vec::new();
    let mut date = start_date;

    while date <= end_date {
        if let Some(day) = hours.hours_for(date.weekday()) {
            for hour in day.open..day.close {
                let local = match tz.with_ymd_and_hms(date.year(), date.month(), date.day(), hour, 0, 0)
                {
                    LocalResult::Single(dt) => dt,
                    LocalResult::Ambiguous(dt, _) => dt,
                    // Skipped by a DST transition; no slot exists at this hour.
                    LocalResult::None => continue,
                };
                slots.push(NewSlot {
                    service_id,
                    date_time: local.with_timezone(&Utc),
                    available: true,
                    created_at,
                });
            }
        }
        date += ChronoDuration::days(1);
    }
    slots
}

/// Generate slots for a service over a date range, honoring the weekly
/// hours. Idempotent: the batch write ignores rows colliding on the
/// (service_id, date_time) uniqueness key.
pub async fn generate_slots(
    store: &dyn BookingStore,
    hours: &WeeklyHours,
    request: GenerateSlotsRequest,
) -> Result<SlotGenerationResponse, BookingError> {
    let duration_minutes = request.duration_minutes.unwrap_or(60);
    if duration_minutes <= 0 {
        return Err(BookingError::InvalidRequest(
            "duration_minutes must be positive".to_string(),
        ));
    }
    if request.end_date < request.start_date {
        return Err(BookingError::InvalidRequest(
            "end_date must not precede start_date".to_string(),
        ));
    }

    let planned = plan_slots(hours, request.service_id, request.start_date, request.end_date);
    if planned.is_empty() {
        return Ok(SlotGenerationResponse {
            success: true,
            planned: 0,
            created: 0,
            message: "No hay slots para generar en el rango especificado".to_string(),
        });
    }

    let planned_count = planned.len();
    let inserted = store.upsert_slots(planned).await?;
    info!(
        "Planned {} slots for service {}, inserted {}",
        planned_count,
        request.service_id,
        inserted.len()
    );
    Ok(SlotGenerationResponse {
        success: true,
        planned: planned_count,
        created: inserted.len(),
        message: format!("{} slots generados exitosamente", planned_count),
    })
}

// --- Bootstrap ---

/// Locate the service the widget should offer by default, under a fixed
/// wall-clock deadline. Prefers the trial/gift offering, falls back to the
/// first service; an empty catalog means the deployment still needs
/// provisioning.
pub async fn bootstrap_booking_system(
    store: &dyn BookingStore,
    deadline: Duration,
) -> Result<BootstrapResponse, BookingError> {
    let services = tokio::time::timeout(deadline, store.fetch_services(Some(5)))
        .await
        .map_err(|_| {
            reserva_common::services::StoreError::Timeout(
                "La consulta tardó demasiado".to_string(),
            )
        })??;

    if services.is_empty() {
        return Err(BookingError::CatalogEmpty);
    }

    let service = services
        .iter()
        .find(|service| is_trial_service(&service.name))
        .unwrap_or(&services[0]);
    info!("Bootstrap selected service '{}'", service.name);
    Ok(BootstrapResponse {
        service_id: service.id,
        service_name: service.name.clone(),
    })
}
