// --- File: crates/reserva_booking/src/doc.rs ---
//! OpenAPI documentation for the booking API (behind the `openapi` feature).

#[cfg(feature = "openapi")]
use utoipa::OpenApi;

#[cfg(feature = "openapi")]
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::create_booking_handler,
        crate::handlers::cancel_booking_handler,
        crate::handlers::generate_slots_handler,
        crate::handlers::admin_stats_handler,
    ),
    components(schemas(
        crate::logic::CreateBookingRequest,
        crate::logic::BookingResponse,
        crate::logic::CancellationResponse,
        crate::logic::GenerateSlotsRequest,
        crate::logic::SlotGenerationResponse,
        crate::admin::BookingStats,
    )),
    tags(
        (name = "Bookings", description = "Appointment booking operations"),
        (name = "Admin", description = "Booking administration")
    )
)]
pub struct BookingApiDoc;
