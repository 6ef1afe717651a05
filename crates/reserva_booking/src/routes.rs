// --- File: crates/reserva_booking/src/routes.rs ---

use crate::handlers::{
    admin_bookings_handler, admin_stats_handler, auth_callback_handler, bootstrap_handler,
    cancel_booking_handler, change_password_handler, create_booking_handler,
    current_session_handler, generate_slots_handler, get_available_slots_handler,
    list_services_handler,
    list_user_bookings_handler, magic_link_handler, password_reset_handler, sign_in_handler,
    sign_out_handler, sign_up_handler, update_booking_status_handler, BookingState,
};
use crate::hours::WeeklyHours;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use reserva_config::AppConfig;
use reserva_supabase::SupabaseClient;
use std::sync::Arc;

/// Creates a router containing all routes for the booking feature.
pub fn routes(config: Arc<AppConfig>, supabase: Arc<SupabaseClient>) -> Router {
    let hours = WeeklyHours::from_config(config.gym.as_ref());
    let state = Arc::new(BookingState {
        config,
        supabase,
        hours,
    });

    Router::new()
        .route("/services", get(list_services_handler))
        .route("/slots", get(get_available_slots_handler))
        .route("/bookings", post(create_booking_handler))
        .route("/bookings", get(list_user_bookings_handler))
        .route("/bookings/{booking_id}", delete(cancel_booking_handler))
        .route("/bootstrap", get(bootstrap_handler))
        .route("/auth/signup", post(sign_up_handler))
        .route("/auth/login", post(sign_in_handler))
        .route("/auth/magic-link", post(magic_link_handler))
        .route("/auth/recover", post(password_reset_handler))
        .route("/auth/logout", post(sign_out_handler))
        .route("/auth/password", patch(change_password_handler))
        .route("/auth/session", get(current_session_handler))
        .route("/auth/callback", post(auth_callback_handler))
        .route("/admin/bookings", get(admin_bookings_handler))
        .route(
            "/admin/bookings/{booking_id}/status",
            patch(update_booking_status_handler),
        )
        .route("/admin/stats", get(admin_stats_handler))
        .route("/admin/slots/generate", post(generate_slots_handler))
        .with_state(state)
}
