// File: crates/reserva_booking/src/handlers.rs
use crate::admin::{
    booking_stats, list_all_bookings, update_booking_status, AdminBookingsQuery,
    AllBookingsResponse, BookingStats, StatusUpdateResponse, UpdateBookingStatusRequest,
};
use crate::error::BookingError;
use crate::hours::WeeklyHours;
use crate::logic::{
    bootstrap_booking_system, cancel_booking, create_booking, generate_slots, list_available_slots,
    list_services, list_user_bookings, AvailabilityQuery, AvailableSlotsResponse,
    BookingResponse, BootstrapResponse, CancellationResponse, CreateBookingRequest,
    GenerateSlotsRequest, ServicesResponse, SlotGenerationResponse, UserBookingsResponse,
};
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{Json, Response},
};
use chrono::{NaiveDate, TimeZone, Utc};
use reserva_common::{map_json_error, ReservaError};
use reserva_config::AppConfig;
use reserva_supabase::{AuthMessage, AuthUser, Session, SignUpOutcome, SupabaseClient, SupabaseStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Deadline for the bootstrap catalog probe when none is configured.
const DEFAULT_BOOTSTRAP_TIMEOUT_SECS: u64 = 10;

// Define shared state needed by booking handlers
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub supabase: Arc<SupabaseClient>,
    pub hours: WeeklyHours,
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}

/// Per-request store and identity. A caller-supplied bearer token scopes both
/// the identity and the storage policy to that caller; without one the shared
/// client session (widget-style embedding) is used.
async fn resolve_caller(
    state: &BookingState,
    headers: &HeaderMap,
) -> (SupabaseStore, Option<AuthUser>) {
    match bearer_token(headers) {
        Some(token) => {
            let user = state.supabase.fetch_user(&token).await.ok();
            (
                SupabaseStore::for_token(state.supabase.clone(), Some(token)),
                user,
            )
        }
        None => (
            SupabaseStore::new(state.supabase.clone()),
            state.supabase.current_user().await,
        ),
    }
}

// --- Catalog & availability ---

/// Handler to list the service catalog.
#[axum::debug_handler]
pub async fn list_services_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
) -> Result<Json<ServicesResponse>, BookingError> {
    let (store, _) = resolve_caller(&state, &headers).await;
    Ok(Json(list_services(&store).await?))
}

/// Handler to get available time slots.
#[axum::debug_handler]
pub async fn get_available_slots_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailableSlotsResponse>, BookingError> {
    let start_naive_date = NaiveDate::parse_from_str(&query.start_date, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidRequest("start_date must be YYYY-MM-DD".to_string()))?;
    let end_naive_date = NaiveDate::parse_from_str(&query.end_date, "%Y-%m-%d")
        .map_err(|_| BookingError::InvalidRequest("end_date must be YYYY-MM-DD".to_string()))?;
    if end_naive_date < start_naive_date {
        return Err(BookingError::InvalidRequest(
            "end_date must not precede start_date".to_string(),
        ));
    }

    // Cover the end date completely
    let from = Utc.from_utc_datetime(&start_naive_date.and_hms_opt(0, 0, 0).unwrap());
    let to = Utc.from_utc_datetime(&end_naive_date.and_hms_opt(23, 59, 59).unwrap());

    let (store, _) = resolve_caller(&state, &headers).await;
    let response =
        list_available_slots(&store, &state.hours, query.service_id, from, to).await?;
    Ok(Json(response))
}

// --- Bookings ---

/// Handler to create a booking for the signed-in user.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 200, description = "Booking confirmed", body = BookingResponse),
        (status = 401, description = "Not signed in"),
        (status = 409, description = "Slot unavailable, already booked, or trial already used")
    ),
    tag = "Bookings"
))]
pub async fn create_booking_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, BookingError> {
    let (store, user) = resolve_caller(&state, &headers).await;
    Ok(Json(create_booking(&store, user.as_ref(), payload).await?))
}

/// Handler to list the signed-in user's confirmed bookings.
#[axum::debug_handler]
pub async fn list_user_bookings_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
) -> Result<Json<UserBookingsResponse>, BookingError> {
    let (store, user) = resolve_caller(&state, &headers).await;
    Ok(Json(list_user_bookings(&store, user.as_ref()).await?))
}

/// Handler to cancel a booking owned by the signed-in user.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/bookings/{booking_id}",
    responses(
        (status = 200, description = "Booking cancelled", body = CancellationResponse),
        (status = 404, description = "Booking absent or owned by another user")
    ),
    tag = "Bookings"
))]
pub async fn cancel_booking_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<CancellationResponse>, BookingError> {
    let (store, user) = resolve_caller(&state, &headers).await;
    Ok(Json(
        cancel_booking(&store, user.as_ref(), booking_id).await?,
    ))
}

/// Handler for the widget's startup probe: find the default service under a
/// fixed deadline.
#[axum::debug_handler]
pub async fn bootstrap_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
) -> Result<Json<BootstrapResponse>, BookingError> {
    let deadline = state
        .config
        .booking
        .as_ref()
        .and_then(|b| b.bootstrap_timeout_secs)
        .unwrap_or(DEFAULT_BOOTSTRAP_TIMEOUT_SECS);
    let (store, _) = resolve_caller(&state, &headers).await;
    Ok(Json(
        bootstrap_booking_system(&store, Duration::from_secs(deadline)).await?,
    ))
}

// --- Administration ---

/// Handler to bulk-generate slots over a date range. Admin-gated.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/admin/slots/generate",
    request_body = GenerateSlotsRequest,
    responses(
        (status = 200, description = "Slots generated (duplicates ignored)", body = SlotGenerationResponse),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "Admin"
))]
pub async fn generate_slots_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
    Json(payload): Json<GenerateSlotsRequest>,
) -> Result<Json<SlotGenerationResponse>, BookingError> {
    let (store, user) = resolve_caller(&state, &headers).await;
    if !crate::admin::is_admin(&state.config, user.as_ref()) {
        return Err(BookingError::NotAuthorized);
    }
    Ok(Json(generate_slots(&store, &state.hours, payload).await?))
}

/// Handler to list every booking in the system. Admin-gated.
#[axum::debug_handler]
pub async fn admin_bookings_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
    Query(query): Query<AdminBookingsQuery>,
) -> Result<Json<AllBookingsResponse>, BookingError> {
    let (store, user) = resolve_caller(&state, &headers).await;
    Ok(Json(
        list_all_bookings(&store, &state.config, user.as_ref(), query).await?,
    ))
}

/// Handler for the admin dashboard counters.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/admin/stats",
    responses(
        (status = 200, description = "Booking statistics", body = BookingStats),
        (status = 403, description = "Caller is not an admin")
    ),
    tag = "Admin"
))]
pub async fn admin_stats_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
) -> Result<Json<BookingStats>, BookingError> {
    let (store, user) = resolve_caller(&state, &headers).await;
    Ok(Json(
        booking_stats(&store, &state.config, user.as_ref(), Utc::now()).await?,
    ))
}

/// Handler for admin-driven status transitions.
#[axum::debug_handler]
pub async fn update_booking_status_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
    Path(booking_id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<Json<StatusUpdateResponse>, BookingError> {
    let (store, user) = resolve_caller(&state, &headers).await;
    Ok(Json(
        update_booking_status(&store, &state.config, user.as_ref(), booking_id, payload).await?,
    ))
}

// --- Session & identity ---

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct EmailRequest {
    pub email: String,
    /// Where the mailed link should send the user back to.
    pub redirect_to: Option<String>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ChangePasswordRequest {
    pub new_password: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AuthCallbackRequest {
    /// URL fragment the auth redirect landed with, e.g.
    /// "#access_token=…&type=recovery".
    pub fragment: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SessionResponse {
    pub success: bool,
    pub message: String,
    pub session: Session,
}

#[derive(Serialize, Debug)]
pub struct CurrentSessionResponse {
    pub authenticated: bool,
    pub user: Option<AuthUser>,
}

#[derive(Serialize, Debug)]
pub struct AuthCallbackResponse {
    pub authenticated: bool,
    /// Fragment the page should rewrite its URL to, when the incoming one
    /// carried tokens or an error.
    pub replace_fragment: Option<String>,
}

/// Handler to register a new account.
#[axum::debug_handler]
pub async fn sign_up_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<AuthMessage>, Response> {
    let result = state
        .supabase
        .sign_up(&payload.email, &payload.password)
        .await
        .map(|outcome| match outcome {
            SignUpOutcome::SessionCreated(_) => AuthMessage::ok("Registro exitoso"),
            SignUpOutcome::ConfirmationRequired(_) => {
                AuthMessage::ok("Registro exitoso. Verifica tu email.")
            }
        });
    map_json_error(result, ReservaError::from)
}

/// Handler to sign in with email and password.
#[axum::debug_handler]
pub async fn sign_in_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<Json<SessionResponse>, Response> {
    let result = state
        .supabase
        .sign_in(&payload.email, &payload.password)
        .await
        .map(|session| SessionResponse {
            success: true,
            message: "Login exitoso".to_string(),
            session,
        });
    map_json_error(result, ReservaError::from)
}

/// Handler to request a passwordless sign-in link.
#[axum::debug_handler]
pub async fn magic_link_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<EmailRequest>,
) -> Result<Json<AuthMessage>, Response> {
    let result = state
        .supabase
        .sign_in_with_magic_link(&payload.email, payload.redirect_to.as_deref())
        .await;
    map_json_error(result, ReservaError::from)
}

/// Handler to send a password-recovery email.
#[axum::debug_handler]
pub async fn password_reset_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<EmailRequest>,
) -> Result<Json<AuthMessage>, Response> {
    let result = state
        .supabase
        .send_password_reset(&payload.email, payload.redirect_to.as_deref())
        .await;
    map_json_error(result, ReservaError::from)
}

/// Handler to sign out the active session.
#[axum::debug_handler]
pub async fn sign_out_handler(
    State(state): State<Arc<BookingState>>,
) -> Result<Json<AuthMessage>, Response> {
    map_json_error(state.supabase.sign_out().await, ReservaError::from)
}

/// Handler to change the signed-in user's password.
#[axum::debug_handler]
pub async fn change_password_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<Json<AuthMessage>, Response> {
    let result = state.supabase.change_password(&payload.new_password).await;
    map_json_error(result, ReservaError::from)
}

/// Handler reporting who is signed in. Fails closed: any identity error
/// yields an anonymous response rather than a failure.
#[axum::debug_handler]
pub async fn current_session_handler(
    State(state): State<Arc<BookingState>>,
    headers: HeaderMap,
) -> Json<CurrentSessionResponse> {
    let user = match bearer_token(&headers) {
        Some(token) => state.supabase.fetch_user(&token).await.ok(),
        None => state.supabase.current_user().await,
    };
    Json(CurrentSessionResponse {
        authenticated: user.is_some(),
        user,
    })
}

/// Handler for the auth redirect callback: consumes recovery tokens or
/// errors from the fragment and reports whether a session is active.
#[axum::debug_handler]
pub async fn auth_callback_handler(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<AuthCallbackRequest>,
) -> Json<AuthCallbackResponse> {
    let initialized = state.supabase.initialize(payload.fragment.as_deref()).await;
    if initialized.replace_fragment.is_some() {
        info!("Auth callback consumed a redirect fragment");
    }
    Json(AuthCallbackResponse {
        authenticated: initialized.session.is_some(),
        replace_fragment: initialized.replace_fragment,
    })
}
