// --- File: crates/reserva_supabase/src/store.rs ---
//! [`BookingStore`] implementation over the hosted data API.
//!
//! The double-booking guard lives here: booking inserts are conditional on a
//! storage-side partial unique index
//! `bookings_one_confirmed_per_slot ON bookings (slot_id) WHERE status = 'confirmed'`,
//! combined with `on_conflict=slot_id` and duplicate-ignoring resolution. A
//! losing writer gets an empty representation back instead of a row.

use crate::client::SupabaseClient;
use crate::rest::RestRequest;
use chrono::{DateTime, Utc};
use reserva_common::services::{
    BookingDetailRow, BookingRow, BookingStatus, BookingStore, BoxFuture, NewBooking, NewSlot,
    ServiceRow, SlotRow, StoreError,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Columns fetched when booking rows are listed with display data.
const BOOKING_DETAIL_COLUMNS: &str = "*,slots(id,date_time,service_id),services(id,name,duration)";

pub struct SupabaseStore {
    client: Arc<SupabaseClient>,
    access_token: Option<String>,
}

impl SupabaseStore {
    /// Store bound to the client's own session (widget-style usage).
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self {
            client,
            access_token: None,
        }
    }

    /// Store bound to a caller-supplied bearer token, so storage-side
    /// row-level security applies to that caller rather than to the shared
    /// session.
    pub fn for_token(client: Arc<SupabaseClient>, access_token: Option<String>) -> Self {
        Self {
            client,
            access_token,
        }
    }

    fn request(&self, table: &str) -> RestRequest<'_> {
        let request = self.client.from_table(table);
        match &self.access_token {
            Some(token) => request.auth(token.clone()),
            None => request,
        }
    }
}

impl BookingStore for SupabaseStore {
    fn fetch_services(&self, limit: Option<u32>) -> BoxFuture<'_, Vec<ServiceRow>, StoreError> {
        Box::pin(async move {
            let mut request = self.request("services").select("*").order("name");
            if let Some(limit) = limit {
                request = request.limit(limit);
            }
            Ok(request.fetch().await?)
        })
    }

    fn fetch_service(&self, id: Uuid) -> BoxFuture<'_, Option<ServiceRow>, StoreError> {
        Box::pin(async move {
            let rows: Vec<ServiceRow> = self
                .request("services")
                .select("*")
                .eq("id", id)
                .limit(1)
                .fetch()
                .await?;
            Ok(rows.into_iter().next())
        })
    }

    fn fetch_open_slots(
        &self,
        service_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<SlotRow>, StoreError> {
        Box::pin(async move {
            let rows = self
                .request("slots")
                .select("*")
                .eq("service_id", service_id)
                .eq("available", true)
                .gte("date_time", from.to_rfc3339())
                .lte("date_time", to.to_rfc3339())
                .order("date_time")
                .fetch()
                .await?;
            Ok(rows)
        })
    }

    fn fetch_slot(&self, id: Uuid) -> BoxFuture<'_, Option<SlotRow>, StoreError> {
        Box::pin(async move {
            let rows: Vec<SlotRow> = self
                .request("slots")
                .select("*")
                .eq("id", id)
                .limit(1)
                .fetch()
                .await?;
            Ok(rows.into_iter().next())
        })
    }

    fn fetch_confirmed_bookings_for_slots<'a>(
        &'a self,
        slot_ids: &'a [Uuid],
    ) -> BoxFuture<'a, Vec<BookingRow>, StoreError> {
        Box::pin(async move {
            if slot_ids.is_empty() {
                return Ok(Vec::new());
            }
            let rows = self
                .request("bookings")
                .select("*")
                .eq("status", BookingStatus::Confirmed)
                .in_list("slot_id", slot_ids.iter())
                .fetch()
                .await?;
            Ok(rows)
        })
    }

    fn fetch_user_bookings<'a>(
        &'a self,
        user_id: Uuid,
        statuses: &'a [BookingStatus],
    ) -> BoxFuture<'a, Vec<BookingDetailRow>, StoreError> {
        Box::pin(async move {
            let rows = self
                .request("bookings")
                .select(BOOKING_DETAIL_COLUMNS)
                .eq("user_id", user_id)
                .in_list("status", statuses.iter())
                .order_desc("created_at")
                .fetch()
                .await?;
            Ok(rows)
        })
    }

    fn fetch_user_booking(
        &self,
        booking_id: Uuid,
        user_id: Uuid,
    ) -> BoxFuture<'_, Option<BookingRow>, StoreError> {
        Box::pin(async move {
            let rows: Vec<BookingRow> = self
                .request("bookings")
                .select("*")
                .eq("id", booking_id)
                .eq("user_id", user_id)
                .limit(1)
                .fetch()
                .await?;
            Ok(rows.into_iter().next())
        })
    }

    fn insert_booking_if_slot_free(
        &self,
        booking: NewBooking,
    ) -> BoxFuture<'_, Option<BookingRow>, StoreError> {
        Box::pin(async move {
            let inserted: Vec<BookingRow> = self
                .request("bookings")
                .on_conflict("slot_id")
                .ignore_duplicates()
                .insert(&[booking])
                .await?;
            if inserted.is_empty() {
                debug!("Conditional booking insert lost the slot race");
            }
            Ok(inserted.into_iter().next())
        })
    }

    fn set_booking_status(
        &self,
        booking_id: Uuid,
        status: BookingStatus,
    ) -> BoxFuture<'_, Option<BookingRow>, StoreError> {
        Box::pin(async move {
            let updated: Vec<BookingRow> = self
                .request("bookings")
                .eq("id", booking_id)
                .update(&serde_json::json!({
                    "status": status,
                    "updated_at": Utc::now().to_rfc3339(),
                }))
                .await?;
            Ok(updated.into_iter().next())
        })
    }

    fn upsert_slots(&self, slots: Vec<NewSlot>) -> BoxFuture<'_, Vec<SlotRow>, StoreError> {
        Box::pin(async move {
            let inserted = self
                .request("slots")
                .on_conflict("service_id,date_time")
                .ignore_duplicates()
                .insert(&slots)
                .await?;
            Ok(inserted)
        })
    }

    fn fetch_all_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> BoxFuture<'_, Vec<BookingDetailRow>, StoreError> {
        Box::pin(async move {
            let mut request = self
                .request("bookings")
                .select(BOOKING_DETAIL_COLUMNS)
                .order_desc("created_at");
            if let Some(status) = status {
                request = request.eq("status", status);
            }
            Ok(request.fetch().await?)
        })
    }
}
