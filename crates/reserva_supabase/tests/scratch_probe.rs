use std::sync::Arc;
use chrono::Utc;
use reserva_common::services::{BookingStatus, BookingStore, NewBooking};
use reserva_config::SupabaseConfig;
use reserva_supabase::{SupabaseClient, SupabaseStore};
use uuid::Uuid;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn probe() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    let client = Arc::new(SupabaseClient::new(SupabaseConfig {
        url: server.uri(),
        anon_key: "anon-test-key".to_string(),
    }));
    let store = SupabaseStore::new(client);
    let _ = store
        .insert_booking_if_slot_free(NewBooking {
            user_id: Uuid::new_v4(),
            slot_id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        })
        .await;
    let reqs = server.received_requests().await.unwrap();
    for r in reqs {
        eprintln!("URL: {}", r.url);
        for (k, v) in r.headers.iter() {
            eprintln!("HEADER {}: {:?}", k, v);
        }
    }
}
