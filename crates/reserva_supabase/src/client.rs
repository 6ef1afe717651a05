// --- File: crates/reserva_supabase/src/client.rs ---
//! The Supabase client handle.
//!
//! One `SupabaseClient` is constructed at startup from [`SupabaseConfig`] and
//! shared behind an `Arc`; every operation borrows it explicitly instead of
//! reaching for a lazily-initialized global.

use crate::error::SupabaseError;
use crate::models::{AuthSignal, Session};
use reqwest::Client;
use reserva_common::HTTP_CLIENT;
use reserva_config::SupabaseConfig;
use tokio::sync::{broadcast, RwLock};
use tracing::warn;

/// Capacity of the signal channel; a lagging subscriber drops oldest signals.
const SIGNAL_CHANNEL_CAPACITY: usize = 16;

pub struct SupabaseClient {
    config: SupabaseConfig,
    http: Client,
    session: RwLock<Option<Session>>,
    signals: broadcast::Sender<AuthSignal>,
}

impl SupabaseClient {
    /// Create a new client for the given project.
    pub fn new(config: SupabaseConfig) -> Self {
        let (signals, _) = broadcast::channel(SIGNAL_CHANNEL_CAPACITY);
        Self {
            config,
            http: HTTP_CLIENT.clone(),
            session: RwLock::new(None),
            signals,
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn anon_key(&self) -> &str {
        &self.config.anon_key
    }

    /// URL of an auth (GoTrue) endpoint, e.g. `auth_url("token")`.
    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url.trim_end_matches('/'), path)
    }

    /// URL of a data (PostgREST) collection.
    pub(crate) fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table)
    }

    /// The bearer token for data requests: the signed-in user's access token
    /// when a session is active, the anon key otherwise.
    pub async fn access_token(&self) -> String {
        match self.session.read().await.as_ref() {
            Some(session) => session.access_token.clone(),
            None => self.config.anon_key.clone(),
        }
    }

    /// The cached session, if any.
    pub async fn cached_session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub(crate) async fn store_session(&self, session: Session) {
        *self.session.write().await = Some(session);
    }

    pub(crate) async fn clear_session(&self) {
        *self.session.write().await = None;
    }

    /// Register interest in auth signals (recovery errors, password-reset
    /// prompts). Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthSignal> {
        self.signals.subscribe()
    }

    pub(crate) fn emit(&self, signal: AuthSignal) {
        // Send fails only when nobody is subscribed; the widget may not have
        // attached its listener yet, which is not an error.
        if self.signals.send(signal.clone()).is_err() {
            warn!("Auth signal emitted with no subscribers: {:?}", signal);
        }
    }

    /// Extract a human-readable message from an auth error body; GoTrue uses
    /// several shapes ({msg}, {message}, {error_description}).
    pub(crate) fn auth_error_message(body: &serde_json::Value) -> Option<String> {
        for key in ["msg", "message", "error_description", "error"] {
            if let Some(text) = body.get(key).and_then(|v| v.as_str()) {
                return Some(text.to_string());
            }
        }
        None
    }

    pub(crate) async fn auth_error(response: reqwest::Response) -> SupabaseError {
        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(body_text) => match serde_json::from_str::<serde_json::Value>(&body_text) {
                Ok(json_body) => {
                    Self::auth_error_message(&json_body).unwrap_or(body_text)
                }
                Err(_) => body_text,
            },
            Err(_) => "Unknown auth service error".to_string(),
        };
        SupabaseError::AuthApiError { status, message }
    }
}
