// --- File: crates/reserva_supabase/src/models.rs ---
//! Wire models for the GoTrue auth API and the signals the facade emits
//! towards the embedding interface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user record as returned by the auth service. Accounts are owned by the
/// hosted service; they are never persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_sign_in_at: Option<DateTime<Utc>>,
}

/// An authenticated session: the bearer token pair plus the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

/// Result of a sign-up request. Depending on the project's confirmation
/// settings the service answers with a live session or with a bare user
/// record awaiting email confirmation.
#[derive(Debug, Clone)]
pub enum SignUpOutcome {
    SessionCreated(Session),
    ConfirmationRequired(AuthUser),
}

/// Signals broadcast to the embedding interface.
///
/// Subscribers receive these instead of ambient document events: the page
/// registers interest once via [`crate::SupabaseClient::subscribe`].
#[derive(Debug, Clone, PartialEq)]
pub enum AuthSignal {
    /// A password-recovery link was invalid or expired.
    RecoveryError { message: String },
    /// Recovery tokens were exchanged for a session; the interface should
    /// open its password-change dialog.
    OpenPasswordReset,
}

/// Parameters carried in the URL fragment of an auth redirect callback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecoveryParams {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// Outcome of [`crate::SupabaseClient::initialize`].
#[derive(Debug, Clone)]
pub struct Initialized {
    /// The active session, if any.
    pub session: Option<Session>,
    /// Replacement for the page fragment when the incoming one carried
    /// recovery tokens or an error; no credential may survive in history.
    pub replace_fragment: Option<String>,
}

/// Uniform success payload with a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct AuthMessage {
    pub success: bool,
    pub message: String,
}

impl AuthMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
