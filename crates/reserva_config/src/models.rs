// --- File: crates/reserva_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Supabase Config ---
// Holds the project URL and the anon key. The anon key may be set to the
// "secret_from_env" marker and resolved from SUPABASE_ANON_KEY at load time.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

// --- Gym opening hours ---
// A day absent from the table is a closed day. Hours are whole-hour
// boundaries; the open interval is [open, close).
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct DayHours {
    pub open: u32,
    pub close: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GymHoursConfig {
    #[serde(default)]
    pub mon: Option<DayHours>,
    #[serde(default)]
    pub tue: Option<DayHours>,
    #[serde(default)]
    pub wed: Option<DayHours>,
    #[serde(default)]
    pub thu: Option<DayHours>,
    #[serde(default)]
    pub fri: Option<DayHours>,
    #[serde(default)]
    pub sat: Option<DayHours>,
    #[serde(default)]
    pub sun: Option<DayHours>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GymConfig {
    /// IANA zone the opening hours are expressed in. Defaults to UTC.
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub hours: GymHoursConfig,
}

// --- Administration ---
// Allow-listed emails may use the admin endpoints. This list is an interface
// hint; storage-side row-level security stays the enforcement boundary.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AdminConfig {
    #[serde(default)]
    pub emails: Vec<String>,
}

// --- Booking Config ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct BookingConfig {
    pub slot_duration_minutes: Option<i64>,
    pub bootstrap_timeout_secs: Option<u64>,
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_supabase: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub supabase: Option<SupabaseConfig>,
    #[serde(default)]
    pub gym: Option<GymConfig>,
    #[serde(default)]
    pub admin: Option<AdminConfig>,
    #[serde(default)]
    pub booking: Option<BookingConfig>,
}
