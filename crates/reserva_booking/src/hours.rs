// --- File: crates/reserva_booking/src/hours.rs ---
//! The gym's weekly opening hours.
//!
//! Static configuration, immutable at runtime. A day absent from the table is
//! closed; an open day covers the half-open interval [open, close) in whole
//! hours, evaluated in the configured time zone.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use reserva_config::GymConfig;
use std::str::FromStr;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenHours {
    pub open: u32,
    pub close: u32,
}

#[derive(Debug, Clone)]
pub struct WeeklyHours {
    /// Indexed by days-from-Monday.
    days: [Option<OpenHours>; 7],
    tz: Tz,
}

fn day_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

impl Default for WeeklyHours {
    /// The gym's published schedule: weekdays 06–22, Saturday 08–14,
    /// Sunday closed.
    fn default() -> Self {
        let weekday = Some(OpenHours { open: 6, close: 22 });
        Self {
            days: [
                weekday,
                weekday,
                weekday,
                weekday,
                weekday,
                Some(OpenHours { open: 8, close: 14 }),
                None,
            ],
            tz: chrono_tz::UTC,
        }
    }
}

impl WeeklyHours {
    /// A table with every day closed; days are added with [`WeeklyHours::set`].
    pub fn empty(tz: Tz) -> Self {
        Self {
            days: [None; 7],
            tz,
        }
    }

    /// Build the table from configuration, falling back to the published
    /// schedule when no gym section is present. Invalid intervals are dropped
    /// (the day stays closed) rather than aborting startup.
    pub fn from_config(gym: Option<&GymConfig>) -> Self {
        let Some(gym) = gym else {
            return Self::default();
        };

        let tz = match gym.time_zone.as_deref() {
            Some(name) => Tz::from_str(name).unwrap_or_else(|_| {
                warn!("Unknown gym time zone '{}', falling back to UTC", name);
                chrono_tz::UTC
            }),
            None => chrono_tz::UTC,
        };

        let mut hours = Self::empty(tz);
        let table = [
            (Weekday::Mon, gym.hours.mon),
            (Weekday::Tue, gym.hours.tue),
            (Weekday::Wed, gym.hours.wed),
            (Weekday::Thu, gym.hours.thu),
            (Weekday::Fri, gym.hours.fri),
            (Weekday::Sat, gym.hours.sat),
            (Weekday::Sun, gym.hours.sun),
        ];
        for (weekday, configured) in table {
            if let Some(day) = configured {
                if day.open < day.close && day.close <= 24 {
                    hours.set(weekday, day.open, day.close);
                } else {
                    warn!(
                        "Ignoring invalid opening hours {}..{} for {:?}",
                        day.open, day.close, weekday
                    );
                }
            }
        }
        hours
    }

    pub fn set(&mut self, weekday: Weekday, open: u32, close: u32) {
        self.days[day_index(weekday)] = Some(OpenHours { open, close });
    }

    pub fn hours_for(&self, weekday: Weekday) -> Option<OpenHours> {
        self.days[day_index(weekday)]
    }

    pub fn time_zone(&self) -> Tz {
        self.tz
    }

    /// Whether an instant falls inside the open interval of its (local) day.
    pub fn is_open_at(&self, instant: DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&self.tz);
        match self.hours_for(local.weekday()) {
            Some(day) => local.hour() >= day.open && local.hour() < day.close,
            None => false,
        }
    }
}
