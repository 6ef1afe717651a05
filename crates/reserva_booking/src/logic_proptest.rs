#[cfg(test)]
mod tests {
    use crate::hours::WeeklyHours;
    use crate::logic::{filter_bookable_slots, plan_slots};
    use chrono::{Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc, Weekday};
    use proptest::prelude::*;
    use reserva_common::services::{BookingRow, BookingStatus, SlotRow};
    use uuid::Uuid;

    const WEEKDAYS: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Build a weekly table from per-day (open, length) specs; a None day
    /// stays closed.
    fn hours_from_specs(day_specs: &[Option<(u32, u32)>]) -> WeeklyHours {
        let mut hours = WeeklyHours::empty(chrono_tz::UTC);
        for (index, spec) in day_specs.iter().enumerate() {
            if let Some((open, length)) = spec {
                let close = (open + length).min(24);
                if close > *open {
                    hours.set(WEEKDAYS[index], *open, close);
                }
            }
        }
        hours
    }

    fn slot_at_offset(base_minutes: i64) -> SlotRow {
        let base = Utc.with_ymd_and_hms(2024, 6, 3, 0, 0, 0).unwrap();
        SlotRow {
            id: Uuid::new_v4(),
            service_id: Uuid::new_v4(),
            date_time: base + Duration::minutes(base_minutes),
            available: true,
            created_at: None,
        }
    }

    proptest! {
        /// No filtered slot may fall on a closed day or outside the open
        /// interval of its day, whatever the configuration.
        #[test]
        fn filtered_slots_always_fall_inside_opening_hours(
            day_specs in proptest::collection::vec(
                proptest::option::of((0u32..24, 1u32..24)), 7),
            offsets in proptest::collection::vec(0i64..(14 * 24 * 60), 0..64),
        ) {
            let hours = hours_from_specs(&day_specs);
            let slots: Vec<SlotRow> = offsets.iter().map(|m| slot_at_offset(*m)).collect();

            let filtered = filter_bookable_slots(slots, &[], &hours);

            for slot in filtered {
                let day = hours.hours_for(slot.date_time.weekday());
                prop_assert!(day.is_some(), "slot on a closed day survived: {}", slot.date_time);
                let day = day.unwrap();
                let hour = slot.date_time.hour();
                prop_assert!(
                    hour >= day.open && hour < day.close,
                    "slot at {} escaped [{}, {})", slot.date_time, day.open, day.close
                );
            }
        }

        /// A slot referenced by a confirmed booking never survives filtering.
        #[test]
        fn booked_slots_never_survive_filtering(
            offsets in proptest::collection::vec(0i64..(7 * 24 * 60), 1..32),
            booked_mask in proptest::collection::vec(any::<bool>(), 32),
        ) {
            // Fully open week so only the booking filter is in play
            let hours = hours_from_specs(&[Some((0, 24)); 7]);
            let slots: Vec<SlotRow> = offsets.iter().map(|m| slot_at_offset(*m)).collect();
            let bookings: Vec<BookingRow> = slots
                .iter()
                .zip(booked_mask.iter())
                .filter(|(_, booked)| **booked)
                .map(|(slot, _)| BookingRow {
                    id: Uuid::new_v4(),
                    user_id: Uuid::new_v4(),
                    slot_id: slot.id,
                    service_id: slot.service_id,
                    status: BookingStatus::Confirmed,
                    created_at: Utc::now(),
                    updated_at: None,
                })
                .collect();

            let filtered = filter_bookable_slots(slots, &bookings, &hours);

            for slot in filtered {
                prop_assert!(
                    !bookings.iter().any(|b| b.slot_id == slot.id),
                    "booked slot {} survived filtering", slot.id
                );
            }
        }

        /// Every generated slot lies inside the configured opening hours.
        #[test]
        fn planned_slots_respect_the_weekly_table(
            day_specs in proptest::collection::vec(
                proptest::option::of((0u32..24, 1u32..24)), 7),
            span_days in 0u64..21,
        ) {
            let hours = hours_from_specs(&day_specs);
            let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
            let end = start + Duration::days(span_days as i64);

            let planned = plan_slots(&hours, Uuid::new_v4(), start, end);

            for slot in planned {
                prop_assert!(
                    hours.is_open_at(slot.date_time),
                    "generated slot {} outside opening hours", slot.date_time
                );
            }
        }
    }
}
