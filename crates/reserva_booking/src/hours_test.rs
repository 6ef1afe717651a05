#[cfg(test)]
mod tests {
    use crate::hours::WeeklyHours;
    use chrono::{TimeZone, Utc, Weekday};
    use reserva_config::{DayHours, GymConfig, GymHoursConfig};

    #[test]
    fn default_schedule_matches_the_published_hours() {
        let hours = WeeklyHours::default();

        assert_eq!(hours.hours_for(Weekday::Mon).unwrap().open, 6);
        assert_eq!(hours.hours_for(Weekday::Fri).unwrap().close, 22);
        assert_eq!(hours.hours_for(Weekday::Sat).unwrap().open, 8);
        assert_eq!(hours.hours_for(Weekday::Sat).unwrap().close, 14);
        assert!(hours.hours_for(Weekday::Sun).is_none());
    }

    #[test]
    fn open_interval_is_half_open() {
        let hours = WeeklyHours::default();

        // Monday 2024-06-03
        let at_open = Utc.with_ymd_and_hms(2024, 6, 3, 6, 0, 0).unwrap();
        let before_open = Utc.with_ymd_and_hms(2024, 6, 3, 5, 59, 0).unwrap();
        let last_hour = Utc.with_ymd_and_hms(2024, 6, 3, 21, 59, 0).unwrap();
        let at_close = Utc.with_ymd_and_hms(2024, 6, 3, 22, 0, 0).unwrap();

        assert!(hours.is_open_at(at_open));
        assert!(!hours.is_open_at(before_open));
        assert!(hours.is_open_at(last_hour));
        assert!(!hours.is_open_at(at_close));
    }

    #[test]
    fn monday_past_closing_is_excluded() {
        // Monday open 06:00-22:00; a 22:30 instant falls outside
        let hours = WeeklyHours::default();
        let late_monday = Utc.with_ymd_and_hms(2024, 6, 3, 22, 30, 0).unwrap();
        assert!(!hours.is_open_at(late_monday));
    }

    #[test]
    fn closed_day_rejects_every_hour() {
        let hours = WeeklyHours::default();
        // Sunday 2024-06-09
        for hour in 0..24 {
            let instant = Utc.with_ymd_and_hms(2024, 6, 9, hour, 0, 0).unwrap();
            assert!(!hours.is_open_at(instant), "Sunday {}h must be closed", hour);
        }
    }

    #[test]
    fn config_days_absent_from_the_table_are_closed() {
        let gym = GymConfig {
            time_zone: None,
            hours: GymHoursConfig {
                mon: Some(DayHours { open: 6, close: 22 }),
                ..Default::default()
            },
        };
        let hours = WeeklyHours::from_config(Some(&gym));

        assert!(hours.hours_for(Weekday::Mon).is_some());
        for weekday in [
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert!(hours.hours_for(weekday).is_none());
        }
    }

    #[test]
    fn invalid_intervals_leave_the_day_closed() {
        let gym = GymConfig {
            time_zone: None,
            hours: GymHoursConfig {
                mon: Some(DayHours { open: 22, close: 6 }),
                tue: Some(DayHours { open: 6, close: 25 }),
                ..Default::default()
            },
        };
        let hours = WeeklyHours::from_config(Some(&gym));

        assert!(hours.hours_for(Weekday::Mon).is_none());
        assert!(hours.hours_for(Weekday::Tue).is_none());
    }

    #[test]
    fn membership_is_evaluated_in_the_configured_zone() {
        let gym = GymConfig {
            time_zone: Some("America/Santiago".to_string()),
            hours: GymHoursConfig {
                mon: Some(DayHours { open: 6, close: 22 }),
                ..Default::default()
            },
        };
        let hours = WeeklyHours::from_config(Some(&gym));

        // June in Santiago is UTC-4: 09:00Z is 05:00 local, 10:00Z is 06:00
        let before_open = Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap();
        let at_open = Utc.with_ymd_and_hms(2024, 6, 3, 10, 0, 0).unwrap();
        assert!(!hours.is_open_at(before_open));
        assert!(hours.is_open_at(at_open));
    }

    #[test]
    fn unknown_zone_falls_back_to_utc() {
        let gym = GymConfig {
            time_zone: Some("Mars/Olympus_Mons".to_string()),
            hours: GymHoursConfig {
                mon: Some(DayHours { open: 6, close: 22 }),
                ..Default::default()
            },
        };
        let hours = WeeklyHours::from_config(Some(&gym));
        let monday_morning = Utc.with_ymd_and_hms(2024, 6, 3, 7, 0, 0).unwrap();
        assert!(hours.is_open_at(monday_morning));
    }
}
