#[cfg(test)]
mod tests {
    use crate::admin::{compute_stats, is_admin};
    use chrono::{Duration, TimeZone, Utc};
    use reserva_common::services::{
        BookingDetailRow, BookingRow, BookingStatus, ServiceInfo, SlotInfo,
    };
    use reserva_config::{AdminConfig, AppConfig, ServerConfig};
    use reserva_supabase::AuthUser;
    use uuid::Uuid;

    fn config_with_admins(emails: &[&str]) -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            use_supabase: true,
            supabase: None,
            gym: None,
            admin: Some(AdminConfig {
                emails: emails.iter().map(|e| e.to_string()).collect(),
            }),
            booking: None,
        }
    }

    fn user_with_email(email: Option<&str>) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            email: email.map(|e| e.to_string()),
            created_at: None,
            last_sign_in_at: None,
        }
    }

    fn detail(
        status: BookingStatus,
        created_at: chrono::DateTime<Utc>,
        slot_time: Option<chrono::DateTime<Utc>>,
    ) -> BookingDetailRow {
        let service_id = Uuid::new_v4();
        let slot_id = Uuid::new_v4();
        BookingDetailRow {
            booking: BookingRow {
                id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                slot_id,
                service_id,
                status,
                created_at,
                updated_at: None,
            },
            slot: slot_time.map(|date_time| SlotInfo {
                id: slot_id,
                date_time,
                service_id,
            }),
            service: Some(ServiceInfo {
                id: service_id,
                name: "Plan Mensual".to_string(),
                duration: 60,
            }),
        }
    }

    #[test]
    fn admin_membership_is_case_insensitive() {
        let config = config_with_admins(&["Admin@OdinGym.cl"]);

        let admin = user_with_email(Some("admin@odingym.cl"));
        let outsider = user_with_email(Some("socio@example.com"));

        assert!(is_admin(&config, Some(&admin)));
        assert!(!is_admin(&config, Some(&outsider)));
    }

    #[test]
    fn missing_user_or_email_is_never_admin() {
        let config = config_with_admins(&["admin@odingym.cl"]);
        assert!(!is_admin(&config, None));
        assert!(!is_admin(&config, Some(&user_with_email(None))));
    }

    #[test]
    fn empty_allow_list_grants_nobody() {
        let config = config_with_admins(&[]);
        let user = user_with_email(Some("admin@odingym.cl"));
        assert!(!is_admin(&config, Some(&user)));
    }

    #[test]
    fn stats_count_statuses_recency_and_upcoming_slots() {
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
        let bookings = vec![
            // Upcoming confirmed booking created this week
            detail(
                BookingStatus::Confirmed,
                now - Duration::days(1),
                Some(now + Duration::days(2)),
            ),
            // Confirmed but in the past, created long ago
            detail(
                BookingStatus::Confirmed,
                now - Duration::days(30),
                Some(now - Duration::days(20)),
            ),
            // Cancelled this week
            detail(BookingStatus::Cancelled, now - Duration::days(2), None),
            // Completed long ago
            detail(
                BookingStatus::Completed,
                now - Duration::days(15),
                Some(now - Duration::days(10)),
            ),
        ];

        let stats = compute_stats(&bookings, now);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.confirmed, 2);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.this_week, 2);
        assert_eq!(stats.upcoming, 1);
    }

    #[test]
    fn stats_ignore_upcoming_without_slot_data() {
        let now = Utc::now();
        let bookings = vec![detail(BookingStatus::Confirmed, now, None)];
        let stats = compute_stats(&bookings, now);
        assert_eq!(stats.upcoming, 0);
    }
}
