#[cfg(test)]
mod tests {
    use crate::error::SupabaseError;
    use crate::models::{AuthSignal, SignUpOutcome};
    use crate::SupabaseClient;
    use reserva_config::SupabaseConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> SupabaseClient {
        SupabaseClient::new(SupabaseConfig {
            url: base_url.to_string(),
            anon_key: "anon-test-key".to_string(),
        })
    }

    fn session_body(email: &str) -> serde_json::Value {
        json!({
            "access_token": "user-access-token",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "user-refresh-token",
            "user": {
                "id": "5f8b1d3a-0b5c-4a6e-9a44-0c7d1a2b3c4d",
                "email": email,
            }
        })
    }

    #[tokio::test]
    async fn sign_in_caches_the_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_body("ana@example.com")))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let session = client.sign_in("ana@example.com", "secret").await.unwrap();

        assert_eq!(session.user.email.as_deref(), Some("ana@example.com"));
        assert_eq!(client.access_token().await, "user-access-token");
        assert!(client.current_session().await.is_some());
    }

    #[tokio::test]
    async fn sign_in_surfaces_the_service_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials",
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .sign_in("ana@example.com", "wrong")
            .await
            .unwrap_err();

        match err {
            SupabaseError::AuthApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid login credentials");
            }
            other => panic!("Expected AuthApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn sign_up_without_autoconfirm_returns_the_pending_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/signup"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "5f8b1d3a-0b5c-4a6e-9a44-0c7d1a2b3c4d",
                "email": "nuevo@example.com",
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let outcome = client.sign_up("nuevo@example.com", "secret").await.unwrap();

        match outcome {
            SignUpOutcome::ConfirmationRequired(user) => {
                assert_eq!(user.email.as_deref(), Some("nuevo@example.com"));
            }
            SignUpOutcome::SessionCreated(_) => panic!("No session expected before confirmation"),
        }
        // No session may be cached until the account is confirmed
        assert!(client.current_session().await.is_none());
    }

    #[tokio::test]
    async fn initialize_exchanges_recovery_tokens_and_strips_the_fragment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/v1/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "5f8b1d3a-0b5c-4a6e-9a44-0c7d1a2b3c4d",
                "email": "ana@example.com",
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let mut signals = client.subscribe();

        let initialized = client
            .initialize(Some(
                "#access_token=recovery-token&refresh_token=recovery-refresh&type=recovery",
            ))
            .await;

        assert_eq!(initialized.replace_fragment.as_deref(), Some("#mi-cuenta"));
        let session = initialized.session.expect("recovery session");
        assert_eq!(session.access_token, "recovery-token");
        assert_eq!(session.refresh_token.as_deref(), Some("recovery-refresh"));
        assert_eq!(signals.recv().await.unwrap(), AuthSignal::OpenPasswordReset);
    }

    #[tokio::test]
    async fn initialize_reports_an_expired_recovery_link() {
        let server = MockServer::start().await;
        let client = test_client(&server.uri());
        let mut signals = client.subscribe();

        let initialized = client
            .initialize(Some(
                "#error=access_denied&error_description=Email+link+is+invalid+or+has+expired",
            ))
            .await;

        assert!(initialized.session.is_none());
        assert_eq!(initialized.replace_fragment.as_deref(), Some("#mi-cuenta"));
        assert_eq!(
            signals.recv().await.unwrap(),
            AuthSignal::RecoveryError {
                message: "Email link is invalid or has expired".to_string()
            }
        );
    }

    #[tokio::test]
    async fn initialize_without_fragment_reports_no_session() {
        let server = MockServer::start().await;
        let client = test_client(&server.uri());

        let initialized = client.initialize(None).await;

        assert!(initialized.session.is_none());
        assert!(initialized.replace_fragment.is_none());
    }

    #[tokio::test]
    async fn change_password_requires_a_session() {
        let server = MockServer::start().await;
        let client = test_client(&server.uri());

        let err = client.change_password("new-secret").await.unwrap_err();
        assert!(matches!(err, SupabaseError::NoSession));
    }

    #[tokio::test]
    async fn sign_out_clears_the_cached_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(session_body("ana@example.com")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        client.sign_in("ana@example.com", "secret").await.unwrap();
        let response = client.sign_out().await.unwrap();

        assert!(response.success);
        assert!(client.current_session().await.is_none());
        // Back to the anon key once signed out
        assert_eq!(client.access_token().await, "anon-test-key");
    }
}
