// --- File: crates/reserva_supabase/src/auth.rs ---
//! Authentication operations against the hosted GoTrue API.
//!
//! Every operation returns a typed result; failures are recovered by the
//! caller into the uniform response shape. `current_user` and
//! `current_session` fail closed and return `None` on any error.

use crate::client::SupabaseClient;
use crate::error::SupabaseError;
use crate::models::{
    AuthMessage, AuthSignal, AuthUser, Initialized, RecoveryParams, Session, SignUpOutcome,
};
use tracing::{debug, info, warn};

/// Fragment the interface is sent back to once a callback was consumed.
const ACCOUNT_FRAGMENT: &str = "#mi-cuenta";

impl SupabaseClient {
    /// Establish the client session, handling the three URL-driven inflows:
    /// an ambient already-active session, a password-recovery callback and an
    /// error callback. Recovery tokens are exchanged for a session and never
    /// survive in the returned replacement fragment.
    pub async fn initialize(&self, redirect_fragment: Option<&str>) -> Initialized {
        let mut replace_fragment = None;

        if let Some(fragment) = redirect_fragment {
            let params: RecoveryParams =
                serde_urlencoded::from_str(fragment.trim_start_matches('#')).unwrap_or_default();

            if let Some(error) = params.error.as_deref() {
                warn!("Recovery callback carried an error: {}", error);
                replace_fragment = Some(ACCOUNT_FRAGMENT.to_string());
                self.emit(AuthSignal::RecoveryError {
                    message: params.error_description.unwrap_or_else(|| {
                        "El enlace de recuperación es inválido o ha expirado".to_string()
                    }),
                });
            } else if params.kind.as_deref() == Some("recovery") {
                if let (Some(access), Some(refresh)) =
                    (params.access_token.as_deref(), params.refresh_token.as_deref())
                {
                    info!("Password recovery token detected");
                    replace_fragment = Some(ACCOUNT_FRAGMENT.to_string());
                    match self.set_session(access, refresh).await {
                        Ok(_) => {
                            info!("Recovery session established");
                            self.emit(AuthSignal::OpenPasswordReset);
                        }
                        Err(e) => {
                            warn!("Failed to establish recovery session: {}", e);
                            self.emit(AuthSignal::RecoveryError {
                                message: "No se pudo establecer la sesión de recuperación"
                                    .to_string(),
                            });
                        }
                    }
                }
            }
        }

        Initialized {
            session: self.current_session().await,
            replace_fragment,
        }
    }

    /// Register a new account with email and password.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignUpOutcome, SupabaseError> {
        let response = self
            .http()
            .post(self.auth_url("signup"))
            .header("apikey", self.anon_key())
            .bearer_auth(self.anon_key())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }

        let body: serde_json::Value = response.json().await?;
        // With auto-confirm enabled the service answers with a full session;
        // otherwise with a bare user record awaiting email confirmation.
        if body.get("access_token").is_some() {
            let session: Session = serde_json::from_value(body)?;
            self.store_session(session.clone()).await;
            Ok(SignUpOutcome::SessionCreated(session))
        } else {
            let user: AuthUser = serde_json::from_value(body)?;
            Ok(SignUpOutcome::ConfirmationRequired(user))
        }
    }

    /// Sign in with email and password.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, SupabaseError> {
        let response = self
            .http()
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", self.anon_key())
            .bearer_auth(self.anon_key())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }

        let session: Session = response.json().await?;
        self.store_session(session.clone()).await;
        Ok(session)
    }

    /// Request a passwordless sign-in link. The service mails the link; the
    /// caller only learns whether the request was accepted.
    pub async fn sign_in_with_magic_link(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<AuthMessage, SupabaseError> {
        let mut request = self
            .http()
            .post(self.auth_url("otp"))
            .header("apikey", self.anon_key())
            .bearer_auth(self.anon_key())
            .json(&serde_json::json!({ "email": email, "create_user": true }));
        if let Some(redirect) = redirect_to {
            debug!("Magic link redirect: {}", redirect);
            request = request.query(&[("redirect_to", redirect)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }
        Ok(AuthMessage::ok("Revisa tu email para el enlace de acceso"))
    }

    /// Send a password-recovery email.
    pub async fn send_password_reset(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<AuthMessage, SupabaseError> {
        let mut request = self
            .http()
            .post(self.auth_url("recover"))
            .header("apikey", self.anon_key())
            .bearer_auth(self.anon_key())
            .json(&serde_json::json!({ "email": email }));
        if let Some(redirect) = redirect_to {
            debug!("Password reset redirect: {}", redirect);
            request = request.query(&[("redirect_to", redirect)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }
        Ok(AuthMessage::ok(
            "Revisa tu email para el enlace de recuperación de contraseña",
        ))
    }

    /// Sign out and clear the cached session.
    pub async fn sign_out(&self) -> Result<AuthMessage, SupabaseError> {
        if let Some(session) = self.cached_session().await {
            let response = self
                .http()
                .post(self.auth_url("logout"))
                .header("apikey", self.anon_key())
                .bearer_auth(&session.access_token)
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(Self::auth_error(response).await);
            }
        }
        self.clear_session().await;
        Ok(AuthMessage::ok("Sesión cerrada exitosamente"))
    }

    /// Change the signed-in user's password. Requires an active session.
    pub async fn change_password(&self, new_password: &str) -> Result<AuthMessage, SupabaseError> {
        let session = self.cached_session().await.ok_or(SupabaseError::NoSession)?;

        let response = self
            .http()
            .put(self.auth_url("user"))
            .header("apikey", self.anon_key())
            .bearer_auth(&session.access_token)
            .json(&serde_json::json!({ "password": new_password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }
        Ok(AuthMessage::ok("Contraseña actualizada exitosamente"))
    }

    /// Exchange a token pair for a session; the access token is validated
    /// against the user endpoint before the session is cached.
    pub async fn set_session(
        &self,
        access_token: &str,
        refresh_token: &str,
    ) -> Result<Session, SupabaseError> {
        let user = self.fetch_user(access_token).await?;
        let session = Session {
            access_token: access_token.to_string(),
            token_type: Some("bearer".to_string()),
            expires_in: None,
            refresh_token: Some(refresh_token.to_string()),
            user,
        };
        self.store_session(session.clone()).await;
        Ok(session)
    }

    /// Fetch the user a given access token belongs to.
    pub async fn fetch_user(&self, access_token: &str) -> Result<AuthUser, SupabaseError> {
        let response = self
            .http()
            .get(self.auth_url("user"))
            .header("apikey", self.anon_key())
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::auth_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// The signed-in user, freshly validated. Fails closed: any error yields
    /// `None` rather than propagating.
    pub async fn current_user(&self) -> Option<AuthUser> {
        let session = self.cached_session().await?;
        match self.fetch_user(&session.access_token).await {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Failed to fetch current user: {}", e);
                None
            }
        }
    }

    /// The active session, if any. Fails closed.
    pub async fn current_session(&self) -> Option<Session> {
        self.cached_session().await
    }
}
