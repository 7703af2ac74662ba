// ============================================================================
// AUTH VIEWMODEL - Login y registro
// ============================================================================
// Devuelve valores; las vistas deciden la navegacion y los toasts.
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use crate::errors::{AdvisorError, AdvisorResult};
use crate::models::{SignupRequest, SignupResponse};
use crate::services::{Gateway, TokenStore};
use crate::state::{Session, SessionGuard};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Welcome back!";
pub const SIGNUP_SUCCESS_MESSAGE: &str = "Account Created! Redirecting...";

pub struct AuthViewModel<'a, G: Gateway, S: TokenStore> {
    gateway: &'a G,
    store: &'a S,
    token_ttl: Duration,
}

impl<'a, G: Gateway, S: TokenStore> AuthViewModel<'a, G, S> {
    pub fn new(gateway: &'a G, store: &'a S, token_ttl: Duration) -> Self {
        Self { gateway, store, token_ttl }
    }

    /// Login: cualquier fallo (credenciales o red) es el mismo `Credential`
    pub async fn login(&self, identifier: &str, secret: &str, now: DateTime<Utc>) -> AdvisorResult<Session> {
        let identifier = identifier.trim();
        if identifier.is_empty() || secret.is_empty() {
            return Err(AdvisorError::Credential);
        }
        let response = self.gateway.authenticate(identifier, secret).await.map_err(|e| {
            log::warn!("⚠️ [AUTH] Login rechazado: {}", e);
            AdvisorError::Credential
        })?;
        if response.access_token.is_empty() {
            return Err(AdvisorError::Credential);
        }
        SessionGuard::establish(self.store, &response.access_token, now, self.token_ttl)
    }

    pub async fn register(&self, request: &SignupRequest) -> AdvisorResult<SignupResponse> {
        let mut request = request.clone();
        request.username = request.username.trim().to_string();
        self.gateway.register(&request).await
    }
}
