// ============================================================================
// SESSION STATE - Session Guard y rutas
// ============================================================================
// La sesion es un valor explicito que se pasa al controller; no hay singleton.
// ============================================================================

use chrono::{DateTime, Duration, Utc};
use crate::errors::AdvisorResult;
use crate::services::token_store::{StoredToken, TokenStore};

/// Sesion autorizada (bearer token presente)
#[derive(Clone, PartialEq, Debug)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Rutas hash de la app
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
}

impl Route {
    pub fn hash(self) -> &'static str {
        match self {
            Route::Login => "#/login",
            Route::Signup => "#/signup",
            Route::Dashboard => "#/dashboard",
        }
    }

    pub fn from_hash(hash: &str) -> Self {
        match hash.trim_start_matches('#').trim_start_matches('/') {
            "signup" => Route::Signup,
            "dashboard" | "" => Route::Dashboard,
            _ => Route::Login,
        }
    }
}

/// Chequeo de frontera de la sesion
pub struct SessionGuard;

impl SessionGuard {
    /// Lee el token persistido; un token expirado se borra y cuenta como ausente
    pub fn check<S: TokenStore + ?Sized>(store: &S, now: DateTime<Utc>) -> Option<Session> {
        let stored = store.load()?;
        if stored.is_expired(now) {
            log::info!("⌛ [SESSION] Token expirado, limpiando");
            if let Err(e) = store.clear() {
                log::warn!("⚠️ [SESSION] Error limpiando token expirado: {}", e);
            }
            return None;
        }
        Some(Session::new(stored.token))
    }

    /// Persiste un token recien emitido
    pub fn establish<S: TokenStore + ?Sized>(
        store: &S,
        token: &str,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> AdvisorResult<Session> {
        store.save(&StoredToken::issue(token, now, ttl))?;
        log::info!("✅ [SESSION] Sesion establecida");
        Ok(Session::new(token))
    }

    /// Borra el token y devuelve la ruta de salida. Idempotente.
    pub fn terminate<S: TokenStore + ?Sized>(store: &S) -> Route {
        if let Err(e) = store.clear() {
            log::warn!("⚠️ [SESSION] Error limpiando token: {}", e);
        }
        log::info!("👋 [SESSION] Logout");
        Route::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::token_store::MemoryTokenStore;

    #[test]
    fn absent_token_means_no_session() {
        let store = MemoryTokenStore::new();
        assert_eq!(SessionGuard::check(&store, Utc::now()), None);
    }

    #[test]
    fn present_token_is_trusted_without_server_check() {
        let now = Utc::now();
        let store = MemoryTokenStore::with_token(StoredToken::issue("jwt-abc", now, Duration::days(1)));
        assert_eq!(SessionGuard::check(&store, now), Some(Session::new("jwt-abc")));
    }

    #[test]
    fn expired_token_is_cleared() {
        let now = Utc::now();
        let store = MemoryTokenStore::with_token(StoredToken::issue("old", now - Duration::days(2), Duration::days(1)));
        assert_eq!(SessionGuard::check(&store, now), None);
        assert!(store.load().is_none());
    }

    #[test]
    fn terminate_is_idempotent() {
        let now = Utc::now();
        let store = MemoryTokenStore::new();
        SessionGuard::establish(&store, "jwt", now, Duration::days(1)).unwrap();
        assert_eq!(SessionGuard::terminate(&store), Route::Login);
        assert_eq!(SessionGuard::terminate(&store), Route::Login);
        assert!(store.load().is_none());
    }

    #[test]
    fn routes_parse_from_location_hash() {
        assert_eq!(Route::from_hash("#/signup"), Route::Signup);
        assert_eq!(Route::from_hash("#/dashboard"), Route::Dashboard);
        assert_eq!(Route::from_hash(""), Route::Dashboard);
        assert_eq!(Route::from_hash("#/login"), Route::Login);
        assert_eq!(Route::from_hash("#/nope"), Route::Login);
    }
}
