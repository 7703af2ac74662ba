// ============================================================================
// TOKEN STORE - Persistencia del bearer token con expiracion
// ============================================================================

use std::cell::RefCell;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use crate::errors::AdvisorResult;

pub const TOKEN_STORAGE_KEY: &str = "bunk_advisor_token";

/// Token persistido con su fecha de expiracion
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct StoredToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    pub fn issue(token: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token: token.into(),
            expires_at: now + ttl,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Almacen del token (localStorage en el navegador)
pub trait TokenStore {
    fn load(&self) -> Option<StoredToken>;
    fn save(&self, token: &StoredToken) -> AdvisorResult<()>;
    fn clear(&self) -> AdvisorResult<()>;
}

/// Almacen en memoria (hosts sin navegador y tests)
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: RefCell<Option<StoredToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: StoredToken) -> Self {
        Self {
            slot: RefCell::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<StoredToken> {
        self.slot.borrow().clone()
    }

    fn save(&self, token: &StoredToken) -> AdvisorResult<()> {
        *self.slot.borrow_mut() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> AdvisorResult<()> {
        *self.slot.borrow_mut() = None;
        Ok(())
    }
}

impl<T: TokenStore + ?Sized> TokenStore for std::rc::Rc<T> {
    fn load(&self) -> Option<StoredToken> {
        (**self).load()
    }

    fn save(&self, token: &StoredToken) -> AdvisorResult<()> {
        (**self).save(token)
    }

    fn clear(&self) -> AdvisorResult<()> {
        (**self).clear()
    }
}

/// localStorage via gloo-storage
#[cfg(target_arch = "wasm32")]
pub struct LocalTokenStore;

#[cfg(target_arch = "wasm32")]
impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<StoredToken> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::get::<StoredToken>(TOKEN_STORAGE_KEY).ok()
    }

    fn save(&self, token: &StoredToken) -> AdvisorResult<()> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::set(TOKEN_STORAGE_KEY, token)
            .map_err(|e| crate::errors::AdvisorError::Storage(format!("Error guardando token: {}", e)))
    }

    fn clear(&self) -> AdvisorResult<()> {
        use gloo_storage::{LocalStorage, Storage};
        LocalStorage::delete(TOKEN_STORAGE_KEY);
        Ok(())
    }
}
