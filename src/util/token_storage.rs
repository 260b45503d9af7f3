//! Persisted bearer-token slot.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token lives in browser `localStorage` so it survives reloads. The
//! gateway reads it before every request and writes it after a successful
//! login; only logout clears it. Native builds get the inert
//! `BrowserTokenStorage`; tests use the in-memory `MemoryTokenStorage`.

#[cfg(test)]
#[path = "token_storage_test.rs"]
mod token_storage_test;

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Read/write access to the single current token.
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// `localStorage`-backed storage under a fixed key.
///
/// Outside the browser every read is empty and writes are dropped.
#[derive(Clone, Debug)]
pub struct BrowserTokenStorage {
    #[cfg_attr(not(feature = "csr"), allow(dead_code))]
    key: String,
}

impl BrowserTokenStorage {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .get_item(&self.key)
                .ok()
                .flatten()
                .filter(|token| !token.is_empty())
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn save(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("token storage: localStorage unavailable, token not persisted");
                return;
            };
            if let Err(err) = storage.set_item(&self.key, token) {
                log::warn!("token storage: failed to persist token: {err:?}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(&self.key);
            }
        }
    }
}

/// In-memory storage sharing one slot across clones.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStorage {
    slot: Rc<RefCell<Option<String>>>,
}

#[cfg(test)]
impl MemoryTokenStorage {
    pub fn with_token(token: &str) -> Self {
        let storage = Self::default();
        storage.save(token);
        storage
    }
}

#[cfg(test)]
impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn save(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.slot.borrow_mut() = None;
    }
}

/// `Authorization` header value for the current token; empty bearer when absent.
#[must_use]
pub fn bearer_header(token: Option<&str>) -> String {
    format!("Bearer {}", token.unwrap_or_default())
}
