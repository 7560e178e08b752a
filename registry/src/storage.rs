//! Key/value storage seam over `localStorage` and `sessionStorage`.
//!
//! The browser impls live in the client crate; `MemoryStore` backs tests and
//! server-side rendering.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::query::SearchKind;
use crate::record::PersonRecord;

/// Local-storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Local-storage key for the backup of an unconfirmed registration.
#[must_use]
pub fn temp_registration_key(id: &str) -> String {
    format!("temp_registration_{id}")
}

/// Minimal string store. Writes are best effort: quota or privacy-mode
/// failures are swallowed by implementations.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Session cache of fetched lists, one slot per [`SearchKind`].
///
/// Entries never expire; they are dropped on explicit refresh.
#[derive(Clone, Debug)]
pub struct ListCache<S> {
    store: S,
}

impl<S: KeyValueStore> ListCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Cached list for `kind`. Corrupt contents count as a miss and are removed.
    pub fn load(&self, kind: SearchKind) -> Option<Vec<PersonRecord>> {
        let raw = self.store.get(kind.cache_key())?;
        match serde_json::from_str(&raw) {
            Ok(records) => Some(records),
            Err(err) => {
                log::warn!("dropping corrupt {} cache: {err}", kind.cache_key());
                self.store.remove(kind.cache_key());
                None
            }
        }
    }

    pub fn store(&self, kind: SearchKind, records: &[PersonRecord]) {
        match serde_json::to_string(records) {
            Ok(raw) => self.store.set(kind.cache_key(), &raw),
            Err(err) => log::warn!("failed to serialize {} cache: {err}", kind.cache_key()),
        }
    }

    pub fn invalidate(&self, kind: SearchKind) {
        self.store.remove(kind.cache_key());
    }
}
