//! Key-value storage
//!
//! Access is best-effort: a failed read is treated as a missing key and a
//! failed write is logged and dropped.

use std::collections::HashMap;

/// String key-value store
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    /// Returns false if the value could not be stored
    fn set(&mut self, key: &str, value: &str) -> bool;
    fn remove(&mut self, key: &str);
}

/// In-memory storage (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        self.items.insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Open LocalStorage; if it is unavailable every operation is a no-op
    pub fn open() -> Self {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if inner.is_none() {
            log::warn!("LocalStorage unavailable - scores and settings will not persist");
        }
        Self { inner }
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> bool {
        let Some(storage) = &self.inner else {
            return false;
        };
        match storage.set_item(key, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to write {}: {:?}", key, e);
                false
            }
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = &self.inner {
            let _ = storage.remove_item(key);
        }
    }
}
