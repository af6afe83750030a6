//! `localStorage`-backed session store.

use survey_core::session::SessionStore;
use survey_core::{Error, Result};
use web_sys::Storage;

/// The browser's durable per-origin store
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

fn storage() -> Result<Storage> {
    web_sys::window()
        .ok_or_else(|| Error::Storage("no window".to_string()))?
        .local_storage()
        .map_err(|e| Error::Storage(format!("{e:?}")))?
        .ok_or_else(|| Error::Storage("localStorage unavailable".to_string()))
}

impl SessionStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        storage().ok()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        storage()?
            .set_item(key, value)
            .map_err(|e| Error::Storage(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<()> {
        storage()?
            .remove_item(key)
            .map_err(|e| Error::Storage(format!("{e:?}")))
    }
}
