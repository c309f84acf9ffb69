//! `localStorage`-backed credential store for the browser build.

use parque_access::{CredentialStore, StoreError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Key the session record is kept under.
pub const SESSION_KEY: &str = "parque.session";

/// Stores the session record under one `localStorage` key.
///
/// The storage handle is looked up per call; browser handles cannot be
/// shared across threads and the store must be `Send + Sync`.
#[derive(Debug, Clone)]
pub struct BrowserCredentialStore {
    key: String,
}

impl BrowserCredentialStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for BrowserCredentialStore {
    fn default() -> Self {
        Self::new(SESSION_KEY)
    }
}

fn local_storage() -> Result<Storage, String> {
    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    window
        .local_storage()
        .map_err(describe)?
        .ok_or_else(|| "localStorage is unavailable".to_string())
}

fn describe(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl CredentialStore for BrowserCredentialStore {
    fn read(&self) -> Result<Option<String>, StoreError> {
        let storage = local_storage().map_err(|details| StoreError::Read { details })?;
        storage
            .get_item(&self.key)
            .map_err(|e| StoreError::Read { details: describe(e) })
    }

    fn write(&self, value: &str) -> Result<(), StoreError> {
        let storage = local_storage().map_err(|details| StoreError::Write { details })?;
        storage
            .set_item(&self.key, value)
            .map_err(|e| StoreError::Write { details: describe(e) })
    }

    fn clear(&self) -> Result<(), StoreError> {
        let storage = local_storage().map_err(|details| StoreError::Clear { details })?;
        storage
            .remove_item(&self.key)
            .map_err(|e| StoreError::Clear { details: describe(e) })
    }
}
