//! Browser `window.localStorage` backend (hydrate builds only).

use super::{Storage, StorageError};

/// Handle onto the page's `localStorage`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Open the current window's `localStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] outside a window context or when
    /// the browser blocks storage (private mode, disabled cookies).
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_message(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))?;
        Ok(Self { inner })
    }
}

fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner
            .get_item(key)
            .map_err(|e| StorageError::Io { key: key.to_owned(), message: js_message(&e) })
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected { key: key.to_owned(), message: js_message(&e) })
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.inner
            .remove_item(key)
            .map_err(|e| StorageError::Io { key: key.to_owned(), message: js_message(&e) })
    }
}
