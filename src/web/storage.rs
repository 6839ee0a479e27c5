//! `Storage` over `window.localStorage`.

use web_sys::Window;

use crate::storage::{Storage, StorageError};

/// Browser `localStorage`. Private browsing or blocked cookies leave it
/// unavailable; every access then fails with [`StorageError::Unavailable`].
pub struct LocalStorage {
    inner: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn new(window: &Window) -> Self {
        Self {
            inner: window.local_storage().ok().flatten(),
        }
    }

    fn store(&self) -> Result<&web_sys::Storage, StorageError> {
        self.inner
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_owned()))
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}
