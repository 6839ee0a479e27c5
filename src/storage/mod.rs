//! Durable key/value storage for user preferences.
//!
//! The page persists exactly one value (the theme), but the store is a
//! plain string map like the browser's `localStorage`:
//!
//! - [`MemoryStorage`] - in-process map, optionally "unavailable"
//! - [`FileStorage`] - JSON object on disk, survives restarts
//!
//! The browser implementation lives in `crate::web`.

mod file;

pub use file::FileStorage;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error when accessing `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("corrupt storage file `{0}`")]
    Corrupt(PathBuf, #[source] serde_json::Error),
}

pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RefCell<BTreeMap<String, String>>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every access fails, like a browser with storage disabled.
    pub fn unavailable() -> Self {
        Self {
            values: RefCell::default(),
            unavailable: true,
        }
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable {
            Err(StorageError::Unavailable("disabled".to_owned()))
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.values
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("theme").unwrap(), None);
        storage.set("theme", "light").unwrap();
        assert_eq!(storage.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_unavailable_fails_every_access() {
        let storage = MemoryStorage::unavailable();
        assert!(matches!(
            storage.get("theme"),
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.set("theme", "dark").is_err());
    }
}
