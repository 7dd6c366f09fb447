use crate::domain::ports::Storage;
use crate::utils::error::{OkrError, Result};
use crate::utils::validation::validate_storage_key;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// File-backed storage: one file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_storage_key("storage key", key).map_err(|e| OkrError::StorageError {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(self.base_path.join(key))
    }
}

impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let full_path = self.path_for(key)?;
        match fs::read(&full_path) {
            Ok(data) => match String::from_utf8(data) {
                Ok(value) => Ok(Some(value)),
                // 非 UTF-8 內容視同損毀，回傳空字串讓上層清除
                Err(e) => {
                    tracing::warn!("Stored value for '{}' is not valid UTF-8: {}", key, e);
                    Ok(Some(String::new()))
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let full_path = self.path_for(key)?;

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, value)?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let full_path = self.path_for(key)?;
        match fs::remove_file(full_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage; clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(key: &str) -> OkrError {
    OkrError::StorageError {
        key: key.to_string(),
        message: "storage lock poisoned".to_string(),
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().map_err(|_| poisoned(key))?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().map_err(|_| poisoned(key))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().map_err(|_| poisoned(key))?;
        items.remove(key);
        Ok(())
    }
}
