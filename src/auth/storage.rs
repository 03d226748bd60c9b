//! Persistence of session tokens between console runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Storage keys
pub mod keys {
    pub const ACCESS_TOKEN: &str = "backoffice:access_token";
    pub const TWO_FACTOR_TOKEN: &str = "backoffice:two_factor_token";
}

/// Key/value store backing the [`AuthContext`](crate::auth::AuthContext).
pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);

    fn remove(&self, key: &str);
}

/// Process-local storage; tokens are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.write() {
            values.remove(key);
        }
    }
}

/// JSON file storage.
///
/// The whole map is rewritten on every change. A missing file is treated as
/// empty; an unreadable one is logged and ignored.
pub struct FileTokenStorage {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl FileTokenStorage {
    /// Opens (or prepares to create) the token file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        let cache = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed token file {}: {e}", path.display());
                HashMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                log::warn!("Failed to read token file {}: {e}", path.display());
                HashMap::new()
            }
        };

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, values: &HashMap<String, String>) {
        let contents = match serde_json::to_string_pretty(values) {
            Ok(contents) => contents,
            Err(e) => {
                log::error!("Failed to serialize tokens: {e}");
                return;
            }
        };

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(dir) {
                    log::error!("Failed to create {}: {e}", dir.display());
                    return;
                }
            }
        }

        if let Err(e) = std::fs::write(&self.path, contents) {
            log::error!("Failed to write token file {}: {e}", self.path.display());
        }
    }
}

impl TokenStorage for FileTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.cache.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(key.to_string(), value.to_string());
            self.save(&cache);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut cache) = self.cache.write() {
            if cache.remove(key).is_some() {
                self.save(&cache);
            }
        }
    }
}

impl std::fmt::Debug for FileTokenStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTokenStorage")
            .field("path", &self.path)
            .finish()
    }
}
