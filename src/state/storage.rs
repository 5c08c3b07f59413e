/// Key/value persistence areas
///
/// Two scopes exist:
/// - `MemoryStorage` lives as long as the process (the "session")
/// - `FileStorage` is a JSON map on disk that survives restarts

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by a persistence area
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode storage entry {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-to-string persistence area
pub trait Storage: Send {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-scoped storage. Nothing is written to disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable storage backed by a single JSON object file.
///
/// The whole map is loaded on open and rewritten on every `set`. Writes
/// go to a sibling `.tmp` file first and are renamed into place.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Open (or lazily create) the storage file at `path`. A file that
    /// does not parse is logged and treated as empty, so the next `set`
    /// replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let entries = if path.exists() {
            let text = fs::read_to_string(&path).map_err(|source| StorageError::Io {
                path: path.clone(),
                source,
            })?;
            if text.trim().is_empty() {
                HashMap::new()
            } else {
                match serde_json::from_str(&text) {
                    Ok(entries) => entries,
                    Err(e) => {
                        warn!("⚠️  Ignoring unreadable storage file {}: {}", path.display(), e);
                        HashMap::new()
                    }
                }
            }
        } else {
            HashMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Where the durable storage file lives by default:
    /// - Linux: ~/.local/share/id-extractor/storage.json
    /// - macOS: ~/Library/Application Support/id-extractor/storage.json
    /// - Windows: %APPDATA%\id-extractor\storage.json
    pub fn default_location() -> Option<PathBuf> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("id-extractor");
        path.push("storage.json");
        Some(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            StorageError::Encode {
                key: key.to_string(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(|source| StorageError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush(key)?;
        debug!(key, "storage entry written");
        Ok(())
    }
}
