/// Cached copy of the backend path configuration

use tracing::{info, warn};

use super::data::ConfigData;
use super::storage::{Storage, StorageError};

/// Storage key of the cached configuration
pub const CONFIG_KEY: &str = "idExtractorConfig";

pub struct ConfigStore {
    storage: Box<dyn Storage>,
}

impl ConfigStore {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Read the cached configuration, falling back to defaults when the
    /// entry is missing or unreadable.
    pub fn load(&self) -> ConfigData {
        let Some(json) = self.storage.get(CONFIG_KEY) else {
            return ConfigData::default();
        };

        match ConfigData::from_json(&json) {
            Ok(config) => {
                info!("⚙️  Loaded cached configuration");
                config
            }
            Err(e) => {
                warn!("⚠️  Failed to load cached configuration: {}", e);
                ConfigData::default()
            }
        }
    }

    pub fn save(&mut self, config: &ConfigData) -> Result<(), StorageError> {
        let json = config.to_json().map_err(|source| StorageError::Encode {
            key: CONFIG_KEY.to_string(),
            source,
        })?;
        self.storage.set(CONFIG_KEY, &json)
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::storage::{FileStorage, MemoryStorage};

    #[test]
    fn test_missing_entry_gives_defaults() {
        let store = ConfigStore::new(Box::new(MemoryStorage::new()));
        assert_eq!(store.load(), ConfigData::default());
    }

    #[test]
    fn test_corrupt_entry_gives_defaults() {
        let mut storage = MemoryStorage::new();
        storage.set(CONFIG_KEY, "{not json").unwrap();

        let store = ConfigStore::new(Box::new(storage));
        assert_eq!(store.load(), ConfigData::default());
    }

    #[test]
    fn test_config_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let config = ConfigData {
            save_path: "/srv/ids".into(),
            back_path: "/scanner/back".into(),
            front_path: "/scanner/front".into(),
        };

        let mut store = ConfigStore::new(Box::new(FileStorage::open(&path).unwrap()));
        store.save(&config).unwrap();
        drop(store);

        let reloaded = ConfigStore::new(Box::new(FileStorage::open(&path).unwrap()));
        assert_eq!(reloaded.load(), config);
    }

    #[test]
    fn test_config_persists_after_corrupt_storage_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, r#"{"idExtractorConfig": "{\"savePa"#).unwrap();
        let config = ConfigData {
            save_path: "/srv/ids".into(),
            ..ConfigData::default()
        };

        let mut store = ConfigStore::new(Box::new(FileStorage::open(&path).unwrap()));
        assert_eq!(store.load(), ConfigData::default());
        store.save(&config).unwrap();
        drop(store);

        let reloaded = ConfigStore::new(Box::new(FileStorage::open(&path).unwrap()));
        assert_eq!(reloaded.load(), config);
    }
}
