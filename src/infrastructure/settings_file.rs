// Settings stores: TOML file backed and in-memory
use crate::application::settings_store::{SettingValue, SettingsError, SettingsStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone)]
pub struct MemorySettingsStore {
    values: BTreeMap<String, SettingValue>,
}

impl SettingsStore for MemorySettingsStore {
    fn get_value(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn put_default_value(&mut self, key: &str, value: SettingValue) -> Result<(), SettingsError> {
        self.values.entry(key.to_string()).or_insert(value);
        Ok(())
    }

    fn put_values(&mut self, entries: Vec<(String, SettingValue)>) -> Result<(), SettingsError> {
        self.values.extend(entries);
        Ok(())
    }
}

/// Flat `key = value` TOML file, rewritten on every change. The in-memory
/// values only change once the file has been written.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    values: BTreeMap<String, SettingValue>,
}

impl FileSettingsStore {
    /// Open the store, starting empty when the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => toml::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(path = %path.display(), keys = values.len(), "settings loaded");
        Ok(Self { path, values })
    }

    fn persist(path: &Path, values: &BTreeMap<String, SettingValue>) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let raw = toml::to_string(values)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    fn commit(&mut self, candidate: BTreeMap<String, SettingValue>) -> Result<(), SettingsError> {
        Self::persist(&self.path, &candidate)?;
        self.values = candidate;
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn get_value(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }

    fn put_default_value(&mut self, key: &str, value: SettingValue) -> Result<(), SettingsError> {
        if self.values.contains_key(key) {
            return Ok(());
        }
        let mut candidate = self.values.clone();
        candidate.insert(key.to_string(), value);
        self.commit(candidate)
    }

    fn put_values(&mut self, entries: Vec<(String, SettingValue)>) -> Result<(), SettingsError> {
        let mut candidate = self.values.clone();
        candidate.extend(entries);
        self.commit(candidate)
    }
}
