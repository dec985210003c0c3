// Settings store capability and its value type
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Integer(i64),
    Text(String),
}

impl SettingValue {
    pub fn as_text(&self) -> String {
        match self {
            SettingValue::Integer(n) => n.to_string(),
            SettingValue::Text(s) => s.clone(),
        }
    }

    /// Integers pass through; text is parsed, so values typed into a
    /// settings file as strings still count.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingValue::Integer(n) => Some(*n),
            SettingValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("polling interval must be a positive number of minutes, got {0}")]
    InvalidInterval(i64),
}

pub trait SettingsStore: Send {
    fn get_value(&self, key: &str) -> Option<SettingValue>;

    /// Store `value` only if `key` has no value yet
    fn put_default_value(&mut self, key: &str, value: SettingValue) -> Result<(), SettingsError>;

    fn put_value(&mut self, key: &str, value: SettingValue) -> Result<(), SettingsError> {
        self.put_values(vec![(key.to_string(), value)])
    }

    /// Store every entry or none of them
    fn put_values(&mut self, entries: Vec<(String, SettingValue)>) -> Result<(), SettingsError>;
}
