// Options bridge - the two user settings backing the monitor
use crate::application::scheduler::DEFAULT_POLLING_INTERVAL_MINUTES;
use crate::application::settings_store::{SettingValue, SettingsError, SettingsStore};
use serde::{Deserialize, Serialize};

pub const URLS_KEY: &str = "hudsonUrlsProp";
pub const INTERVAL_KEY: &str = "intervalMinutesProp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Comma-separated view URLs
    pub urls: String,
    pub interval_minutes: u32,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            urls: String::new(),
            interval_minutes: DEFAULT_POLLING_INTERVAL_MINUTES,
        }
    }
}

pub struct OptionsBridge {
    store: Box<dyn SettingsStore>,
}

impl OptionsBridge {
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        Self { store }
    }

    pub fn initialize_defaults(&mut self) -> Result<(), SettingsError> {
        let defaults = MonitorSettings::default();
        self.store
            .put_default_value(URLS_KEY, SettingValue::Text(defaults.urls))?;
        self.store.put_default_value(
            INTERVAL_KEY,
            SettingValue::Integer(i64::from(defaults.interval_minutes)),
        )?;
        Ok(())
    }

    pub fn read(&self) -> MonitorSettings {
        let urls = self
            .store
            .get_value(URLS_KEY)
            .map(|v| v.as_text())
            .unwrap_or_default();

        let raw_interval = self.store.get_value(INTERVAL_KEY);
        let interval_minutes = match raw_interval.as_ref().and_then(SettingValue::as_integer) {
            Some(minutes) if minutes > 0 => u32::try_from(minutes).unwrap_or(u32::MAX),
            _ => {
                if raw_interval.is_some() {
                    tracing::warn!(
                        value = ?raw_interval,
                        "invalid polling interval, using {} minutes",
                        DEFAULT_POLLING_INTERVAL_MINUTES
                    );
                }
                DEFAULT_POLLING_INTERVAL_MINUTES
            }
        };

        MonitorSettings {
            urls,
            interval_minutes,
        }
    }

    /// Validate and persist new settings. The caller triggers the reload.
    pub fn update(&mut self, urls: String, interval_minutes: i64) -> Result<(), SettingsError> {
        if interval_minutes <= 0 || interval_minutes > i64::from(u32::MAX) {
            return Err(SettingsError::InvalidInterval(interval_minutes));
        }

        self.store.put_values(vec![
            (URLS_KEY.to_string(), SettingValue::Text(urls)),
            (INTERVAL_KEY.to_string(), SettingValue::Integer(interval_minutes)),
        ])
    }
}
