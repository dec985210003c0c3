use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MonitorConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub settings: SettingsFileConfig,
    #[serde(default)]
    pub poller: PollerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SettingsFileConfig {
    /// Where the two user options are persisted
    #[serde(default = "default_settings_path")]
    pub path: String,
}

impl Default for SettingsFileConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PollerKind {
    #[default]
    Hudson,
    Mock,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollerConfig {
    #[serde(default)]
    pub kind: PollerKind,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            kind: PollerKind::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_settings_path() -> String {
    "config/settings.toml".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Load `config/monitor.*` when present, overridden by `MONITOR__*`
/// environment variables (e.g. `MONITOR__POLLER__KIND=mock`).
pub fn load_monitor_config() -> anyhow::Result<MonitorConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/monitor").required(false))
        .add_source(config::Environment::with_prefix("MONITOR").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
