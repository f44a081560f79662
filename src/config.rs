use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::services::LoadPolicy;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }

/// Where the trained model lives and how it is acquired
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    /// Content identifier of the artifact in the remote store
    #[serde(default = "default_file_id")]
    pub file_id: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_local_path")]
    pub local_path: PathBuf,
    /// When false, only a pre-placed local artifact is used
    #[serde(default = "default_true")]
    pub fetch_enabled: bool,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_fetch_retries")]
    pub fetch_retries: u32,
    #[serde(default)]
    pub load_policy: LoadPolicy,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            file_id: default_file_id(),
            base_url: default_base_url(),
            local_path: default_local_path(),
            fetch_enabled: true,
            fetch_timeout_secs: default_fetch_timeout(),
            fetch_retries: default_fetch_retries(),
            load_policy: LoadPolicy::default(),
        }
    }
}

fn default_file_id() -> String { "1L89dc0hzPiLciEQaI5qJ2Y6OmPdFwO7b".to_string() }
fn default_base_url() -> String { "https://drive.google.com/uc".to_string() }
fn default_local_path() -> PathBuf { PathBuf::from("data/fare_model.json") }
fn default_fetch_timeout() -> u64 { 120 }
fn default_fetch_retries() -> u32 { 1 }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default = "default_map_style")]
    pub style_url: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: default_zoom(),
            pitch: 0.0,
            style_url: default_map_style(),
        }
    }
}

fn default_zoom() -> f64 { crate::core::route::DEFAULT_ZOOM }
fn default_map_style() -> String { crate::core::route::DEFAULT_MAP_STYLE.to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationSettings {
    /// Accept itineraries whose source and destination are the same city
    #[serde(default)]
    pub allow_same_city: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FARE_)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FARE__MODEL__LOCAL_PATH -> model.local_path
            .add_source(
                Environment::with_prefix("FARE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FARE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_model_settings() {
        let model = ModelSettings::default();
        assert_eq!(model.fetch_retries, 1);
        assert!(model.fetch_enabled);
        assert_eq!(model.load_policy, LoadPolicy::Lazy);
        assert_eq!(model.local_path, PathBuf::from("data/fare_model.json"));
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file_fills_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9000\n\n[model]\nload_policy = \"eager\"\n\n[validation]\nallow_same_city = true"
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.model.load_policy, LoadPolicy::Eager);
        assert!(settings.validation.allow_same_city);
        assert_eq!(settings.map.zoom, 4.0);
    }
}
