//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage account configuration.
    #[serde(default)]
    pub storage: StorageSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Storage account configuration.
///
/// The account identifier, credential, and container name are fixed for the
/// process lifetime; all blob operations target this one container.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Storage account identifier.
    #[serde(default)]
    pub account: String,
    /// Storage account access credential.
    #[serde(default)]
    pub access_key: String,
    /// Container name holding all blobs.
    #[serde(default = "default_container")]
    pub container: String,
}

fn default_container() -> String {
    "blobgate".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            account: String::new(),
            access_key: String::new(),
            container: default_container(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BLOBGATE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
