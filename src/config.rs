use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub mapbox: MapboxSettings,
    #[serde(default)]
    pub geocoding: GeocodingSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapboxSettings {
    /// Gates both geocoding and the map; absent or blank means unavailable
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_mapbox_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MapboxSettings {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: default_mapbox_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MapboxSettings {
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

fn default_mapbox_base_url() -> String { crate::services::geocoding::DEFAULT_BASE_URL.to_string() }
fn default_timeout_secs() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingSettings {
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_types")]
    pub types: String,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u8,
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            country: default_country(),
            types: default_types(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}

fn default_country() -> String { "US".to_string() }
fn default_types() -> String { "address,poi".to_string() }
fn default_suggestion_limit() -> u8 { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_ttl() -> u64 { 3600 }
fn default_cache_capacity() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self { max_results: default_max_results() }
    }
}

fn default_max_results() -> usize { crate::core::ranker::DEFAULT_MAX_RESULTS }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON file replacing the built-in sample firms
    #[serde(default)]
    pub path: Option<String>,
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
fn default_log_format() -> String { "full".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with CLOSING_)
    /// 5. MAPBOX_ACCESS_TOKEN, if set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., CLOSING__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("CLOSING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("CLOSING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }
}

/// Apply the conventional `MAPBOX_ACCESS_TOKEN` variable on top of the
/// prefixed configuration
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    let token = std::env::var("MAPBOX_ACCESS_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());

    let mut builder = Config::builder().add_source(settings);
    if let Some(token) = token {
        builder = builder.set_override("mapbox.access_token", token)?;
    }

    builder.build()
}
