//! Configuration: TOML file, environment, then command-line overrides

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::locate::{Locator, DEFAULT_LOCATE_URL};
use crate::state::{Coordinates, RecoveryPolicy, DEFAULT_CITY};

/// Environment variable consulted for the provider key
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const APP_DIR: &str = "skypanel";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no OpenWeather API key configured (set OPENWEATHER_API_KEY, pass --api-key, or add `api_key` under [provider])")]
    MissingApiKey,
}

/// Provider endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openweathermap.org/data/2.5".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Location service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub enabled: bool,
    pub url: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: DEFAULT_LOCATE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_city: String,
    pub recovery: RecoveryPolicy,
    pub log_file: Option<PathBuf>,
    pub provider: ProviderConfig,
    pub location: LocationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            recovery: RecoveryPolicy::default(),
            log_file: None,
            provider: ProviderConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

/// Values taken from the command line; `Some` wins over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub default_city: Option<String>,
    pub recovery: Option<RecoveryPolicy>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub coords: Option<Coordinates>,
    pub no_locate: bool,
}

impl Config {
    /// Platform config file location (`<config_dir>/skypanel/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Load from `path`, or return defaults when the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Fill the API key from the environment when the file left it empty.
    pub fn with_env_key(mut self, env_key: Option<String>) -> Self {
        if self.provider.api_key.is_empty() {
            if let Some(key) = env_key.filter(|k| !k.trim().is_empty()) {
                self.provider.api_key = key;
            }
        }
        self
    }

    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(city) = &overrides.default_city {
            self.default_city = city.clone();
        }
        if let Some(recovery) = overrides.recovery {
            self.recovery = recovery;
        }
        if let Some(key) = &overrides.api_key {
            self.provider.api_key = key.clone();
        }
        if let Some(url) = &overrides.base_url {
            self.provider.base_url = url.clone();
        }
        if let Some(path) = &overrides.log_file {
            self.log_file = Some(path.clone());
        }
        if overrides.no_locate {
            self.location.enabled = false;
        }
        self
    }

    /// Fail early when no credential is available.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(())
    }

    /// Fixed coordinates beat the lookup; a disabled service beats both.
    pub fn locator(&self, fixed: Option<Coordinates>) -> Locator {
        if !self.location.enabled {
            return Locator::Disabled;
        }
        match fixed {
            Some(coords) => Locator::Fixed(coords),
            None => Locator::IpLookup {
                url: self.location.url.clone(),
            },
        }
    }

    /// Log file path, defaulting to `<data_local_dir>/skypanel/skypanel.log`
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            dirs_next::data_local_dir()
                .map(|dir| dir.join(APP_DIR))
                .unwrap_or_else(|| PathBuf::from("."))
                .join("skypanel.log")
        })
    }
}
