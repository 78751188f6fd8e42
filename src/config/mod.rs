//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/venue-scout/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use crate::scoring::Weights;
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Default values for analysis
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Weight slider percentages
    #[serde(default)]
    pub weights: WeightsConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysConfig,
}

/// Default values for analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default business type
    #[serde(default = "default_business")]
    pub business: String,

    /// Default search radius in kilometers
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,

    /// Language tag passed to the POI provider
    #[serde(default = "default_language")]
    pub language: String,
}

/// Weight slider percentages (0-100 each)
///
/// Converted to scoring weights via the percentage normalization rule;
/// see `Weights::from_percentages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_complements_pct")]
    pub complements_pct: f64,

    #[serde(default = "default_accessibility_pct")]
    pub accessibility_pct: f64,

    #[serde(default = "default_demand_pct")]
    pub demand_pct: f64,

    #[serde(default = "default_competition_pct")]
    pub competition_pct: f64,
}

impl WeightsConfig {
    /// Convert the stored percentages into scoring weights
    pub fn to_weights(&self) -> Weights {
        Weights::from_percentages(
            self.complements_pct,
            self.accessibility_pct,
            self.demand_pct,
            self.competition_pct,
        )
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// API keys for external services
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiKeysConfig {
    /// Azure Maps subscription key
    #[serde(default)]
    pub azure_maps: String,
}

// Default value functions for serde
fn default_business() -> String {
    DEFAULT_BUSINESS.to_string()
}
fn default_radius_km() -> f64 {
    DEFAULT_RADIUS_KM
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_complements_pct() -> f64 {
    DEFAULT_COMPLEMENTS_PCT
}
fn default_accessibility_pct() -> f64 {
    DEFAULT_ACCESSIBILITY_PCT
}
fn default_demand_pct() -> f64 {
    DEFAULT_DEMAND_PCT
}
fn default_competition_pct() -> f64 {
    DEFAULT_COMPETITION_PCT
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

// Implement Default traits
impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig::default(),
            weights: WeightsConfig::default(),
            server: ServerConfig::default(),
            api_keys: ApiKeysConfig::default(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            business: default_business(),
            radius_km: default_radius_km(),
            format: default_format(),
            language: default_language(),
        }
    }
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            complements_pct: default_complements_pct(),
            accessibility_pct: default_accessibility_pct(),
            demand_pct: default_demand_pct(),
            competition_pct: default_competition_pct(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            // Create default config
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        // Ensure directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "business"] => Some(self.defaults.business.clone()),
            ["defaults", "radius_km"] => Some(self.defaults.radius_km.to_string()),
            ["defaults", "format"] => Some(self.defaults.format.clone()),
            ["defaults", "language"] => Some(self.defaults.language.clone()),

            ["weights", "complements_pct"] => Some(self.weights.complements_pct.to_string()),
            ["weights", "accessibility_pct"] => Some(self.weights.accessibility_pct.to_string()),
            ["weights", "demand_pct"] => Some(self.weights.demand_pct.to_string()),
            ["weights", "competition_pct"] => Some(self.weights.competition_pct.to_string()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["api_keys", "azure_maps"] => Some(self.api_keys.azure_maps.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "business"] => {
                self.defaults.business = value.to_string();
            }
            ["defaults", "radius_km"] => {
                self.defaults.radius_km = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid radius value: {}", value)))?;
            }
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }
            ["defaults", "language"] => {
                self.defaults.language = value.to_string();
            }

            ["weights", "complements_pct"] => {
                self.weights.complements_pct = parse_pct(value)?;
            }
            ["weights", "accessibility_pct"] => {
                self.weights.accessibility_pct = parse_pct(value)?;
            }
            ["weights", "demand_pct"] => {
                self.weights.demand_pct = parse_pct(value)?;
            }
            ["weights", "competition_pct"] => {
                self.weights.competition_pct = parse_pct(value)?;
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["api_keys", "azure_maps"] => {
                self.api_keys.azure_maps = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.business",
            "defaults.radius_km",
            "defaults.format",
            "defaults.language",
            "weights.complements_pct",
            "weights.accessibility_pct",
            "weights.demand_pct",
            "weights.competition_pct",
            "server.host",
            "server.port",
            "api_keys.azure_maps",
        ]
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_pct(value: &str) -> Result<f64> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid percentage value: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::env;
    use tempfile::TempDir;

    fn with_temp_config<F: FnOnce()>(f: F) {
        let temp_dir = TempDir::new().unwrap();
        env::set_var("XDG_CONFIG_HOME", temp_dir.path());
        f();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.defaults.business, "coffee");
        assert_eq!(config.defaults.radius_km, 2.0);
        assert_eq!(config.defaults.format, "text");
        assert_eq!(config.server.port, 7878);
        assert!(config.api_keys.azure_maps.is_empty());
    }

    #[test]
    fn test_default_weights_match_scoring_defaults() {
        let weights = Config::default().weights.to_weights();
        assert_abs_diff_eq!(weights.competition, 0.35, epsilon = 0.001);
        let pos = weights.complements + weights.accessibility + weights.demand;
        assert_abs_diff_eq!(pos, 0.65, epsilon = 0.001);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("defaults.business"), Some("coffee".to_string()));

        config.set("defaults.business", "pharmacy").unwrap();
        assert_eq!(config.get("defaults.business"), Some("pharmacy".to_string()));

        config.set("defaults.radius_km", "3.5").unwrap();
        assert_eq!(config.defaults.radius_km, 3.5);

        config.set("weights.competition_pct", "50").unwrap();
        assert_eq!(config.weights.competition_pct, 50.0);
    }

    #[test]
    fn test_get_invalid_key() {
        let config = Config::default();
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_set_invalid_key() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
    }

    #[test]
    fn test_set_invalid_value() {
        let mut config = Config::default();
        assert!(config.set("defaults.radius_km", "not_a_number").is_err());
        assert!(config.set("weights.demand_pct", "lots").is_err());
        assert!(config.set("server.port", "-1").is_err());
    }

    #[test]
    fn test_save_and_load() {
        with_temp_config(|| {
            let mut config = Config::default();
            config.defaults.business = "grocery".to_string();
            config.api_keys.azure_maps = "test-key".to_string();
            config.save().unwrap();

            let loaded = Config::load().unwrap();
            assert_eq!(loaded.defaults.business, "grocery");
            assert_eq!(loaded.api_keys.azure_maps, "test-key");
        });
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let loaded: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded.defaults.business, "coffee");
        assert_eq!(loaded.weights.complements_pct, 35.0);
        assert_eq!(loaded.server.port, 7878);
    }

    #[test]
    fn test_serialization_format() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();

        assert!(toml.contains("[defaults]"));
        assert!(toml.contains("[weights]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[api_keys]"));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let loaded: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.defaults.business, "coffee");
        assert_eq!(loaded.weights.competition_pct, 35.0);
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7878");
    }

    #[test]
    fn test_available_keys() {
        let keys = Config::available_keys();
        assert!(keys.contains(&"defaults.business"));
        assert!(keys.contains(&"weights.competition_pct"));
        assert!(keys.contains(&"api_keys.azure_maps"));
    }
}
