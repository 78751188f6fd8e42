//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default business type to analyze
pub const DEFAULT_BUSINESS: &str = "coffee";

/// Default search radius in kilometers
pub const DEFAULT_RADIUS_KM: f64 = 2.0;

/// Default language tag passed to the POI provider
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default weight slider percentages
pub const DEFAULT_COMPLEMENTS_PCT: f64 = 35.0;
pub const DEFAULT_ACCESSIBILITY_PCT: f64 = 25.0;
pub const DEFAULT_DEMAND_PCT: f64 = 25.0;
pub const DEFAULT_COMPETITION_PCT: f64 = 35.0;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "venue-scout";
