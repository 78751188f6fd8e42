//! Centralized constants for the venue-scout crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Meters per degree of latitude (approximate, varies slightly with latitude)
    pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;
}

/// External API endpoints
pub mod api {
    /// Azure Maps POI category search API
    pub const AZURE_MAPS_POI_SEARCH_URL: &str =
        "https://atlas.microsoft.com/search/poi/category/json";

    /// API version sent with every Azure Maps request
    pub const AZURE_MAPS_API_VERSION: &str = "1.0";
}
