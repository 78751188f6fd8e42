//! Error types for venue-scout

use thiserror::Error;

/// Main error type for venue-scout operations
#[derive(Error, Debug)]
pub enum Error {
    /// `recompute` was called before any successful `analyze`. A precondition
    /// violation, not a transient failure; callers must run a full analysis.
    #[error("no cached analysis available for recompute")]
    NoCachedAnalysis,

    /// The caller cancelled an in-flight operation. Distinct from both
    /// success and failure so callers don't surface it as an error.
    #[error("operation cancelled")]
    Cancelled,

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid radius: {0}")]
    InvalidRadius(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("POI search error: {0}")]
    PoiSearch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for venue-scout operations
pub type Result<T> = std::result::Result<T, Error>;
