//! venue-scout: Store-Location Scoring
//!
//! A library and CLI tool for evaluating candidate store locations. An area
//! around a center point is sampled into a grid and every cell is scored on
//! four factors: nearby competition, complementary businesses, accessibility,
//! and demand signals.
//!
//! ## Features
//!
//! - Disc-shaped sample grids with advisory cell counts
//! - Exponential distance-decay factor aggregation with min-max normalization
//! - Interactive re-weighting that reuses fetched POI data (no refetch)
//! - Badges and rationale tokens per cell
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use venue_scout::analysis::{compute_scores, generate_grid, CancelToken};
//! use venue_scout::geo::GeoPoint;
//! use venue_scout::poi::categories::CategoryClassifier;
//! use venue_scout::scoring::DEFAULT_WEIGHTS;
//!
//! let center = GeoPoint::new(44.787, 20.449); // Belgrade
//! let grid = generate_grid(center, 2.0, 250);
//!
//! // Score the grid against POI lists (empty here for brevity)
//! let cells = compute_scores(
//!     &grid,
//!     &[],
//!     &[],
//!     DEFAULT_WEIGHTS,
//!     &CategoryClassifier::default(),
//!     &CancelToken::new(),
//! )
//! .unwrap();
//! println!("Scored {} cells", cells.len());
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod format;
pub mod geo;
pub mod poi;
pub mod scoring;
pub mod server;

// Re-export commonly used types
pub use analysis::{AnalysisEngine, AnalysisInput, AnalysisResult, CancelToken, CellScore};
pub use config::Config;
pub use error::{Error, Result};
pub use geo::GeoPoint;
pub use poi::categories::BusinessType;
pub use poi::{PoiKind, PointOfInterest};
pub use scoring::Weights;
