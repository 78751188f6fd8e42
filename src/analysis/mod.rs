//! Location analysis
//!
//! This module handles:
//! - Spatial sample grid generation around a center point
//! - Per-cell factor aggregation and scoring
//! - Badge and rationale derivation
//! - The retained-context recompute path for interactive re-weighting

pub mod badges;
pub mod cancel;
pub mod engine;
pub mod grid;

pub use cancel::CancelToken;
pub use engine::{compute_scores, AnalysisEngine, RecomputeTicket};
pub use grid::{generate_grid, Grid};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::poi::categories::BusinessType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A full-analysis request: what to evaluate, where, and how wide
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub business: BusinessType,
    pub center: GeoPoint,
    pub radius_km: f64,
    /// Language tag passed through to the POI provider (e.g. "en-US")
    pub language: String,
}

impl AnalysisInput {
    /// Validate coordinates and radius
    pub fn validate(&self) -> Result<()> {
        self.center.validate()?;
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(Error::InvalidRadius(format!(
                "Radius {} km must be positive",
                self.radius_km
            )));
        }
        Ok(())
    }
}

/// One grid cell's scored result
///
/// The four indices are min-max normalized across the grid, each in [0, 1].
/// The combined score can be negative when competition dominates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellScore {
    pub position: GeoPoint,
    pub competition_index: f64,
    pub complements_index: f64,
    pub accessibility_index: f64,
    pub demand_index: f64,
    pub score: f64,
    /// How much complement/demand data informed this cell, in [0, 1]
    pub coverage_confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_badge: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supporting_badges: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rationale: Vec<String>,
    /// Grid step size, carried for cell-polygon rendering
    pub step_meters: f64,
}

/// One heat-map entry: a cell center and its score
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub lat: f64,
    pub lng: f64,
    pub intensity: f64,
}

/// One ranked entry in the top-results list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopResult {
    /// 1-based rank by descending score
    pub rank: usize,
    pub position: GeoPoint,
    pub score: f64,
    pub competition_index: f64,
    pub complements_index: f64,
    pub accessibility_index: f64,
    pub demand_index: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_badge: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supporting_badges: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rationale: Vec<String>,
}

/// Metadata stamped onto every analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub generated_at: DateTime<Utc>,
    pub competitor_count: usize,
    pub complement_count: usize,
    pub partial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

/// A complete analysis result
///
/// An empty result (no heatmap, no top results, no details) is a valid
/// outcome meaning "no data for this area", distinct from failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub input: AnalysisInput,
    pub heatmap: Vec<HeatmapCell>,
    pub top_results: Vec<TopResult>,
    pub cell_details: Vec<CellScore>,
    pub meta: AnalysisMetadata,
}

impl AnalysisResult {
    /// Whether this result carries no data for the area
    pub fn is_empty(&self) -> bool {
        self.cell_details.is_empty()
    }
}
