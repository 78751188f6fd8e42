//! Points of interest
//!
//! The POI model and the search-source trait. A source resolves a business
//! type and an area into competitor and complement point lists in a single
//! call; the analysis engine never talks to a provider directly.

pub mod azure;
pub mod categories;
pub mod fixture;

use crate::analysis::{AnalysisInput, CancelToken};
use crate::error::Result;
use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// Classification of a POI relative to the business under evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiKind {
    /// Same-category business competing for the same customers
    Competitor,
    /// Synergistic-category business that drives foot traffic
    Complement,
}

/// A point of interest returned by a search source
///
/// Immutable once received; the engine only reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointOfInterest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Provider category code (e.g. "POI_PARKING")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub position: GeoPoint,
    /// Distance from the query center, as reported by the provider
    pub distance_meters: f64,
    pub kind: PoiKind,
}

/// Metadata accompanying a search result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMetadata {
    pub competitor_count: usize,
    pub complement_count: usize,
    /// Some pages could not be fetched; the lists are incomplete
    pub partial: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

/// Result of a POI search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoiSearchResult {
    pub success: bool,
    pub competitors: Vec<PointOfInterest>,
    pub complements: Vec<PointOfInterest>,
    pub meta: SearchMetadata,
}

impl PoiSearchResult {
    /// A failed result carrying an error token
    pub fn failed(error: &str) -> Self {
        Self {
            success: false,
            meta: SearchMetadata {
                error: Some(error.to_string()),
                ..SearchMetadata::default()
            },
            ..Self::default()
        }
    }

    /// Whether both point lists are empty
    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty() && self.complements.is_empty()
    }

    /// Whether the result carries data the engine can score
    pub fn usable(&self) -> bool {
        self.success && !self.is_empty()
    }
}

/// Trait for POI search sources
///
/// Implementations must be thread-safe (Send + Sync) to work with the async
/// server. A source reports transport-level trouble through the result's
/// `success` flag and `meta.error`; an `Err` return is reserved for
/// cancellation and programming errors.
pub trait PoiSource: Send + Sync {
    /// Search for competitor and complement POIs around the input's center
    fn search(
        &self,
        input: &AnalysisInput,
        cancel: &CancelToken,
    ) -> impl std::future::Future<Output = Result<PoiSearchResult>> + Send;
}
