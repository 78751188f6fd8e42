//! Canned POI source for tests and offline runs
//!
//! Returns a fixed result on every search, the way a deterministic stand-in
//! should. Useful anywhere the Azure source's network dependency is
//! unwanted.

use crate::analysis::{AnalysisInput, CancelToken};
use crate::error::Result;
use crate::poi::{PoiSearchResult, PoiSource, PointOfInterest, SearchMetadata};
use std::sync::{Arc, Mutex};

/// POI source that returns a canned result on every search
///
/// Clones share the underlying result, so a test can keep a handle and
/// change what a source owned by an engine returns next.
#[derive(Debug, Clone)]
pub struct StaticPoiSource {
    result: Arc<Mutex<PoiSearchResult>>,
}

impl StaticPoiSource {
    /// Source returning the given competitor and complement lists
    pub fn new(competitors: Vec<PointOfInterest>, complements: Vec<PointOfInterest>) -> Self {
        let meta = SearchMetadata {
            competitor_count: competitors.len(),
            complement_count: complements.len(),
            ..SearchMetadata::default()
        };
        Self {
            result: Arc::new(Mutex::new(PoiSearchResult {
                success: true,
                competitors,
                complements,
                meta,
            })),
        }
    }

    /// Source that finds nothing (successful, empty)
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Source that fails with the given error token
    pub fn failing(error: &str) -> Self {
        Self {
            result: Arc::new(Mutex::new(PoiSearchResult::failed(error))),
        }
    }

    /// Replace the result returned by subsequent searches
    pub fn set_result(&self, result: PoiSearchResult) {
        if let Ok(mut guard) = self.result.lock() {
            *guard = result;
        }
    }
}

impl PoiSource for StaticPoiSource {
    async fn search(&self, _input: &AnalysisInput, cancel: &CancelToken) -> Result<PoiSearchResult> {
        cancel.check()?;
        let result = self
            .result
            .lock()
            .map_err(|_| crate::error::Error::PoiSearch("fixture lock poisoned".to_string()))?;
        Ok(result.clone())
    }
}
