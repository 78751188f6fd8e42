//! Azure Maps POI search source
//!
//! Queries the Azure Maps POI category search API once per kind (competitor
//! and complement category sets), paging up to a small fixed limit. The
//! provider reports each POI's distance from the query center, so no local
//! distance computation happens here.

use crate::analysis::{AnalysisInput, CancelToken};
use crate::constants::api::{AZURE_MAPS_API_VERSION, AZURE_MAPS_POI_SEARCH_URL};
use crate::error::Result;
use crate::geo::GeoPoint;
use crate::poi::categories::category_sets;
use crate::poi::{PoiKind, PoiSearchResult, PoiSource, PointOfInterest, SearchMetadata};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, warn};

/// Results requested per page
const PAGE_LIMIT: usize = 50;

/// Pages fetched per category set (100 POIs per kind)
const MAX_PAGES: usize = 2;

/// Azure Maps POI search source
#[derive(Debug, Clone)]
pub struct AzureMapsSource {
    client: reqwest::Client,
    subscription_key: String,
}

/// Top-level search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

/// One search result entry; optional fields tolerate malformed entries
#[derive(Debug, Deserialize)]
struct SearchResult {
    id: Option<String>,
    dist: Option<f64>,
    poi: Option<PoiInfo>,
    position: Option<Position>,
}

#[derive(Debug, Deserialize)]
struct PoiInfo {
    name: Option<String>,
    classifications: Option<Vec<Classification>>,
    categories: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct Classification {
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Position {
    lat: f64,
    lon: f64,
}

impl AzureMapsSource {
    /// Create a new source with a subscription key
    ///
    /// An empty key is allowed; searches will then fail softly with a
    /// `missing_api_key` error token instead of hitting the network.
    pub fn new(subscription_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("venue-scout/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            subscription_key: subscription_key.into(),
        }
    }

    fn build_url(&self, categories: &[&str], input: &AnalysisInput, offset: usize) -> String {
        let radius_meters = (input.radius_km * 1000.0).round() as i64;
        let category_set = categories.join(",");
        format!(
            "{}?api-version={}&subscription-key={}&lat={}&lon={}&radius={}&limit={}&ofs={}&language={}&categorySet={}",
            AZURE_MAPS_POI_SEARCH_URL,
            AZURE_MAPS_API_VERSION,
            urlencoding::encode(&self.subscription_key),
            input.center.lat,
            input.center.lng,
            radius_meters,
            PAGE_LIMIT,
            offset,
            urlencoding::encode(&input.language),
            urlencoding::encode(&category_set),
        )
    }

    /// Convert a parsed response page into POIs, skipping malformed entries
    fn collect_pois(response: SearchResponse, kind: PoiKind, out: &mut Vec<PointOfInterest>) -> usize {
        let page_len = response.results.len();
        for entry in response.results {
            let Some(position) = entry.position else {
                continue;
            };
            let category = entry.poi.as_ref().and_then(|p| {
                p.classifications
                    .as_ref()
                    .and_then(|cl| cl.first())
                    .and_then(|c| c.code.clone())
                    .or_else(|| p.categories.as_ref().and_then(|c| c.first().cloned()))
            });
            out.push(PointOfInterest {
                id: entry.id,
                name: entry.poi.and_then(|p| p.name),
                category,
                position: GeoPoint::new(position.lat, position.lon),
                distance_meters: entry.dist.unwrap_or(0.0),
                kind,
            });
        }
        page_len
    }

    /// Fetch up to `MAX_PAGES` pages for one category set
    ///
    /// Returns the POIs and whether the set is partial (a page failed).
    async fn query_category_set(
        &self,
        categories: &[&str],
        input: &AnalysisInput,
        kind: PoiKind,
        cancel: &CancelToken,
    ) -> Result<(Vec<PointOfInterest>, bool)> {
        let mut pois = Vec::new();
        let mut partial = false;

        for page in 0..MAX_PAGES {
            cancel.check()?;
            let url = self.build_url(categories, input, page * PAGE_LIMIT);
            let response = match self.client.get(&url).send().await {
                Ok(r) => r,
                Err(e) => {
                    warn!("POI page fetch failed: {}", e);
                    partial = true;
                    break;
                }
            };
            if !response.status().is_success() {
                warn!("POI page returned status {}", response.status());
                partial = true;
                break;
            }
            let parsed: SearchResponse = match response.json().await {
                Ok(p) => p,
                Err(e) => {
                    warn!("POI page parse failed: {}", e);
                    partial = true;
                    break;
                }
            };
            let page_len = Self::collect_pois(parsed, kind, &mut pois);
            if page_len < PAGE_LIMIT {
                break; // no more pages
            }
        }

        Ok((pois, partial))
    }
}

impl PoiSource for AzureMapsSource {
    async fn search(&self, input: &AnalysisInput, cancel: &CancelToken) -> Result<PoiSearchResult> {
        if self.subscription_key.trim().is_empty() {
            return Ok(PoiSearchResult::failed("missing_api_key"));
        }

        let started = Instant::now();
        let sets = category_sets(input.business);

        let (competitors, competitors_partial) = self
            .query_category_set(&sets.competitors, input, PoiKind::Competitor, cancel)
            .await?;
        let (complements, complements_partial) = self
            .query_category_set(&sets.complements, input, PoiKind::Complement, cancel)
            .await?;

        let partial = competitors_partial || complements_partial;
        debug!(
            "POI search for {}: {} competitors, {} complements (partial: {})",
            input.business,
            competitors.len(),
            complements.len(),
            partial
        );

        let meta = SearchMetadata {
            competitor_count: competitors.len(),
            complement_count: complements.len(),
            partial,
            warning: partial.then(|| "partial_results".to_string()),
            error: None,
            latency_ms: Some(started.elapsed().as_millis() as u64),
        };

        Ok(PoiSearchResult {
            success: true,
            competitors,
            complements,
            meta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poi::categories::BusinessType;

    fn test_input() -> AnalysisInput {
        AnalysisInput {
            business: BusinessType::Coffee,
            center: GeoPoint::new(44.787, 20.449),
            radius_km: 2.0,
            language: "en-US".to_string(),
        }
    }

    #[test]
    fn test_build_url() {
        let source = AzureMapsSource::new("secret-key");
        let url = source.build_url(&["CAFE_PUB", "COFFEE_SHOP"], &test_input(), 50);

        assert!(url.starts_with(AZURE_MAPS_POI_SEARCH_URL));
        assert!(url.contains("subscription-key=secret-key"));
        assert!(url.contains("radius=2000"));
        assert!(url.contains("ofs=50"));
        assert!(url.contains("categorySet=CAFE_PUB%2CCOFFEE_SHOP"));
    }

    #[test]
    fn test_collect_pois_skips_malformed_entries() {
        let json = r#"{
            "results": [
                {
                    "id": "poi-1",
                    "dist": 120.5,
                    "poi": {
                        "name": "Corner Cafe",
                        "classifications": [{"code": "CAFE_PUB"}]
                    },
                    "position": {"lat": 44.79, "lon": 20.45}
                },
                {
                    "id": "poi-2",
                    "poi": {"name": "No Position"}
                },
                {
                    "id": "poi-3",
                    "poi": {
                        "name": "Category Fallback",
                        "categories": ["parking"]
                    },
                    "position": {"lat": 44.78, "lon": 20.44}
                }
            ]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let mut pois = Vec::new();
        let page_len = AzureMapsSource::collect_pois(response, PoiKind::Competitor, &mut pois);

        // Page length counts all entries; only well-formed ones are kept
        assert_eq!(page_len, 3);
        assert_eq!(pois.len(), 2);
        assert_eq!(pois[0].category.as_deref(), Some("CAFE_PUB"));
        assert!((pois[0].distance_meters - 120.5).abs() < 1e-9);
        assert_eq!(pois[1].category.as_deref(), Some("parking"));
        assert_eq!(pois[1].distance_meters, 0.0);
    }

    #[test]
    fn test_empty_response_parses() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_fails_softly() {
        let source = AzureMapsSource::new("");
        let result = source
            .search(&test_input(), &CancelToken::new())
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.meta.error.as_deref(), Some("missing_api_key"));
    }

    #[tokio::test]
    async fn test_cancelled_before_fetch() {
        let source = AzureMapsSource::new("some-key");
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = source.search(&test_input(), &cancel).await.unwrap_err();
        assert!(matches!(err, crate::error::Error::Cancelled));
    }
}
