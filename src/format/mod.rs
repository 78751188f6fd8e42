//! Output formatters
//!
//! Provides trait-based output formatting for analysis results.

pub mod geojson;
pub mod json;
pub mod text;

use crate::analysis::AnalysisResult;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format an analysis result
    fn format(&self, result: &AnalysisResult) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "geojson" => Some(Box::new(geojson::GeoJsonFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Full JSON response".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable summary".to_string(),
        },
        FormatInfo {
            name: "geojson".to_string(),
            description: "Heatmap FeatureCollection for map rendering".to_string(),
        },
    ]
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::analysis::{AnalysisEngine, AnalysisInput, AnalysisResult, CancelToken};
    use crate::geo::GeoPoint;
    use crate::poi::categories::BusinessType;
    use crate::poi::fixture::StaticPoiSource;
    use crate::poi::{PoiKind, PointOfInterest};
    use crate::scoring::DEFAULT_WEIGHTS;

    fn poi(lat: f64, lng: f64, category: &str, kind: PoiKind) -> PointOfInterest {
        PointOfInterest {
            id: None,
            name: Some(format!("{category} fixture")),
            category: Some(category.to_string()),
            position: GeoPoint::new(lat, lng),
            distance_meters: 100.0,
            kind,
        }
    }

    /// A small but fully populated analysis result for formatter tests
    pub async fn sample_result() -> AnalysisResult {
        let competitors = vec![poi(44.787, 20.449, "CAFE_PUB", PoiKind::Competitor)];
        let complements = vec![
            poi(44.786, 20.448, "POI_PARKING", PoiKind::Complement),
            poi(44.788, 20.450, "POI_SCHOOL", PoiKind::Complement),
        ];
        let mut engine = AnalysisEngine::new(StaticPoiSource::new(competitors, complements));
        let input = AnalysisInput {
            business: BusinessType::Coffee,
            center: GeoPoint::new(44.787, 20.449),
            radius_km: 0.5,
            language: "en-US".to_string(),
        };
        engine
            .analyze(input, DEFAULT_WEIGHTS, &CancelToken::new())
            .await
            .expect("fixture analysis should succeed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_formatter() {
        assert!(get_formatter("json").is_some());
        assert!(get_formatter("text").is_some());
        assert!(get_formatter("geojson").is_some());
        assert!(get_formatter("unknown").is_none());
    }

    #[test]
    fn test_get_formatter_case_insensitive() {
        assert!(get_formatter("JSON").is_some());
        assert!(get_formatter("GeoJSON").is_some());
    }

    #[test]
    fn test_available_formats() {
        let formats = available_formats();
        assert_eq!(formats.len(), 3);
        assert!(formats.iter().any(|f| f.name == "json"));
        assert!(formats.iter().any(|f| f.name == "text"));
        assert!(formats.iter().any(|f| f.name == "geojson"));
    }
}
