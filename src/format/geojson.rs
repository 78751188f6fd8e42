//! GeoJSON heatmap formatter
//!
//! Emits a FeatureCollection of square cell polygons for map rendering.
//! Scores are contrast-enhanced with a robust percentile stretch (p10..p90,
//! so outliers don't flatten the ramp) and a gamma curve, then bucketed
//! into five discrete color steps.

use crate::analysis::{AnalysisResult, CellScore};
use crate::constants::geo::METERS_PER_DEGREE_LAT;
use crate::error::Result;
use crate::format::OutputFormatter;
use serde_json::{json, Value};
use std::f64::consts::PI;

/// Gamma < 1 amplifies mid/high score differences
const GAMMA: f64 = 0.6;

/// Half-size fallback when a cell carries no step size
const FALLBACK_STEP_METERS: f64 = 150.0;

/// Minimum cell count before the percentile stretch kicks in
const STRETCH_MIN_CELLS: usize = 5;

/// GeoJSON formatter - outputs the heatmap as a FeatureCollection
pub struct GeoJsonFormatter;

impl OutputFormatter for GeoJsonFormatter {
    fn name(&self) -> &str {
        "geojson"
    }

    fn description(&self) -> &str {
        "Heatmap FeatureCollection for map rendering"
    }

    fn format(&self, result: &AnalysisResult) -> Result<String> {
        let cells = &result.cell_details;
        let scores: Vec<f64> = cells.iter().map(|c| c.score).collect();

        let min = scores.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let (min, max) = if scores.is_empty() { (0.0, 1.0) } else { (min, max) };
        let range = max - min;

        let (p10, p90) = percentile_window(&scores, min, max);

        let features: Vec<Value> = cells
            .iter()
            .map(|cell| feature(cell, min, range, p10, p90))
            .collect();

        Ok(serde_json::to_string_pretty(&json!({
            "type": "FeatureCollection",
            "features": features,
        }))?)
    }
}

/// Robust stretch window: p10..p90 of the scores, falling back to the full
/// range for tiny or flat score sets
fn percentile_window(scores: &[f64], min: f64, max: f64) -> (f64, f64) {
    if scores.len() < STRETCH_MIN_CELLS {
        return (min, max);
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let pick = |p: f64| {
        let idx = (p * (sorted.len() - 1) as f64).round() as usize;
        sorted[idx.min(sorted.len() - 1)]
    };
    let p10 = pick(0.10);
    let p90 = pick(0.90);
    if p90 - p10 < 1e-9 {
        (min, max)
    } else {
        (p10, p90)
    }
}

fn feature(cell: &CellScore, min: f64, range: f64, p10: f64, p90: f64) -> Value {
    let norm = if range <= 1e-9 {
        0.0
    } else {
        ((cell.score - min) / range).clamp(0.0, 1.0)
    };
    let stretched = ((cell.score - p10) / (p90 - p10).max(1e-9)).clamp(0.0, 1.0);
    let vis = stretched.powf(GAMMA);
    let bucket = ((vis * 5.0).floor() as i64 + 1).clamp(1, 5);
    let color = match bucket {
        1 => "#2C7BB6",
        2 => "#00B3E6",
        3 => "#FFFF66",
        4 => "#FDAE61",
        _ => "#D7191C",
    };

    // Square ring around the cell center, half-size = step/2
    let step = if cell.step_meters > 0.0 {
        cell.step_meters
    } else {
        FALLBACK_STEP_METERS
    };
    let half = step / 2.0;
    let meters_per_deg_lng = METERS_PER_DEGREE_LAT * (cell.position.lat * PI / 180.0).cos();
    let d_lat = half / METERS_PER_DEGREE_LAT;
    let d_lng = half / meters_per_deg_lng;
    let (lat, lng) = (cell.position.lat, cell.position.lng);
    let ring = vec![
        vec![lng - d_lng, lat - d_lat],
        vec![lng + d_lng, lat - d_lat],
        vec![lng + d_lng, lat + d_lat],
        vec![lng - d_lng, lat + d_lat],
        vec![lng - d_lng, lat - d_lat],
    ];

    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [ring],
        },
        "properties": {
            "score": norm,
            "score_vis": vis,
            "bucket": bucket,
            "color": color,
            "score_raw": cell.score,
            "ci": cell.competition_index,
            "coi": cell.complements_index,
            "ai": cell.accessibility_index,
            "di": cell.demand_index,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::sample_result;

    #[tokio::test]
    async fn test_geojson_feature_per_cell() {
        let result = sample_result().await;
        let output = GeoJsonFormatter.format(&result).unwrap();

        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["type"], "FeatureCollection");
        let features = parsed["features"].as_array().unwrap();
        assert_eq!(features.len(), result.cell_details.len());
    }

    #[tokio::test]
    async fn test_geojson_feature_shape() {
        let result = sample_result().await;
        let output = GeoJsonFormatter.format(&result).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();

        let feature = &parsed["features"][0];
        assert_eq!(feature["geometry"]["type"], "Polygon");

        // Closed square ring: five coordinate pairs, first == last
        let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], ring[4]);

        let props = &feature["properties"];
        let bucket = props["bucket"].as_i64().unwrap();
        assert!((1..=5).contains(&bucket));
        assert!(props["color"].as_str().unwrap().starts_with('#'));
        for key in ["score", "score_vis", "score_raw", "ci", "coi", "ai", "di"] {
            assert!(props.get(key).is_some(), "missing property {key}");
        }
    }

    #[tokio::test]
    async fn test_geojson_empty_result() {
        let mut result = sample_result().await;
        result.cell_details.clear();

        let output = GeoJsonFormatter.format(&result).unwrap();
        let parsed: Value = serde_json::from_str(&output).unwrap();
        assert!(parsed["features"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_percentile_window_flat_scores_falls_back() {
        let scores = vec![1.0; 10];
        let (lo, hi) = percentile_window(&scores, 0.0, 2.0);
        assert_eq!((lo, hi), (0.0, 2.0));
    }

    #[test]
    fn test_percentile_window_trims_outliers() {
        let mut scores: Vec<f64> = (0..100).map(|i| i as f64 / 100.0).collect();
        scores.push(1000.0);
        let (_, hi) = percentile_window(&scores, 0.0, 1000.0);
        assert!(hi < 1.0, "p90 {} should ignore the outlier", hi);
    }

    #[test]
    fn test_geojson_formatter_info() {
        let formatter = GeoJsonFormatter;
        assert_eq!(formatter.name(), "geojson");
        assert!(!formatter.description().is_empty());
    }
}
