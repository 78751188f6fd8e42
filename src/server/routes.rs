//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::analysis::{AnalysisInput, AnalysisResult, CancelToken};
use crate::error::Error;
use crate::format::{available_formats, FormatInfo};
use crate::geo::GeoPoint;
use crate::poi::categories::{available_businesses, category_sets, BusinessType};
use crate::scoring::Weights;
use crate::server::state::AppState;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tower_http::services::ServeDir;

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    // Determine static files path
    // Try relative to cwd first, then fallback to common locations
    let static_path = if std::path::Path::new("static").exists() {
        "static".to_string()
    } else if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let path = exe_dir.join("static");
            if path.exists() {
                path.to_string_lossy().to_string()
            } else {
                "static".to_string()
            }
        } else {
            "static".to_string()
        }
    } else {
        "static".to_string()
    };

    Router::new()
        .route("/api/analyze", post(analyze_handler))
        .route("/api/recompute", post(recompute_handler))
        .route("/api/status", get(status_handler))
        .route("/api/businesses", get(businesses_handler))
        .route("/api/formats", get(formats_handler))
        .nest_service("/", ServeDir::new(&static_path).append_index_html_on_directories(true))
        .with_state(state)
}

/// Weight slider percentages (0-100 each) as sent by interactive clients
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightsPercent {
    pub complements: f64,
    pub accessibility: f64,
    pub demand: f64,
    pub competition: f64,
}

impl WeightsPercent {
    fn to_weights(self) -> Weights {
        Weights::from_percentages(
            self.complements,
            self.accessibility,
            self.demand,
            self.competition,
        )
    }
}

/// Analyze request body
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Business type name (e.g. "coffee")
    pub business: String,
    /// Latitude of the area center
    pub lat: f64,
    /// Longitude of the area center
    pub lng: f64,
    /// Search radius in kilometers; falls back to the configured default
    pub radius_km: Option<f64>,
    /// Language tag for the POI provider; falls back to the configured default
    pub language: Option<String>,
    /// Weight percentages; falls back to the configured defaults
    pub weights: Option<WeightsPercent>,
}

/// Recompute request body
#[derive(Debug, Deserialize)]
pub struct RecomputeRequest {
    pub weights: WeightsPercent,
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "NO_CACHED_ANALYSIS" | "CANCELLED" => StatusCode::CONFLICT,
            "INVALID_COORDINATES" | "INVALID_RADIUS" | "INVALID_BUSINESS" | "CONFIG_ERROR" => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        (status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::NoCachedAnalysis => "NO_CACHED_ANALYSIS",
            Error::Cancelled => "CANCELLED",
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::InvalidRadius(_) => "INVALID_RADIUS",
            Error::Config(_) => "CONFIG_ERROR",
            Error::PoiSearch(_) => "POI_SEARCH_ERROR",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Full analysis endpoint
///
/// POST /api/analyze
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let business = BusinessType::from_str(&req.business).map_err(|e| ApiError {
        error: e,
        code: "INVALID_BUSINESS".to_string(),
    })?;

    let (radius_km, language, weights) = {
        let config = state.config.read().await;
        (
            req.radius_km.unwrap_or(config.defaults.radius_km),
            req.language
                .clone()
                .unwrap_or_else(|| config.defaults.language.clone()),
            req.weights
                .map(WeightsPercent::to_weights)
                .unwrap_or_else(|| config.weights.to_weights()),
        )
    };

    let input = AnalysisInput {
        business,
        center: GeoPoint::new(req.lat, req.lng),
        radius_km,
        language,
    };

    let mut engine = state.engine.write().await;
    let result = engine
        .analyze(input, weights, &CancelToken::new())
        .await
        .map_err(ApiError::from)?;

    Ok(Json(result))
}

/// Weight-only recompute endpoint
///
/// POST /api/recompute
///
/// Reuses the grid and POI lists retained by the last full analysis. A new
/// request supersedes any in-flight recompute.
async fn recompute_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecomputeRequest>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let token = state.supersede_recompute().await;
    let engine = state.engine.read().await;
    let result = engine
        .recompute(req.weights.to_weights(), &token)
        .map_err(ApiError::from)?;

    Ok(Json(result))
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Whether a retained analysis exists, making recompute possible
    pub has_cached_analysis: bool,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let has_cached_analysis = state.engine.read().await.has_cached_analysis();
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        has_cached_analysis,
    })
}

/// Information about a supported business type
#[derive(Debug, Serialize, Deserialize)]
pub struct BusinessInfo {
    pub name: String,
    pub competitor_categories: Vec<String>,
    pub complement_categories: Vec<String>,
}

/// Supported business types endpoint
///
/// GET /api/businesses
async fn businesses_handler() -> Json<Vec<BusinessInfo>> {
    let businesses = available_businesses()
        .into_iter()
        .map(|business| {
            let sets = category_sets(business);
            BusinessInfo {
                name: business.to_string(),
                competitor_categories: sets.competitors.iter().map(|s| s.to_string()).collect(),
                complement_categories: sets.complements.iter().map(|s| s.to_string()).collect(),
            }
        })
        .collect();
    Json(businesses)
}

/// Available output formats endpoint
///
/// GET /api/formats
async fn formats_handler() -> Json<Vec<FormatInfo>> {
    Json(available_formats())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_router() -> Router {
        create_router(Arc::new(AppState::new(Config::default())))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let response = test_router()
            .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["running"], true);
        assert_eq!(json["has_cached_analysis"], false);
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn test_recompute_before_analyze_conflicts() {
        let body = serde_json::json!({
            "weights": {
                "complements": 35.0,
                "accessibility": 25.0,
                "demand": 25.0,
                "competition": 35.0
            }
        });
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/recompute")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = body_json(response).await;
        assert_eq!(json["code"], "NO_CACHED_ANALYSIS");
    }

    #[tokio::test]
    async fn test_analyze_without_api_key_returns_empty_result() {
        // No Azure Maps key configured: the POI source fails softly and the
        // engine returns a valid, empty result
        let body = serde_json::json!({
            "business": "coffee",
            "lat": 44.787,
            "lng": 20.449
        });
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert!(json["cell_details"].as_array().unwrap().is_empty());
        assert_eq!(json["meta"]["error"], "missing_api_key");
    }

    #[tokio::test]
    async fn test_analyze_rejects_unknown_business() {
        let body = serde_json::json!({
            "business": "bowling",
            "lat": 44.787,
            "lng": 20.449
        });
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_BUSINESS");
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_coordinates() {
        let body = serde_json::json!({
            "business": "coffee",
            "lat": 95.0,
            "lng": 20.449
        });
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/analyze")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_COORDINATES");
    }

    #[tokio::test]
    async fn test_businesses_endpoint() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/businesses")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let businesses = json.as_array().unwrap();
        assert_eq!(businesses.len(), 5);
        assert!(businesses.iter().any(|b| b["name"] == "coffee"));
        assert!(businesses
            .iter()
            .all(|b| !b["competitor_categories"].as_array().unwrap().is_empty()));
    }

    #[tokio::test]
    async fn test_formats_endpoint() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/formats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 3);
    }
}
