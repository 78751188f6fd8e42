//! Analysis engine
//!
//! Factor aggregation, scoring, and the retained-context recompute path.
//! Every cell's raw indices depend only on its own coordinates and the
//! read-only POI lists; the one cross-cell step is the final per-factor
//! min-max normalization pass.

use crate::analysis::badges;
use crate::analysis::cancel::CancelToken;
use crate::analysis::grid::{generate_grid, Grid, DEFAULT_TARGET_CELLS};
use crate::analysis::{
    AnalysisInput, AnalysisMetadata, AnalysisResult, CellScore, HeatmapCell, TopResult,
};
use crate::error::{Error, Result};
use crate::geo::haversine_distance;
use crate::poi::categories::CategoryClassifier;
use crate::poi::{PoiSearchResult, PoiSource, PointOfInterest, SearchMetadata};
use crate::scoring::{self, Weights};
use chrono::Utc;
use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Characteristic decay length for the competition kernel, in meters
pub const COMPETITION_DECAY_METERS: f64 = 300.0;

/// Characteristic decay length for the complement kernel, in meters;
/// complementary synergy matters at shorter range than competition
pub const COMPLEMENT_DECAY_METERS: f64 = 200.0;

/// Share of general complement density assumed for accessibility/demand
/// when no category-tagged complement is found. A heuristic, not a
/// measured value; tunable.
pub const MISSING_SIGNAL_FALLBACK_SHARE: f64 = 0.5;

/// Number of entries in the ranked top-results list
pub const TOP_RESULT_COUNT: usize = 10;

/// Below this raw range a factor is uniform across the grid and every
/// cell normalizes to 0
const NORMALIZE_EPSILON: f64 = 1e-9;

/// Cells scored between cancellation checks
const CANCEL_CHECK_INTERVAL: usize = 64;

/// The retained inputs of the last successful full analysis
///
/// Owned exclusively by the engine, replaced wholesale, never handed out
/// by reference.
struct AnalysisContext {
    input: AnalysisInput,
    grid: Grid,
    pois: PoiSearchResult,
}

/// Claim on a recompute generation
///
/// A recompute only commits its result if its ticket is still the newest
/// when it finishes; issuing a new ticket supersedes all earlier ones.
#[derive(Debug, Clone, Copy)]
pub struct RecomputeTicket {
    generation: u64,
}

/// The analysis engine: spatial sampling, factor aggregation, scoring,
/// and the weight-only recompute path
pub struct AnalysisEngine<S> {
    source: S,
    classifier: CategoryClassifier,
    context: Option<AnalysisContext>,
    generation: AtomicU64,
}

impl<S: PoiSource> AnalysisEngine<S> {
    /// Create an engine with the default category classifier
    pub fn new(source: S) -> Self {
        Self::with_classifier(source, CategoryClassifier::default())
    }

    /// Create an engine with a custom access/demand classifier
    pub fn with_classifier(source: S, classifier: CategoryClassifier) -> Self {
        Self {
            source,
            classifier,
            context: None,
            generation: AtomicU64::new(0),
        }
    }

    /// Whether a retained analysis exists, making `recompute` possible
    pub fn has_cached_analysis(&self) -> bool {
        self.context.is_some()
    }

    /// Run a full analysis: fetch POIs, sample the area, score every cell
    ///
    /// Unusable POI data (fetch failure or zero points) yields a valid,
    /// empty result and clears any retained context. On success the
    /// `(input, grid, pois)` tuple is retained for later recomputes.
    pub async fn analyze(
        &mut self,
        input: AnalysisInput,
        weights: Weights,
        cancel: &CancelToken,
    ) -> Result<AnalysisResult> {
        input.validate()?;
        cancel.check()?;

        let started = Instant::now();
        let pois = self.source.search(&input, cancel).await?;
        cancel.check()?;

        if !pois.usable() {
            info!(
                "no usable POI data for {} at ({:.4}, {:.4})",
                input.business, input.center.lat, input.center.lng
            );
            self.context = None;
            return Ok(empty_result(input, &pois.meta, started));
        }

        let grid = generate_grid(input.center, input.radius_km, DEFAULT_TARGET_CELLS);
        debug!(
            "grid: {} cells at {:.0}m step for radius {} km",
            grid.cells.len(),
            grid.step_meters,
            input.radius_km
        );

        let cells = compute_scores(
            &grid,
            &pois.competitors,
            &pois.complements,
            weights,
            &self.classifier,
            cancel,
        )?;
        let result = assemble_result(input.clone(), cells, &pois.meta, started);

        info!(
            "analysis complete: {} cells, {} competitors, {} complements in {}ms",
            result.cell_details.len(),
            pois.meta.competitor_count,
            pois.meta.complement_count,
            result.meta.elapsed_ms
        );
        self.context = Some(AnalysisContext { input, grid, pois });
        Ok(result)
    }

    /// Claim the next recompute generation, superseding earlier claims
    pub fn begin_recompute(&self) -> RecomputeTicket {
        RecomputeTicket {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Re-score the retained grid and POIs with new weights
    ///
    /// No network fetch and no grid regeneration; this is what makes
    /// interactive weight sliders feel instantaneous.
    pub fn recompute(&self, weights: Weights, cancel: &CancelToken) -> Result<AnalysisResult> {
        let ticket = self.begin_recompute();
        self.recompute_with(ticket, weights, cancel)
    }

    /// Re-score under a previously claimed ticket
    ///
    /// Returns `Error::NoCachedAnalysis` without a prior successful
    /// `analyze`, and `Error::Cancelled` if the token fired or a newer
    /// ticket superseded this one before it could commit.
    pub fn recompute_with(
        &self,
        ticket: RecomputeTicket,
        weights: Weights,
        cancel: &CancelToken,
    ) -> Result<AnalysisResult> {
        let ctx = self.context.as_ref().ok_or(Error::NoCachedAnalysis)?;
        cancel.check()?;

        let started = Instant::now();
        let cells = compute_scores(
            &ctx.grid,
            &ctx.pois.competitors,
            &ctx.pois.complements,
            weights,
            &self.classifier,
            cancel,
        )?;

        if self.generation.load(Ordering::SeqCst) != ticket.generation {
            debug!("recompute generation {} superseded", ticket.generation);
            return Err(Error::Cancelled);
        }

        Ok(assemble_result(
            ctx.input.clone(),
            cells,
            &ctx.pois.meta,
            started,
        ))
    }
}

/// Score every grid cell against the POI lists
///
/// Raw factor values use exponential distance-decay kernels; the four
/// factors are then min-max normalized independently across the grid
/// before the weighted combination.
pub fn compute_scores(
    grid: &Grid,
    competitors: &[PointOfInterest],
    complements: &[PointOfInterest],
    weights: Weights,
    classifier: &CategoryClassifier,
    cancel: &CancelToken,
) -> Result<Vec<CellScore>> {
    let n = grid.cells.len();
    let mut ci_raw = vec![0.0; n];
    let mut coi_raw = vec![0.0; n];
    let mut ai_raw = vec![0.0; n];
    let mut di_raw = vec![0.0; n];

    for (i, cell) in grid.cells.iter().enumerate() {
        if i % CANCEL_CHECK_INTERVAL == 0 {
            cancel.check()?;
        }

        let mut ci = 0.0;
        let mut co = 0.0;
        let mut ai = 0.0;
        let mut di = 0.0;

        for poi in competitors {
            let d = haversine_distance(*cell, poi.position);
            ci += (-d / COMPETITION_DECAY_METERS).exp();
        }
        for poi in complements {
            let d = haversine_distance(*cell, poi.position);
            let k = (-d / COMPLEMENT_DECAY_METERS).exp();
            co += k;
            if classifier.is_access(poi.category.as_deref()) {
                ai += k;
            }
            if classifier.is_demand(poi.category.as_deref()) {
                di += k;
            }
        }
        // absent an explicit signal, assume accessibility/demand track
        // general complement density at half strength
        if ai == 0.0 {
            ai = co * MISSING_SIGNAL_FALLBACK_SHARE;
        }
        if di == 0.0 {
            di = co * MISSING_SIGNAL_FALLBACK_SHARE;
        }

        ci_raw[i] = ci;
        coi_raw[i] = co;
        ai_raw[i] = ai;
        di_raw[i] = di;
    }

    let ci_n = normalize(&ci_raw);
    let coi_n = normalize(&coi_raw);
    let ai_n = normalize(&ai_raw);
    let di_n = normalize(&di_raw);

    let mut cells = Vec::with_capacity(n);
    for i in 0..n {
        let score = scoring::score(coi_n[i], ai_n[i], di_n[i], ci_n[i], weights);
        let coverage = ((coi_n[i] + di_n[i]) / 2.0).clamp(0.0, 1.0);
        cells.push(CellScore {
            position: grid.cells[i],
            competition_index: ci_n[i],
            complements_index: coi_n[i],
            accessibility_index: ai_n[i],
            demand_index: di_n[i],
            score,
            coverage_confidence: coverage,
            primary_badge: badges::primary_badge(ci_n[i], coi_n[i]).map(str::to_string),
            supporting_badges: badges::supporting_badges(ai_n[i], di_n[i]),
            rationale: badges::rationale_tokens(ci_n[i], coi_n[i], ai_n[i], di_n[i], coverage),
            step_meters: grid.step_meters,
        });
    }
    Ok(cells)
}

/// Min-max normalize a slice of raw values into [0, 1]
///
/// A degenerate (uniform) slice normalizes to all zeros rather than
/// dividing by a near-zero range.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut min = values[0];
    let mut max = values[0];
    for &v in values {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    let range = max - min;
    if range <= NORMALIZE_EPSILON {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - min) / range).collect()
}

fn assemble_result(
    input: AnalysisInput,
    cells: Vec<CellScore>,
    meta: &SearchMetadata,
    started: Instant,
) -> AnalysisResult {
    let heatmap = cells
        .iter()
        .map(|c| HeatmapCell {
            lat: c.position.lat,
            lng: c.position.lng,
            intensity: c.score,
        })
        .collect();

    // Stable sort keeps ties in grid iteration order
    let mut ranked: Vec<&CellScore> = cells.iter().collect();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(CmpOrdering::Equal));
    let top_results = ranked
        .iter()
        .take(TOP_RESULT_COUNT)
        .enumerate()
        .map(|(i, c)| TopResult {
            rank: i + 1,
            position: c.position,
            score: c.score,
            competition_index: c.competition_index,
            complements_index: c.complements_index,
            accessibility_index: c.accessibility_index,
            demand_index: c.demand_index,
            primary_badge: c.primary_badge.clone(),
            supporting_badges: c.supporting_badges.clone(),
            rationale: c.rationale.clone(),
        })
        .collect();

    AnalysisResult {
        id: Uuid::new_v4().to_string(),
        input,
        heatmap,
        top_results,
        cell_details: cells,
        meta: result_metadata(meta, started),
    }
}

fn empty_result(input: AnalysisInput, meta: &SearchMetadata, started: Instant) -> AnalysisResult {
    AnalysisResult {
        id: Uuid::new_v4().to_string(),
        input,
        heatmap: Vec::new(),
        top_results: Vec::new(),
        cell_details: Vec::new(),
        meta: result_metadata(meta, started),
    }
}

fn result_metadata(meta: &SearchMetadata, started: Instant) -> AnalysisMetadata {
    AnalysisMetadata {
        generated_at: Utc::now(),
        competitor_count: meta.competitor_count,
        complement_count: meta.complement_count,
        partial: meta.partial,
        warning: meta.warning.clone(),
        error: meta.error.clone(),
        elapsed_ms: started.elapsed().as_millis() as u64,
    }
}
