//! Factor scoring
//!
//! Combines four normalized factor indices into a single scalar using a
//! caller-supplied weight vector. Competition is subtracted; complements,
//! accessibility, and demand add. The formula is linear and does not clamp
//! its inputs; callers are responsible for normalizing upstream.

use serde::{Deserialize, Serialize};

/// Default weight vector (complements, accessibility, demand, competition)
pub const DEFAULT_WEIGHTS: Weights = Weights {
    complements: 0.35,
    accessibility: 0.25,
    demand: 0.25,
    competition: 0.35,
};

/// Total weight the three positive factors divide between themselves when
/// derived from slider percentages.
const POSITIVE_WEIGHT_BUDGET: f64 = 0.65;

/// Scoring weights for the four factors
///
/// All four values are non-negative decimals. The competition weight is
/// subtracted in the scoring formula; the other three are additive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub complements: f64,
    pub accessibility: f64,
    pub demand: f64,
    pub competition: f64,
}

impl Weights {
    /// Create a weight vector from explicit decimal weights
    pub fn new(complements: f64, accessibility: f64, demand: f64, competition: f64) -> Self {
        Self {
            complements,
            accessibility,
            demand,
            competition,
        }
    }

    /// Convert UI slider percentages (0-100) into scoring weights
    ///
    /// The three positive factors are scaled so they sum to 0.65; the
    /// competition percentage maps directly to a decimal (e.g. 35 -> 0.35),
    /// clamped to [0, 1]. Negative positive-factor percentages are treated
    /// as zero.
    pub fn from_percentages(
        complements_pct: f64,
        accessibility_pct: f64,
        demand_pct: f64,
        competition_pct: f64,
    ) -> Self {
        let pos =
            complements_pct.max(0.0) + accessibility_pct.max(0.0) + demand_pct.max(0.0);
        let (complements, accessibility, demand) = if pos > 1e-9 {
            let scale = POSITIVE_WEIGHT_BUDGET / pos;
            (
                complements_pct.max(0.0) * scale,
                accessibility_pct.max(0.0) * scale,
                demand_pct.max(0.0) * scale,
            )
        } else {
            (0.0, 0.0, 0.0)
        };
        let competition = competition_pct.clamp(0.0, 100.0) / 100.0;
        Self {
            complements,
            accessibility,
            demand,
            competition,
        }
    }
}

impl Default for Weights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

/// Combine four normalized factor indices into one score
///
/// Inputs are conventionally in [0, 1] but out-of-range values are
/// well-defined; the result can be negative when competition dominates.
pub fn score(
    complements: f64,
    accessibility: f64,
    demand: f64,
    competition: f64,
    weights: Weights,
) -> f64 {
    weights.complements * complements + weights.accessibility * accessibility
        + weights.demand * demand
        - weights.competition * competition
}

/// Score with the default weight vector, for callers that don't carry one
pub fn score_with_default_weights(
    complements: f64,
    accessibility: f64,
    demand: f64,
    competition: f64,
) -> f64 {
    score(complements, accessibility, demand, competition, DEFAULT_WEIGHTS)
}
