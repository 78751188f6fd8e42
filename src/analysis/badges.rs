//! Badge and rationale derivation
//!
//! Turns normalized factor indices into short categorical labels. Badge keys
//! are plain tokens; display layers decide how to present them.

/// Normalized-index threshold above which a factor earns a primary badge
pub const PRIMARY_BADGE_THRESHOLD: f64 = 0.7;

/// Normalized-index threshold above which a factor earns a supporting badge
pub const SUPPORTING_BADGE_THRESHOLD: f64 = 0.6;

/// Normalized-index threshold below which a factor reads as "low"
pub const LOW_INDEX_THRESHOLD: f64 = 0.2;

pub const BADGE_HIGH_COMPETITION: &str = "high_competition";
pub const BADGE_STRONG_COMPLEMENTS: &str = "strong_complements";
pub const BADGE_GOOD_ACCESS: &str = "good_access";
pub const BADGE_HIGH_DEMAND: &str = "high_demand";

pub const RATIONALE_LOW_COMPETITION: &str = "low_competition";
pub const RATIONALE_SPARSE_DATA: &str = "sparse_data";

/// Derive the primary badge from normalized competition and complements
/// indices
///
/// Competition takes priority when both thresholds are exceeded.
pub fn primary_badge(competition_index: f64, complements_index: f64) -> Option<&'static str> {
    if competition_index > PRIMARY_BADGE_THRESHOLD {
        Some(BADGE_HIGH_COMPETITION)
    } else if complements_index > PRIMARY_BADGE_THRESHOLD {
        Some(BADGE_STRONG_COMPLEMENTS)
    } else {
        None
    }
}

/// Derive supporting badges from normalized accessibility and demand indices
///
/// The two badges are independent; both may apply.
pub fn supporting_badges(accessibility_index: f64, demand_index: f64) -> Vec<String> {
    let mut badges = Vec::new();
    if accessibility_index > SUPPORTING_BADGE_THRESHOLD {
        badges.push(BADGE_GOOD_ACCESS.to_string());
    }
    if demand_index > SUPPORTING_BADGE_THRESHOLD {
        badges.push(BADGE_HIGH_DEMAND.to_string());
    }
    badges
}

/// Derive rationale tokens summarizing why a cell scored the way it did
pub fn rationale_tokens(
    competition_index: f64,
    complements_index: f64,
    accessibility_index: f64,
    demand_index: f64,
    coverage_confidence: f64,
) -> Vec<String> {
    let mut tokens = Vec::new();
    if competition_index > PRIMARY_BADGE_THRESHOLD {
        tokens.push(BADGE_HIGH_COMPETITION.to_string());
    } else if competition_index < LOW_INDEX_THRESHOLD {
        tokens.push(RATIONALE_LOW_COMPETITION.to_string());
    }
    if complements_index > PRIMARY_BADGE_THRESHOLD {
        tokens.push(BADGE_STRONG_COMPLEMENTS.to_string());
    }
    if accessibility_index > SUPPORTING_BADGE_THRESHOLD {
        tokens.push(BADGE_GOOD_ACCESS.to_string());
    }
    if demand_index > SUPPORTING_BADGE_THRESHOLD {
        tokens.push(BADGE_HIGH_DEMAND.to_string());
    }
    if coverage_confidence < LOW_INDEX_THRESHOLD {
        tokens.push(RATIONALE_SPARSE_DATA.to_string());
    }
    tokens
}

/// Severity bucket for a factor badge descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeSeverity {
    /// Below the hide threshold; display layers omit the badge
    None,
    Info,
    Success,
    Warning,
}

/// A per-factor badge descriptor for display layers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeDescriptor {
    /// Factor name ("competition", "complements", "accessibility", "demand")
    pub factor: &'static str,
    /// Intensity level ("low", "medium", "high")
    pub level: &'static str,
    pub severity: BadgeSeverity,
    /// The clamped index value the descriptor was derived from
    pub value: f64,
}

impl BadgeDescriptor {
    /// Whether display layers should render this badge at all
    pub fn visible(&self) -> bool {
        self.severity != BadgeSeverity::None
    }
}

/// Below this index a factor badge is hidden entirely
pub const HIDE_THRESHOLD: f64 = 0.20;
pub const MEDIUM_THRESHOLD: f64 = 0.50;
pub const HIGH_THRESHOLD: f64 = 0.70;

fn descriptor(factor: &'static str, index: f64, high_severity: BadgeSeverity) -> BadgeDescriptor {
    let value = index.clamp(0.0, 1.0);
    let (level, severity) = if value < HIDE_THRESHOLD {
        ("low", BadgeSeverity::None)
    } else if value >= HIGH_THRESHOLD {
        ("high", high_severity)
    } else if value >= MEDIUM_THRESHOLD {
        ("medium", BadgeSeverity::Info)
    } else {
        ("low", BadgeSeverity::Info)
    };
    BadgeDescriptor {
        factor,
        level,
        severity,
        value,
    }
}

/// Descriptor for the competition factor; high competition warns
pub fn competition_badge(index: f64) -> BadgeDescriptor {
    descriptor("competition", index, BadgeSeverity::Warning)
}

pub fn complements_badge(index: f64) -> BadgeDescriptor {
    descriptor("complements", index, BadgeSeverity::Success)
}

pub fn accessibility_badge(index: f64) -> BadgeDescriptor {
    descriptor("accessibility", index, BadgeSeverity::Success)
}

pub fn demand_badge(index: f64) -> BadgeDescriptor {
    descriptor("demand", index, BadgeSeverity::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_badge_high_competition() {
        assert_eq!(primary_badge(0.85, 0.0), Some(BADGE_HIGH_COMPETITION));
    }

    #[test]
    fn test_primary_badge_strong_complements() {
        assert_eq!(primary_badge(0.7, 0.8), Some(BADGE_STRONG_COMPLEMENTS));
    }

    #[test]
    fn test_primary_badge_competition_wins_ties() {
        // Both above threshold: competition takes priority
        assert_eq!(primary_badge(0.9, 0.95), Some(BADGE_HIGH_COMPETITION));
    }

    #[test]
    fn test_primary_badge_none() {
        assert_eq!(primary_badge(0.5, 0.5), None);
    }

    #[test]
    fn test_supporting_badges() {
        assert!(supporting_badges(0.1, 0.1).is_empty());
        assert_eq!(supporting_badges(0.7, 0.1), vec![BADGE_GOOD_ACCESS]);
        assert_eq!(supporting_badges(0.1, 0.65), vec![BADGE_HIGH_DEMAND]);
        assert_eq!(
            supporting_badges(0.9, 0.9),
            vec![BADGE_GOOD_ACCESS, BADGE_HIGH_DEMAND]
        );
    }

    #[test]
    fn test_rationale_tokens_low_competition() {
        let tokens = rationale_tokens(0.05, 0.5, 0.5, 0.5, 0.5);
        assert!(tokens.contains(&RATIONALE_LOW_COMPETITION.to_string()));
    }

    #[test]
    fn test_rationale_tokens_sparse_data() {
        let tokens = rationale_tokens(0.5, 0.1, 0.1, 0.1, 0.1);
        assert!(tokens.contains(&RATIONALE_SPARSE_DATA.to_string()));
    }

    #[test]
    fn test_descriptor_thresholds() {
        assert!(!competition_badge(0.1).visible());
        assert_eq!(competition_badge(0.3).level, "low");
        assert_eq!(competition_badge(0.3).severity, BadgeSeverity::Info);
        assert_eq!(competition_badge(0.6).level, "medium");
        assert_eq!(competition_badge(0.8).severity, BadgeSeverity::Warning);
        assert_eq!(complements_badge(0.8).severity, BadgeSeverity::Success);
        assert_eq!(accessibility_badge(0.75).level, "high");
        assert_eq!(demand_badge(0.5).severity, BadgeSeverity::Info);
    }

    #[test]
    fn test_descriptor_clamps_value() {
        assert_eq!(competition_badge(1.5).value, 1.0);
        assert_eq!(competition_badge(-0.5).value, 0.0);
    }
}
