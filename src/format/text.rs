//! Human-readable text output formatter

use crate::analysis::badges::{
    accessibility_badge, competition_badge, complements_badge, demand_badge, BadgeDescriptor,
};
use crate::analysis::AnalysisResult;
use crate::error::Result;
use crate::format::OutputFormatter;

/// Text formatter - outputs a human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable summary"
    }

    fn format(&self, result: &AnalysisResult) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("venue-scout analysis ({})\n", result.id));
        output.push_str(&format!("Business: {}\n", result.input.business));
        output.push_str(&format!(
            "Center: ({:.6}, {:.6})\n",
            result.input.center.lat, result.input.center.lng
        ));
        output.push_str(&format!("Radius: {} km\n", result.input.radius_km));
        output.push_str(&format!(
            "POIs: {} competitors, {} complements\n",
            result.meta.competitor_count, result.meta.complement_count
        ));
        if let Some(warning) = &result.meta.warning {
            output.push_str(&format!("Warning: {}\n", warning));
        }
        if let Some(error) = &result.meta.error {
            output.push_str(&format!("Error: {}\n", error));
        }

        if result.is_empty() {
            output.push_str("\nNo results for this area.\n");
            return Ok(output);
        }

        output.push_str(&format!("Cells scored: {}\n", result.cell_details.len()));
        output.push_str("\nTop locations:\n");
        for top in &result.top_results {
            output.push_str(&format!(
                "  #{:<2} ({:.6}, {:.6})  score {:+.3}",
                top.rank, top.position.lat, top.position.lng, top.score
            ));
            if let Some(badge) = &top.primary_badge {
                output.push_str(&format!("  [{}]", badge));
            }
            output.push('\n');

            let descriptors = [
                competition_badge(top.competition_index),
                complements_badge(top.complements_index),
                accessibility_badge(top.accessibility_index),
                demand_badge(top.demand_index),
            ];
            for descriptor in descriptors.iter().filter(|d| d.visible()) {
                output.push_str(&format!("       {}\n", describe(descriptor)));
            }
        }

        Ok(output)
    }
}

fn describe(descriptor: &BadgeDescriptor) -> String {
    format!(
        "{}: {} ({:.2})",
        descriptor.factor, descriptor.level, descriptor.value
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::test_support::sample_result;

    #[tokio::test]
    async fn test_text_format() {
        let formatter = TextFormatter;
        let result = sample_result().await;

        let output = formatter.format(&result).unwrap();

        assert!(output.contains("venue-scout analysis"));
        assert!(output.contains("Business: coffee"));
        assert!(output.contains("Center:"));
        assert!(output.contains("Top locations:"));
        assert!(output.contains("#1"));
    }

    #[tokio::test]
    async fn test_text_format_empty_result() {
        let mut result = sample_result().await;
        result.heatmap.clear();
        result.top_results.clear();
        result.cell_details.clear();

        let output = TextFormatter.format(&result).unwrap();
        assert!(output.contains("No results for this area."));
    }

    #[test]
    fn test_text_formatter_info() {
        let formatter = TextFormatter;
        assert_eq!(formatter.name(), "text");
        assert!(!formatter.description().is_empty());
    }
}
