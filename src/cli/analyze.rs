//! Analyze command handler
//!
//! Runs a full analysis around a center point and prints the result.

use crate::analysis::{AnalysisEngine, AnalysisInput, CancelToken};
use crate::config::Config;
use crate::error::Result;
use crate::format::{available_formats, get_formatter};
use crate::geo::GeoPoint;
use crate::poi::azure::AzureMapsSource;
use crate::poi::categories::{available_businesses, BusinessType};
use crate::scoring::Weights;
use clap::Args;
use std::str::FromStr;

/// Analyze command arguments
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Latitude of the area center
    #[arg(long)]
    pub lat: Option<f64>,

    /// Longitude of the area center
    #[arg(long)]
    pub lng: Option<f64>,

    /// Business type (e.g. coffee, pharmacy)
    #[arg(long, short = 'b')]
    pub business: Option<String>,

    /// Search radius in kilometers
    #[arg(long, short = 'r')]
    pub radius_km: Option<f64>,

    /// Complements weight percentage (0-100)
    #[arg(long)]
    pub w_complements: Option<f64>,

    /// Accessibility weight percentage (0-100)
    #[arg(long)]
    pub w_accessibility: Option<f64>,

    /// Demand weight percentage (0-100)
    #[arg(long)]
    pub w_demand: Option<f64>,

    /// Competition weight percentage (0-100)
    #[arg(long)]
    pub w_competition: Option<f64>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Language tag for the POI provider
    #[arg(long)]
    pub language: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List supported business types
    #[arg(short = 'B', long = "list-businesses")]
    pub list_businesses: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the analyze command
pub async fn run(args: AnalyzeArgs) -> Result<()> {
    // Handle list flags first
    if args.list_businesses {
        list_businesses();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    // Load config
    let config = Config::load()?;

    let (Some(lat), Some(lng)) = (args.lat, args.lng) else {
        eprintln!("Error: No location specified. Use --lat and --lng");
        std::process::exit(1)
    };
    let center = GeoPoint::new(lat, lng);
    center.validate()?;

    // Get parameters with config defaults
    let business_name = args.business.unwrap_or(config.defaults.business.clone());
    let business = BusinessType::from_str(&business_name).map_err(crate::error::Error::Config)?;
    let radius_km = args.radius_km.unwrap_or(config.defaults.radius_km);
    let language = args.language.unwrap_or(config.defaults.language.clone());
    let format = args.format.unwrap_or(config.defaults.format.clone());

    let weights = Weights::from_percentages(
        args.w_complements.unwrap_or(config.weights.complements_pct),
        args.w_accessibility
            .unwrap_or(config.weights.accessibility_pct),
        args.w_demand.unwrap_or(config.weights.demand_pct),
        args.w_competition.unwrap_or(config.weights.competition_pct),
    );

    if config.api_keys.azure_maps.trim().is_empty() {
        eprintln!("Warning: no Azure Maps key configured (api_keys.azure_maps); expect an empty result");
    }

    // Run the analysis
    let source = AzureMapsSource::new(config.api_keys.azure_maps.clone());
    let mut engine = AnalysisEngine::new(source);
    let input = AnalysisInput {
        business,
        center,
        radius_km,
        language,
    };
    let result = engine.analyze(input, weights, &CancelToken::new()).await?;

    if let Some(warning) = &result.meta.warning {
        eprintln!("Warning: {}", warning);
    }

    // Format output
    let formatter = get_formatter(&format)
        .ok_or_else(|| crate::error::Error::Config(format!("Unknown format: {}", format)))?;
    let output = formatter.format(&result)?;

    // Write output
    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print supported business types
fn list_businesses() {
    println!("Supported business types:");
    for business in available_businesses() {
        println!("  {}", business);
    }
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:8} - {}", format.name, format.description);
    }
}
