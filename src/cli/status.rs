//! Status command handler
//!
//! Checks whether a venue-scout server is running and reports its state.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Server address to check (defaults to configured host:port)
    #[arg(long)]
    pub addr: Option<String>,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;
    let addr = args.addr.unwrap_or_else(|| config.server_addr());

    println!("venue-scout v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let url = format!("http://{}/api/status", addr);
    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", addr);
                if let Ok(body) = response.text().await {
                    if let Ok(status) = serde_json::from_str::<serde_json::Value>(&body) {
                        if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                            println!("  Version: {}", version);
                        }
                        if let Some(cached) =
                            status.get("has_cached_analysis").and_then(|v| v.as_bool())
                        {
                            println!(
                                "  Cached analysis: {}",
                                if cached { "yes (recompute available)" } else { "no" }
                            );
                        }
                    }
                }
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", addr);
        }
    }

    Ok(())
}
