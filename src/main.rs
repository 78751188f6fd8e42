//! venue-scout CLI entry point
//!
//! Store-location scoring - CLI + web app

use venue_scout::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
