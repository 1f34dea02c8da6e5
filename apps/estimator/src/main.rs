//! # FieldFix Estimate CLI
//!
//! Turns an estimate request file into a priced estimate record.
//!
//! ## Usage
//! ```bash
//! # Build an estimate from a request file
//! fieldfix-estimate request.json
//!
//! # With a custom config and catalog
//! fieldfix-estimate request.json --config ./estimator.toml --catalog ./catalog.toml
//!
//! # Also issue a share link for it
//! fieldfix-estimate request.json --share
//! ```
//!
//! The record (and share link, when asked for) is printed to stdout as
//! pretty JSON; logs go to stderr.

use std::env;
use std::path::PathBuf;

use serde_json::json;
use tracing::info;

use fieldfix_estimator::commands::{create_share_link, save_estimate, EstimateRequest};
use fieldfix_estimator::{init_tracing, EstimateState, EstimatorConfig, RateCatalog, ShareLinkState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut request_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut catalog_path: Option<PathBuf> = None;
    let mut share = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                let value = args.get(i + 1).ok_or("--config needs a path")?;
                config_path = Some(PathBuf::from(value));
                i += 1;
            }
            "--catalog" => {
                let value = args.get(i + 1).ok_or("--catalog needs a path")?;
                catalog_path = Some(PathBuf::from(value));
                i += 1;
            }
            "--share" | "-s" => share = true,
            "--help" | "-h" => {
                println!("FieldFix estimate builder");
                println!();
                println!("Usage: fieldfix-estimate <REQUEST.json> [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>   Config file (default: platform config dir)");
                println!("      --catalog <PATH>  Rate catalog TOML (default: built-in catalog)");
                println!("  -s, --share           Also issue a share link");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {}", other).into());
            }
            other => request_path = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    init_tracing();

    let request_path = request_path.ok_or("missing request file (see --help)")?;
    let config = EstimatorConfig::load(config_path)?;
    let catalog_path = catalog_path.or_else(|| config.estimate.catalog_path.clone());
    let catalog = RateCatalog::load_or_builtin(catalog_path.as_deref())?;

    let request: EstimateRequest = serde_json::from_str(&std::fs::read_to_string(&request_path)?)?;
    info!(?request_path, "Building estimate");

    let estimates = EstimateState::new();
    let record = save_estimate(&estimates, &catalog, &config, &request)?;

    let output = if share {
        let links = ShareLinkState::new();
        let link = create_share_link(&links, &estimates, &config, &record.id)?;
        json!({ "estimate": record, "shareLink": link })
    } else {
        json!({ "estimate": record })
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
