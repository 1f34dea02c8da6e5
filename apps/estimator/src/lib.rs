//! # FieldFix Estimator
//!
//! Orchestration around `fieldfix-core`: catalog lookups, estimate records,
//! share links and the customer email.
//!
//! ## Module Organization
//! ```text
//! fieldfix_estimator/
//! ├── lib.rs          ◄─── You are here (tracing setup, exports)
//! ├── config.rs       ◄─── EstimatorConfig (defaults → TOML → env)
//! ├── catalog.rs      ◄─── RateCatalog: equipment, parts, labor, travel
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── estimates.rs◄─── Stored estimate records
//! │   └── share.rs    ◄─── Issued share links
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── estimate.rs ◄─── Build / update estimates
//! │   ├── share.rs    ◄─── Create / open share links
//! │   └── email.rs    ◄─── Compose / send customer email
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Request Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EstimateRequest (ids) ──► RateCatalog ──► EstimateDraft (prices)       │
//! │                                                 │                       │
//! │                                   validate ─────┤ fieldfix-core         │
//! │                                   calculate ────┘                       │
//! │                                                 │                       │
//! │                                                 ▼                       │
//! │  EstimateState ◄── EstimateRecord ──► ShareLinkState / MailTransport    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use catalog::RateCatalog;
pub use config::{ConfigError, EstimatorConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::{EstimateRecord, EstimateState, ShareLinkState};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=fieldfix_estimator=trace` - Trace this crate only
/// - Default: INFO, DEBUG for fieldfix crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fieldfix_estimator=debug,fieldfix_core=debug"));

    // a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
