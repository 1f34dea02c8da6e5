//! # fieldfix-core: Pure Business Logic for FieldFix
//!
//! Estimate math and the rules around it for kitchen-equipment field service:
//! a technician diagnoses a unit, picks replacement parts and labor, and the
//! customer receives an itemized estimate.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FieldFix Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 Web screens (equipment, diagnosis, estimate)    │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ JSON                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │            apps/estimator (catalog, share links, email)         │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │              ★ fieldfix-core (THIS CRATE) ★                     │    │
//! │  │                                                                 │    │
//! │  │  ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌────────┐ ┌───────┐  │    │
//! │  │  │  money   │ │ estimate │ │ validation │ │ draft  │ │ share │  │    │
//! │  │  │ Money    │ │ totals   │ │ rules      │ │ edits  │ │ expiry│  │    │
//! │  │  │ VAT      │ │ VAT      │ │ messages   │ │        │ │       │  │    │
//! │  │  └──────────┘ └──────────┘ └────────────┘ └────────┘ └───────┘  │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PartLine, LaborSelection, EstimateBreakdown, ...)
//! - [`money`] - Money in whole won, VAT rounding, currency display
//! - [`estimate`] - The estimate calculator
//! - [`validation`] - Estimate rules and field validators
//! - [`diagnosis`] - On-site diagnosis form
//! - [`draft`] - Immutable estimate editing
//! - [`share`] - Share link expiry rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use fieldfix_core::estimate::{calculate_estimate, format_currency};
//! use fieldfix_core::validation::validate_estimate;
//! use fieldfix_core::{LaborSelection, Money, PartLine};
//!
//! let parts = vec![PartLine::new("ic-5000", "점화 코일", 2, Money::from_won(35_000))];
//! let labor = vec![LaborSelection::new("simple", "부품교체(단순)", Money::from_won(30_000))];
//! let travel = Money::from_won(20_000);
//!
//! assert!(validate_estimate(&parts, &labor, travel).valid);
//!
//! let breakdown = calculate_estimate(&parts, &labor, travel, false);
//! assert_eq!(format_currency(breakdown.grand_total), "120,000원");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod diagnosis;
pub mod draft;
pub mod error;
pub mod estimate;
pub mod money;
pub mod share;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::EstimateDraft;
pub use error::{CoreError, CoreResult, ValidationError};
pub use estimate::{calculate_estimate, labor_total, parts_total};
pub use money::{format_currency, Money};
pub use share::ShareLink;
pub use types::*;
pub use validation::{validate_estimate, EstimateRule, EstimateValidation, MessageLanguage};
