//! # Domain Types
//!
//! Core domain types exchanged between the estimate screens, the calculator
//! and whatever stores or renders the result.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    PartLine     │   │ LaborSelection  │   │   TravelRate    │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  part_id        │   │  id             │   │  id             │        │
//! │  │  name           │   │  name           │   │  distance       │        │
//! │  │  quantity       │   │  rate (flat)    │   │  rate           │        │
//! │  │  unit_price     │   └─────────────────┘   └─────────────────┘        │
//! │  └─────────────────┘                                                    │
//! │            │                    │                     │                 │
//! │            └────────────────────┼─────────────────────┘                 │
//! │                                 ▼                                       │
//! │                     ┌───────────────────────┐   ┌─────────────────┐     │
//! │                     │  EstimateBreakdown    │   │ EstimateStatus  │     │
//! │                     │  parts / labor /      │   │  Draft → Sent   │     │
//! │                     │  travel / subtotal /  │   │  → Accepted     │     │
//! │                     │  vat / grand_total    │   │  → Rejected     │     │
//! │                     └───────────────────────┘   └─────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase so stored estimate JSON written by the
//! web app (`partId`, `unitPrice`, ...) round-trips unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so the Korean standard rate of 10% is 1000 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatRate(u32);

impl VatRate {
    /// Korean standard VAT (부가가치세), 10%.
    pub const STANDARD: VatRate = VatRate(1000);

    /// Creates a VAT rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        VatRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::STANDARD
    }
}

// =============================================================================
// Part Line
// =============================================================================

/// One replacement part on an estimate.
///
/// The unit price is resolved from the parts catalog by the caller before the
/// line reaches the calculator; the core never looks prices up itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PartLine {
    /// Catalog identifier of the part.
    pub part_id: String,

    /// Display name printed on the estimate.
    pub name: String,

    /// Number of units. Must be at least 1 for a billable estimate.
    pub quantity: i64,

    /// Price of a single unit in won.
    pub unit_price: Money,
}

impl PartLine {
    /// Creates a part line.
    pub fn new(
        part_id: impl Into<String>,
        name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Self {
        PartLine {
            part_id: part_id.into(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Labor Selection
// =============================================================================

/// A flat-rate labor charge chosen for the job.
///
/// There is no quantity: each selected labor type contributes its rate once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LaborSelection {
    pub id: String,
    pub name: String,
    pub rate: Money,
}

impl LaborSelection {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rate: Money) -> Self {
        LaborSelection {
            id: id.into(),
            name: name.into(),
            rate,
        }
    }
}

// =============================================================================
// Travel Rate
// =============================================================================

/// A travel charge band, e.g. "10km 이내" → 20,000원.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TravelRate {
    pub id: String,
    /// Human-readable distance band.
    pub distance: String,
    pub rate: Money,
}

impl TravelRate {
    pub fn new(id: impl Into<String>, distance: impl Into<String>, rate: Money) -> Self {
        TravelRate {
            id: id.into(),
            distance: distance.into(),
            rate,
        }
    }
}

// =============================================================================
// Estimate Breakdown
// =============================================================================

/// The itemized result of one estimate calculation.
///
/// ## Invariants
/// - `subtotal == parts_total + labor_total + travel_cost`
/// - `grand_total == subtotal + vat`
/// - `vat` is zero unless VAT was requested
///
/// A breakdown is a value: editing the estimate means calculating a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EstimateBreakdown {
    pub parts_total: Money,
    pub labor_total: Money,
    pub travel_cost: Money,
    pub subtotal: Money,
    pub vat: Money,
    pub grand_total: Money,
}

impl EstimateBreakdown {
    /// Whether the breakdown carries a nonzero VAT amount.
    ///
    /// This is not the same as "VAT was requested": 10% of a 0 to 4 won
    /// subtotal rounds to zero, so such a breakdown reports `false` here.
    /// Stored records keep the requested flag separately.
    #[inline]
    pub fn has_vat_amount(&self) -> bool {
        !self.vat.is_zero()
    }
}

// =============================================================================
// Estimate Status
// =============================================================================

/// Lifecycle of a stored estimate.
///
/// ```text
///   Draft ──send──► Sent ──► Accepted
///     ▲              │  └──► Rejected
///     └── edits ─────┘ (re-sending is allowed)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    /// Being edited by the technician.
    #[default]
    Draft,
    /// Delivered to the customer by email.
    Sent,
    /// Customer agreed to the repair.
    Accepted,
    /// Customer declined.
    Rejected,
}

impl EstimateStatus {
    /// Whether an estimate in this status may be (re)sent to the customer.
    pub fn can_send(&self) -> bool {
        matches!(self, EstimateStatus::Draft | EstimateStatus::Sent)
    }

    /// Status after a successful email delivery.
    pub fn mark_sent(self) -> Result<EstimateStatus, CoreError> {
        if self.can_send() {
            Ok(EstimateStatus::Sent)
        } else {
            Err(CoreError::InvalidEstimateStatus {
                current_status: self.to_string(),
                operation: "send".to_string(),
            })
        }
    }

    /// Korean label used in the history list.
    pub fn label_ko(&self) -> &'static str {
        match self {
            EstimateStatus::Draft => "진행중",
            EstimateStatus::Sent => "발송됨",
            EstimateStatus::Accepted => "수락됨",
            EstimateStatus::Rejected => "거절됨",
        }
    }
}

impl fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateStatus::Draft => write!(f, "draft"),
            EstimateStatus::Sent => write!(f, "sent"),
            EstimateStatus::Accepted => write!(f, "accepted"),
            EstimateStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for EstimateStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(EstimateStatus::Draft),
            "sent" => Ok(EstimateStatus::Sent),
            "accepted" => Ok(EstimateStatus::Accepted),
            "rejected" => Ok(EstimateStatus::Rejected),
            other => Err(CoreError::UnknownEstimateStatus(other.to_string())),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vat_rate_standard() {
        assert_eq!(VatRate::STANDARD.bps(), 1000);
        assert!((VatRate::STANDARD.percentage() - 10.0).abs() < 0.001);
        assert_eq!(VatRate::default(), VatRate::STANDARD);
    }

    #[test]
    fn test_part_line_total() {
        let line = PartLine::new("ic-5000", "점화 코일", 2, Money::from_won(35_000));
        assert_eq!(line.line_total().won(), 70_000);
    }

    #[test]
    fn test_part_line_json_uses_camel_case() {
        let line = PartLine::new("p1", "히터", 1, Money::from_won(120_000));
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["partId"], "p1");
        assert_eq!(json["unitPrice"], 120_000);
    }

    #[test]
    fn test_status_default_is_draft() {
        assert_eq!(EstimateStatus::default(), EstimateStatus::Draft);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("sent".parse::<EstimateStatus>().unwrap(), EstimateStatus::Sent);
        assert_eq!(" Draft ".parse::<EstimateStatus>().unwrap(), EstimateStatus::Draft);
        assert!("archived".parse::<EstimateStatus>().is_err());
    }

    #[test]
    fn test_mark_sent() {
        assert_eq!(EstimateStatus::Draft.mark_sent().unwrap(), EstimateStatus::Sent);
        assert_eq!(EstimateStatus::Sent.mark_sent().unwrap(), EstimateStatus::Sent);
        assert!(EstimateStatus::Accepted.mark_sent().is_err());
        assert!(EstimateStatus::Rejected.mark_sent().is_err());
    }
}
