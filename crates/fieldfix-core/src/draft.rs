//! # Estimate Draft
//!
//! The estimate being edited on the technician's screen.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen Action             Draft Method              Result             │
//! │  ─────────────             ────────────              ──────             │
//! │  Load diagnosis parts ───► with_parts() ───────────► new draft          │
//! │  Change quantity ────────► with_part_quantity() ───► new draft          │
//! │  Remove part ────────────► without_part() ─────────► new draft          │
//! │  Tap labor chip ─────────► toggle_labor() ─────────► new draft          │
//! │  Pick travel band ───────► with_travel_rate() ─────► new draft          │
//! │  VAT switch ─────────────► toggle_vat() ───────────► new draft          │
//! │  Show totals ────────────► breakdown() ────────────► EstimateBreakdown  │
//! │  Save ───────────────────► validate() ─────────────► EstimateValidation │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every edit consumes the draft and returns a new one; nothing is shared or
//! mutated in place, so two screens editing two estimates never interact.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::estimate::calculate_estimate;
use crate::money::Money;
use crate::types::{EstimateBreakdown, LaborSelection, PartLine, TravelRate};
use crate::validation::{validate_estimate_in, EstimateValidation, MessageLanguage};

/// An estimate under construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct EstimateDraft {
    pub parts: Vec<PartLine>,
    /// Kept unique by id through [`EstimateDraft::toggle_labor`].
    pub selected_labor: Vec<LaborSelection>,
    pub travel_rate: Option<TravelRate>,
    pub include_vat: bool,
    pub notes: String,
}

impl EstimateDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the part list.
    #[must_use]
    pub fn with_parts(self, parts: Vec<PartLine>) -> Self {
        EstimateDraft { parts, ..self }
    }

    /// Sets the quantity of every line for `part_id`. Unknown ids are ignored.
    ///
    /// The quantity is stored as given, including 0 or negative values; the
    /// validator reports those when the draft is saved.
    #[must_use]
    pub fn with_part_quantity(self, part_id: &str, quantity: i64) -> Self {
        let parts = self
            .parts
            .into_iter()
            .map(|p| {
                if p.part_id == part_id {
                    PartLine { quantity, ..p }
                } else {
                    p
                }
            })
            .collect();
        EstimateDraft { parts, ..self }
    }

    /// Removes every line for `part_id`.
    #[must_use]
    pub fn without_part(self, part_id: &str) -> Self {
        let parts = self
            .parts
            .into_iter()
            .filter(|p| p.part_id != part_id)
            .collect();
        EstimateDraft { parts, ..self }
    }

    /// Selects `labor` if no labor with the same id is selected, otherwise
    /// deselects it.
    #[must_use]
    pub fn toggle_labor(self, labor: LaborSelection) -> Self {
        let mut selected_labor = self.selected_labor;
        if selected_labor.iter().any(|l| l.id == labor.id) {
            selected_labor.retain(|l| l.id != labor.id);
        } else {
            selected_labor.push(labor);
        }
        EstimateDraft {
            selected_labor,
            ..self
        }
    }

    /// Replaces the labor selection as given (no dedup).
    #[must_use]
    pub fn with_labor(self, selected_labor: Vec<LaborSelection>) -> Self {
        EstimateDraft {
            selected_labor,
            ..self
        }
    }

    /// Selects a travel band, or clears it with `None`.
    #[must_use]
    pub fn with_travel_rate(self, travel_rate: Option<TravelRate>) -> Self {
        EstimateDraft {
            travel_rate,
            ..self
        }
    }

    #[must_use]
    pub fn toggle_vat(self) -> Self {
        let include_vat = !self.include_vat;
        EstimateDraft {
            include_vat,
            ..self
        }
    }

    #[must_use]
    pub fn with_vat(self, include_vat: bool) -> Self {
        EstimateDraft {
            include_vat,
            ..self
        }
    }

    #[must_use]
    pub fn with_notes(self, notes: impl Into<String>) -> Self {
        EstimateDraft {
            notes: notes.into(),
            ..self
        }
    }

    /// Back to an empty draft.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// Rate of the selected travel band, or zero when none is selected.
    pub fn travel_cost(&self) -> Money {
        self.travel_rate
            .as_ref()
            .map(|t| t.rate)
            .unwrap_or_else(Money::zero)
    }

    /// Totals for the current draft.
    pub fn breakdown(&self) -> EstimateBreakdown {
        calculate_estimate(
            &self.parts,
            &self.selected_labor,
            self.travel_cost(),
            self.include_vat,
        )
    }

    /// Checks the draft with English messages.
    pub fn validate(&self) -> EstimateValidation {
        self.validate_in(MessageLanguage::En)
    }

    /// Checks the draft with messages in `language`.
    pub fn validate_in(&self, language: MessageLanguage) -> EstimateValidation {
        validate_estimate_in(
            &self.parts,
            &self.selected_labor,
            self.travel_cost(),
            language,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn won(v: i64) -> Money {
        Money::from_won(v)
    }

    fn repair() -> LaborSelection {
        LaborSelection::new("repair", "수리작업", won(40_000))
    }

    fn cleaning() -> LaborSelection {
        LaborSelection::new("cleaning", "세척/청소", won(20_000))
    }

    fn draft() -> EstimateDraft {
        EstimateDraft::new()
            .with_parts(vec![
                PartLine::new("ts-100", "온도 센서", 1, won(35_000)),
                PartLine::new("cf-120", "냉각팬", 2, won(45_000)),
            ])
            .toggle_labor(repair())
            .with_travel_rate(Some(TravelRate::new("t10", "10km 이내", won(20_000))))
    }

    #[test]
    fn test_breakdown() {
        let b = draft().breakdown();
        assert_eq!(b.parts_total.won(), 125_000);
        assert_eq!(b.labor_total.won(), 40_000);
        assert_eq!(b.travel_cost.won(), 20_000);
        assert_eq!(b.grand_total.won(), 185_000);
    }

    #[test]
    fn test_toggle_labor_twice_restores_selection() {
        let original = draft();
        let toggled = original.clone().toggle_labor(cleaning()).toggle_labor(cleaning());
        assert_eq!(toggled, original);
    }

    #[test]
    fn test_toggle_labor_removes_by_id() {
        let d = draft().toggle_labor(repair());
        assert!(d.selected_labor.is_empty());
    }

    #[test]
    fn test_update_and_remove_part() {
        let d = draft().with_part_quantity("cf-120", 3);
        assert_eq!(d.breakdown().parts_total.won(), 35_000 + 135_000);

        let d = d.without_part("ts-100");
        assert_eq!(d.parts.len(), 1);
        assert_eq!(d.breakdown().parts_total.won(), 135_000);
    }

    #[test]
    fn test_zero_quantity_flagged_on_validate() {
        let d = draft().with_part_quantity("ts-100", 0);
        let v = d.validate();
        assert!(!v.valid);
        assert_eq!(v.errors, vec!["part quantity must be at least 1"]);
    }

    #[test]
    fn test_vat_toggle() {
        let d = draft().toggle_vat();
        assert!(d.include_vat);
        assert_eq!(d.breakdown().vat.won(), 18_500);
        assert!(!d.toggle_vat().include_vat);
    }

    #[test]
    fn test_travel_cost_defaults_to_zero() {
        let d = draft().with_travel_rate(None);
        assert_eq!(d.travel_cost(), Money::zero());
    }

    #[test]
    fn test_reset() {
        let d = draft().with_notes("가스 누출 없음").reset();
        assert_eq!(d, EstimateDraft::default());
        assert!(!d.validate().valid);
    }
}
