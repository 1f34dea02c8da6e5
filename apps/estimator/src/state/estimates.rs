//! # Estimate State
//!
//! Stored estimates, keyed by id.
//!
//! A record freezes the priced lines at the moment it was built. Later
//! catalog price changes do not touch existing records; rebuilding with
//! `update_estimate` re-reads the catalog.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use fieldfix_core::{
    EstimateBreakdown, EstimateDraft, EstimateStatus, LaborSelection, PartLine, TravelRate,
};

/// A built estimate as stored and returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRecord {
    pub id: String,
    pub diagnosis_id: String,
    pub equipment_id: Option<String>,

    /// Priced part lines (unit prices frozen from the catalog)
    pub parts: Vec<PartLine>,
    pub labor: Vec<LaborSelection>,
    pub travel_rate: Option<TravelRate>,
    pub include_vat: bool,

    /// Totals computed from the lines above
    pub breakdown: EstimateBreakdown,

    pub notes: String,
    pub status: EstimateStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Last day the quoted prices hold
    pub valid_until: Option<DateTime<Utc>>,
}

impl EstimateRecord {
    /// The record's selections as an editable draft.
    pub fn to_draft(&self) -> EstimateDraft {
        EstimateDraft::new()
            .with_parts(self.parts.clone())
            .with_labor(self.labor.clone())
            .with_travel_rate(self.travel_rate.clone())
            .with_vat(self.include_vat)
            .with_notes(self.notes.clone())
    }
}

/// Shared estimate store.
///
/// ## Thread Safety
/// `Arc<Mutex<HashMap>>`: commands clone the state cheaply and take the
/// lock only for the duration of a closure.
#[derive(Debug, Clone, Default)]
pub struct EstimateState {
    records: Arc<Mutex<HashMap<String, EstimateRecord>>>,
}

impl EstimateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the records.
    pub fn with_records<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&HashMap<String, EstimateRecord>) -> R,
    {
        // a panic in another closure leaves the map itself consistent
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        f(&records)
    }

    /// Executes a function with write access to the records.
    pub fn with_records_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut HashMap<String, EstimateRecord>) -> R,
    {
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut records)
    }

    /// Inserts or replaces a record.
    pub fn put(&self, record: EstimateRecord) {
        self.with_records_mut(|records| {
            records.insert(record.id.clone(), record);
        });
    }

    pub fn get(&self, id: &str) -> Option<EstimateRecord> {
        self.with_records(|records| records.get(id).cloned())
    }

    /// Records built from one diagnosis, newest first.
    pub fn for_diagnosis(&self, diagnosis_id: &str) -> Vec<EstimateRecord> {
        let mut found: Vec<EstimateRecord> = self.with_records(|records| {
            records
                .values()
                .filter(|r| r.diagnosis_id == diagnosis_id)
                .cloned()
                .collect()
        });
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        found
    }

    pub fn len(&self) -> usize {
        self.with_records(|records| records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use fieldfix_core::Money;

    fn record(id: &str, diagnosis_id: &str, created_at: DateTime<Utc>) -> EstimateRecord {
        let draft = EstimateDraft::new()
            .with_parts(vec![PartLine::new("bc-50", "버너 캡", 1, Money::from_won(15_000))])
            .with_labor(vec![LaborSelection::new("cleaning", "세척/청소", Money::from_won(20_000))]);

        EstimateRecord {
            id: id.to_string(),
            diagnosis_id: diagnosis_id.to_string(),
            equipment_id: None,
            breakdown: draft.breakdown(),
            parts: draft.parts,
            labor: draft.selected_labor,
            travel_rate: None,
            include_vat: false,
            notes: String::new(),
            status: EstimateStatus::Draft,
            created_at,
            updated_at: created_at,
            valid_until: None,
        }
    }

    #[test]
    fn test_put_and_get() {
        let state = EstimateState::new();
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        state.put(record("e1", "d1", now));
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("e1").unwrap().breakdown.grand_total, Money::from_won(35_000));
        assert!(state.get("missing").is_none());
    }

    #[test]
    fn test_clones_share_storage() {
        let state = EstimateState::new();
        let other = state.clone();
        other.put(record("e1", "d1", Utc::now()));
        assert!(!state.is_empty());
    }

    #[test]
    fn test_for_diagnosis_newest_first() {
        let state = EstimateState::new();
        let t0 = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        state.put(record("old", "d1", t0));
        state.put(record("new", "d1", t0 + Duration::hours(2)));
        state.put(record("other", "d2", t0));

        let ids: Vec<String> = state.for_diagnosis("d1").into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["new", "old"]);
    }

    #[test]
    fn test_to_draft_round_trips_selection() {
        let r = record("e1", "d1", Utc::now());
        let draft = r.to_draft();
        assert_eq!(draft.breakdown(), r.breakdown);
        assert!(draft.validate().valid);
    }
}
