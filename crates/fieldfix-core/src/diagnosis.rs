//! # Diagnosis Form
//!
//! What the technician fills in on site before an estimate exists: customer
//! details, the equipment checklist, and parts picked against checklist items.
//!
//! ```text
//! Equipment ──► Checklist (checked? problem?) ──► Parts per problem ──► Estimate
//!                                                       │
//!                                      DiagnosisForm::part_lines()
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::PartLine;
use crate::validation::{validate_email, validate_required, ValidationResult};

/// Customer contact details. Every field is optional on site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl CustomerInfo {
    /// Email with blank strings treated as absent.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.trim().is_empty())
    }
}

/// Result of one checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckResult {
    pub item_id: String,
    pub checked: bool,
    pub has_problem: bool,
    #[serde(default)]
    pub note: Option<String>,
}

/// A part chosen to fix a specific checklist problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SelectedPart {
    pub part_id: String,
    pub name: String,
    #[serde(default)]
    pub part_number: Option<String>,
    pub quantity: i64,
    pub unit_price: Money,
    pub checklist_item_id: String,
}

impl SelectedPart {
    /// The estimate line for this part.
    pub fn to_part_line(&self) -> PartLine {
        PartLine::new(
            self.part_id.clone(),
            self.name.clone(),
            self.quantity,
            self.unit_price,
        )
    }
}

/// A submitted diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DiagnosisForm {
    pub equipment_id: String,
    #[serde(default)]
    pub customer: CustomerInfo,
    #[serde(default)]
    pub check_results: Vec<CheckResult>,
    #[serde(default)]
    pub selected_parts: Vec<SelectedPart>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl DiagnosisForm {
    /// Part lines to seed the estimate with, in selection order.
    pub fn part_lines(&self) -> Vec<PartLine> {
        self.selected_parts.iter().map(SelectedPart::to_part_line).collect()
    }

    /// Checklist items the technician flagged as faulty.
    pub fn problems(&self) -> impl Iterator<Item = &CheckResult> {
        self.check_results.iter().filter(|r| r.has_problem)
    }
}

/// Validates a diagnosis before it is saved.
///
/// ## Rules
/// - `equipment_id` is required
/// - customer email, when given, must be well formed
/// - each selected part has quantity ≥ 1 and unit price ≥ 0
/// - at least one checklist item is checked
///
/// Stops at the first violation.
pub fn validate_diagnosis(form: &DiagnosisForm) -> ValidationResult<()> {
    validate_required("equipment_id", &form.equipment_id)?;

    if let Some(email) = form.customer.email() {
        validate_email(email)?;
    }

    for part in &form.selected_parts {
        if part.quantity <= 0 {
            return Err(ValidationError::MustBePositive {
                field: format!("quantity of {}", part.name),
            });
        }
        if part.unit_price.is_negative() {
            return Err(ValidationError::MustBeNonNegative {
                field: format!("unit price of {}", part.name),
            });
        }
    }

    if !form.check_results.iter().any(|r| r.checked) {
        return Err(ValidationError::NothingSelected {
            field: "checklist item".to_string(),
            requirement: "checked".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
