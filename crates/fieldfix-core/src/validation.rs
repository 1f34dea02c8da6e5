//! # Validation Module
//!
//! Input validation for estimates and the fields around them.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Boundary (apps/estimator)                                     │
//! │  ├── Type validation (serde deserialization)                            │
//! │  └── Catalog lookups (unknown part / labor / travel ids)                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── validate_estimate: is the estimate billable?                       │
//! │  └── field validators: quantity, amount, email, share token             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculator (estimate.rs)                                      │
//! │  └── Never fails; trusts the layers above                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fieldfix_core::validation::validate_estimate;
//! use fieldfix_core::{LaborSelection, Money, PartLine};
//!
//! let labor = vec![LaborSelection::new("l1", "수리작업", Money::from_won(40_000))];
//! let result = validate_estimate(&[], &labor, Money::zero());
//!
//! assert!(!result.valid);
//! assert_eq!(result.errors, vec!["select at least one part."]);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{LaborSelection, PartLine};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest share token accepted by [`validate_share_token`].
pub const MAX_SHARE_TOKEN_LEN: usize = 64;

// =============================================================================
// Estimate Rules
// =============================================================================

/// One billing rule checked by [`validate_estimate`].
///
/// Rules are evaluated in declaration order, so the message list is always
/// ordered the same way for the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EstimateRule {
    /// At least one part must be on the estimate.
    PartsRequired,
    /// Every part line needs a quantity of 1 or more. Reported once, no
    /// matter how many lines violate it.
    QuantityAtLeastOne,
    /// At least one labor type must be selected.
    LaborRequired,
    /// Travel cost cannot be negative.
    TravelCostNonNegative,
}

impl EstimateRule {
    /// English message.
    pub fn message(&self) -> &'static str {
        match self {
            EstimateRule::PartsRequired => "select at least one part.",
            EstimateRule::QuantityAtLeastOne => "part quantity must be at least 1",
            EstimateRule::LaborRequired => "select at least one labor type.",
            EstimateRule::TravelCostNonNegative => "travel cost must be non-negative.",
        }
    }

    /// Korean message, as shown on the technician's estimate screen.
    pub fn message_ko(&self) -> &'static str {
        match self {
            EstimateRule::PartsRequired => "부품을 최소 1개 이상 선택해주세요.",
            EstimateRule::QuantityAtLeastOne => "부품 수량은 1개 이상이어야 합니다.",
            EstimateRule::LaborRequired => "작업 유형을 최소 1개 이상 선택해주세요.",
            EstimateRule::TravelCostNonNegative => "출장비는 0원 이상이어야 합니다.",
        }
    }
}

/// Language used to render [`EstimateRule`] messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLanguage {
    #[default]
    En,
    Ko,
}

impl MessageLanguage {
    /// Renders a rule in this language.
    pub fn render(&self, rule: EstimateRule) -> &'static str {
        match self {
            MessageLanguage::En => rule.message(),
            MessageLanguage::Ko => rule.message_ko(),
        }
    }
}

impl std::str::FromStr for MessageLanguage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(MessageLanguage::En),
            "ko" | "korean" => Ok(MessageLanguage::Ko),
            other => Err(ValidationError::InvalidFormat {
                field: "language".to_string(),
                reason: format!("unsupported language '{}', expected en or ko", other),
            }),
        }
    }
}

/// Outcome of [`validate_estimate`].
///
/// `valid` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EstimateValidation {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl EstimateValidation {
    /// Builds the outcome from violated rules, rendering each one message.
    pub fn from_violations(violations: &[EstimateRule], language: MessageLanguage) -> Self {
        let errors: Vec<String> = violations
            .iter()
            .map(|rule| language.render(*rule).to_string())
            .collect();

        EstimateValidation {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Converts a failed validation into an error for `?` propagation.
    pub fn into_result(self) -> ValidationResult<()> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationError::Estimate {
                errors: self.errors,
            })
        }
    }
}

/// Returns the violated rules in evaluation order.
pub fn check_estimate(
    parts: &[PartLine],
    labor: &[LaborSelection],
    travel_cost: Money,
) -> Vec<EstimateRule> {
    let mut violations = Vec::new();

    if parts.is_empty() {
        violations.push(EstimateRule::PartsRequired);
    }

    if parts.iter().any(|p| p.quantity <= 0) {
        violations.push(EstimateRule::QuantityAtLeastOne);
    }

    if labor.is_empty() {
        violations.push(EstimateRule::LaborRequired);
    }

    if travel_cost.is_negative() {
        violations.push(EstimateRule::TravelCostNonNegative);
    }

    violations
}

/// Checks whether an estimate is complete enough to be submitted.
///
/// ## Rules (fixed order)
/// ```text
/// 1. parts non-empty           → "select at least one part."
/// 2. every quantity > 0        → "part quantity must be at least 1"   (once)
/// 3. labor non-empty           → "select at least one labor type."
/// 4. travel_cost >= 0          → "travel cost must be non-negative."
/// ```
///
/// Unit prices and labor rates are deliberately not checked for sign or
/// against the catalog; see [`validate_amount`] for an opt-in check.
pub fn validate_estimate(
    parts: &[PartLine],
    labor: &[LaborSelection],
    travel_cost: Money,
) -> EstimateValidation {
    validate_estimate_in(parts, labor, travel_cost, MessageLanguage::En)
}

/// [`validate_estimate`] with messages rendered in `language`.
pub fn validate_estimate_in(
    parts: &[PartLine],
    labor: &[LaborSelection],
    travel_cost: Money,
    language: MessageLanguage,
) -> EstimateValidation {
    let violations = check_estimate(parts, labor, travel_cost);
    EstimateValidation::from_violations(&violations, language)
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates that a string field is present.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a part quantity (must be 1 or more).
///
/// ## Example
/// ```rust
/// use fieldfix_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates that an amount (unit price, rate) is zero or more.
///
/// Not applied by [`validate_estimate`]; callers that want to harden input
/// coming from outside the catalog can use it.
pub fn validate_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an email address.
///
/// Accepts `local@domain.tld`: exactly one `@`, no whitespace, a non-empty
/// local part, and a domain containing a `.` that is neither its first nor its
/// last character.
///
/// ## Example
/// ```rust
/// use fieldfix_core::validation::validate_email;
///
/// assert!(validate_email("owner@restaurant.kr").is_ok());
/// assert!(validate_email("owner@localhost").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must contain exactly one '@' after a name"));
    }

    let dotted = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !dotted {
        return Err(invalid("domain must contain a '.'"));
    }

    Ok(())
}

/// Validates a share link token.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Only letters, digits, `-` and `_` (URL-safe)
pub fn validate_share_token(token: &str) -> ValidationResult<()> {
    if token.is_empty() {
        return Err(ValidationError::Required {
            field: "token".to_string(),
        });
    }

    if token.len() > MAX_SHARE_TOKEN_LEN {
        return Err(ValidationError::TooLong {
            field: "token".to_string(),
            max: MAX_SHARE_TOKEN_LEN,
        });
    }

    if !token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "token".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn part(quantity: i64) -> PartLine {
        PartLine::new("p1", "온도 센서", quantity, Money::from_won(35_000))
    }

    fn labor() -> LaborSelection {
        LaborSelection::new("l1", "정밀점검", Money::from_won(25_000))
    }

    #[test]
    fn test_valid_estimate() {
        let result = validate_estimate(&[part(1)], &[labor()], Money::zero());
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn test_missing_parts() {
        let result = validate_estimate(&[], &[labor()], Money::zero());
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["select at least one part."]);
    }

    #[test]
    fn test_quantity_rule_reported_once() {
        let parts = vec![part(0), part(-1), part(2)];
        let result = validate_estimate(&parts, &[labor()], Money::zero());
        assert_eq!(result.errors, vec!["part quantity must be at least 1"]);
    }

    #[test]
    fn test_all_rules_in_order() {
        let violations = check_estimate(&[], &[], Money::from_won(-1));
        assert_eq!(
            violations,
            vec![
                EstimateRule::PartsRequired,
                EstimateRule::LaborRequired,
                EstimateRule::TravelCostNonNegative,
            ]
        );

        let violations = check_estimate(&[part(0)], &[], Money::from_won(-1));
        assert_eq!(
            violations,
            vec![
                EstimateRule::QuantityAtLeastOne,
                EstimateRule::LaborRequired,
                EstimateRule::TravelCostNonNegative,
            ]
        );
    }

    #[test]
    fn test_prices_are_not_checked() {
        let parts = vec![PartLine::new("p1", "x", 1, Money::from_won(-100))];
        let labor = vec![LaborSelection::new("l1", "x", Money::from_won(-5))];
        assert!(validate_estimate(&parts, &labor, Money::zero()).valid);
    }

    #[test]
    fn test_korean_messages() {
        let result = validate_estimate_in(&[], &[labor()], Money::zero(), MessageLanguage::Ko);
        assert_eq!(result.errors, vec!["부품을 최소 1개 이상 선택해주세요."]);
    }

    #[test]
    fn test_into_result_carries_messages() {
        let err = validate_estimate(&[], &[], Money::zero())
            .into_result()
            .unwrap_err();
        assert_eq!(
            err.messages(),
            vec!["select at least one part.", "select at least one labor type."]
        );
    }

    #[test]
    fn test_message_language_parsing() {
        assert_eq!("ko".parse::<MessageLanguage>().unwrap(), MessageLanguage::Ko);
        assert_eq!("EN".parse::<MessageLanguage>().unwrap(), MessageLanguage::En);
        assert!("fr".parse::<MessageLanguage>().is_err());
    }

    #[test]
    fn test_validate_quantity_and_amount() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());

        assert!(validate_amount("unit_price", Money::zero()).is_ok());
        assert!(validate_amount("unit_price", Money::from_won(-1)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("owner@restaurant.kr").is_ok());
        assert!(validate_email("a@b.c").is_ok());
        assert!(validate_email("first.last@mail.co.kr").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign.kr").is_err());
        assert!(validate_email("@restaurant.kr").is_err());
        assert!(validate_email("owner@localhost").is_err());
        assert!(validate_email("owner@.kr").is_err());
        assert!(validate_email("owner@restaurant.").is_err());
        assert!(validate_email("owner@@restaurant.kr").is_err());
        assert!(validate_email("own er@restaurant.kr").is_err());
    }

    #[test]
    fn test_validate_share_token() {
        assert!(validate_share_token("V1StGXR8_Z5jdHi6").is_ok());
        assert!(validate_share_token("").is_err());
        assert!(validate_share_token("has space").is_err());
        assert!(validate_share_token("../etc/passwd").is_err());
        assert!(validate_share_token(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert!(validate_required("equipment_id", "eq-1").is_ok());
        assert!(validate_required("equipment_id", "   ").is_err());
    }
}
