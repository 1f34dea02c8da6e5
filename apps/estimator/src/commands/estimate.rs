//! # Estimate Commands
//!
//! Turn a technician's selection into a priced, validated estimate.
//!
//! ## Build Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EstimateRequest { parts: [{partId, quantity}], laborIds, travelRateId }│
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐     │
//! │  │  1. Resolve every id through the RateCatalog (unknown → 404)   │     │
//! │  │  2. Freeze prices into PartLine / LaborSelection / TravelRate  │     │
//! │  │  3. Validate (ordered rule messages → 400)                     │     │
//! │  │  4. Calculate the breakdown                                    │     │
//! │  └────────────────────────────────────────────────────────────────┘     │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  EstimateRecord { status: draft, breakdown, validUntil, ... }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use fieldfix_core::diagnosis::DiagnosisForm;
use fieldfix_core::{EstimateDraft, EstimateStatus, PartLine, ValidationError};

use crate::catalog::RateCatalog;
use crate::config::EstimatorConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::{EstimateRecord, EstimateState};

/// One requested part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartRequest {
    pub part_id: String,
    pub quantity: i64,
}

/// What the technician selected on the estimate screen.
///
/// ## JSON
/// ```json
/// {
///   "diagnosisId": "d-42",
///   "equipmentId": "gas-range",
///   "parts": [{ "partId": "ic-5000", "quantity": 2 }],
///   "laborIds": ["replace-simple"],
///   "travelRateId": "within-10km",
///   "includeVat": true,
///   "notes": "점화 불량"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub diagnosis_id: String,

    #[serde(default)]
    pub equipment_id: Option<String>,

    #[serde(default)]
    pub parts: Vec<PartRequest>,

    #[serde(default)]
    pub labor_ids: Vec<String>,

    #[serde(default)]
    pub travel_rate_id: Option<String>,

    /// Off unless the request asks for it.
    #[serde(default)]
    pub include_vat: bool,

    #[serde(default)]
    pub notes: String,
}

impl EstimateRequest {
    /// Request prefilled from a diagnosis: every selected part with its
    /// quantity, nothing else chosen yet and VAT off.
    pub fn from_diagnosis(diagnosis_id: impl Into<String>, form: &DiagnosisForm) -> Self {
        EstimateRequest {
            diagnosis_id: diagnosis_id.into(),
            equipment_id: Some(form.equipment_id.clone()),
            parts: form
                .selected_parts
                .iter()
                .map(|p| PartRequest {
                    part_id: p.part_id.clone(),
                    quantity: p.quantity,
                })
                .collect(),
            labor_ids: Vec::new(),
            travel_rate_id: None,
            include_vat: false,
            notes: form.notes.clone().unwrap_or_default(),
        }
    }
}

/// Resolves catalog ids into a draft with frozen prices.
///
/// ## Errors
/// - `NOT_FOUND` for an unknown part, labor or travel id
/// - `VALIDATION_ERROR` when the same labor id is requested twice
pub fn resolve_draft(catalog: &RateCatalog, request: &EstimateRequest) -> ApiResult<EstimateDraft> {
    let parts = request
        .parts
        .iter()
        .map(|req| {
            let part = catalog
                .part(&req.part_id)
                .ok_or_else(|| ApiError::not_found("Part", &req.part_id))?;
            Ok(PartLine::new(
                part.id.clone(),
                part.name.clone(),
                req.quantity,
                part.price,
            ))
        })
        .collect::<ApiResult<Vec<_>>>()?;

    let mut seen = HashSet::new();
    let mut labor = Vec::with_capacity(request.labor_ids.len());
    for id in &request.labor_ids {
        if !seen.insert(id.as_str()) {
            return Err(ValidationError::InvalidFormat {
                field: "laborIds".to_string(),
                reason: format!("labor '{}' selected more than once", id),
            }
            .into());
        }
        let rate = catalog
            .labor(id)
            .ok_or_else(|| ApiError::not_found("Labor rate", id))?;
        labor.push(rate.clone());
    }

    let travel_rate = request
        .travel_rate_id
        .as_deref()
        .map(|id| {
            catalog
                .travel(id)
                .cloned()
                .ok_or_else(|| ApiError::not_found("Travel rate", id))
        })
        .transpose()?;

    Ok(EstimateDraft::new()
        .with_parts(parts)
        .with_labor(labor)
        .with_travel_rate(travel_rate)
        .with_vat(request.include_vat)
        .with_notes(request.notes.clone()))
}

/// Builds a new estimate record from a request.
pub fn build_estimate(
    catalog: &RateCatalog,
    config: &EstimatorConfig,
    request: &EstimateRequest,
) -> ApiResult<EstimateRecord> {
    build_estimate_at(catalog, config, request, Utc::now())
}

/// [`build_estimate`] with an explicit clock.
pub fn build_estimate_at(
    catalog: &RateCatalog,
    config: &EstimatorConfig,
    request: &EstimateRequest,
    now: DateTime<Utc>,
) -> ApiResult<EstimateRecord> {
    debug!(
        diagnosis_id = %request.diagnosis_id,
        parts = request.parts.len(),
        labor = request.labor_ids.len(),
        "build_estimate"
    );

    let draft = resolve_draft(catalog, request)?;
    draft.validate_in(config.estimate.language).into_result()?;
    let breakdown = draft.breakdown();

    let record = EstimateRecord {
        id: Uuid::new_v4().to_string(),
        diagnosis_id: request.diagnosis_id.clone(),
        equipment_id: request.equipment_id.clone(),
        parts: draft.parts,
        labor: draft.selected_labor,
        travel_rate: draft.travel_rate,
        include_vat: draft.include_vat,
        breakdown,
        notes: draft.notes,
        status: EstimateStatus::Draft,
        created_at: now,
        updated_at: now,
        valid_until: valid_until(config, now),
    };

    info!(
        estimate_id = %record.id,
        grand_total = %record.breakdown.grand_total,
        "Estimate built"
    );
    Ok(record)
}

/// Rebuilds an existing estimate from a new request.
///
/// Prices are re-read from the catalog and totals recomputed from scratch.
/// Id, status and creation time carry over.
pub fn update_estimate(
    record: &EstimateRecord,
    catalog: &RateCatalog,
    config: &EstimatorConfig,
    request: &EstimateRequest,
) -> ApiResult<EstimateRecord> {
    update_estimate_at(record, catalog, config, request, Utc::now())
}

/// [`update_estimate`] with an explicit clock.
pub fn update_estimate_at(
    record: &EstimateRecord,
    catalog: &RateCatalog,
    config: &EstimatorConfig,
    request: &EstimateRequest,
    now: DateTime<Utc>,
) -> ApiResult<EstimateRecord> {
    let rebuilt = build_estimate_at(catalog, config, request, now)?;

    debug!(estimate_id = %record.id, "Estimate updated");
    Ok(EstimateRecord {
        id: record.id.clone(),
        status: record.status,
        created_at: record.created_at,
        valid_until: record.valid_until,
        ..rebuilt
    })
}

/// Builds an estimate and stores it.
pub fn save_estimate(
    estimates: &EstimateState,
    catalog: &RateCatalog,
    config: &EstimatorConfig,
    request: &EstimateRequest,
) -> ApiResult<EstimateRecord> {
    let record = build_estimate(catalog, config, request)?;
    estimates.put(record.clone());
    Ok(record)
}

/// Fetches a stored estimate.
pub fn get_estimate(estimates: &EstimateState, id: &str) -> ApiResult<EstimateRecord> {
    estimates
        .get(id)
        .ok_or_else(|| ApiError::not_found("Estimate", id))
}

fn valid_until(config: &EstimatorConfig, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    config
        .estimate
        .validity_days
        .map(|days| now + Duration::days(days))
}
