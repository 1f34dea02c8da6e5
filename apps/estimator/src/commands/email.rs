//! # Email Commands
//!
//! Compose the customer email for an estimate and hand it to a transport.
//!
//! ## Send Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  send_estimate_email(estimateId, recipient)                             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  recipient valid? ──no──► VALIDATION_ERROR     (status untouched)       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  status allows send? ──no──► BUSINESS_LOGIC    (accepted / rejected)    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  MailTransport::deliver ──err──► INTERNAL      (status untouched)       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  status = sent, updated_at = now on the stored record (under the lock)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The PDF itself is rendered elsewhere; the message only names the
//! attachment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use fieldfix_core::format_currency;
use fieldfix_core::validation::validate_email;

use crate::catalog::RateCatalog;
use crate::config::EstimatorConfig;
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::{EstimateRecord, EstimateState};

/// Customer name used when the diagnosis recorded none.
pub const DEFAULT_CUSTOMER_NAME: &str = "고객";

/// Equipment label used when the estimate has no known equipment.
pub const DEFAULT_EQUIPMENT_NAME: &str = "설비";

/// A composed, ready-to-deliver email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    /// File name for the estimate PDF attachment
    pub attachment_name: String,
}

/// Mail delivery failure reported by a transport.
#[derive(Debug, Error)]
#[error("Mail delivery failed: {0}")]
pub struct DeliveryError(pub String);

impl From<DeliveryError> for ApiError {
    fn from(err: DeliveryError) -> Self {
        error!("{}", err);
        ApiError::new(ErrorCode::Internal, "Email could not be sent")
    }
}

/// Something that can put an [`EmailMessage`] on the wire (SMTP, an HTTP
/// mail API, a test double).
pub trait MailTransport {
    fn deliver(&self, message: &EmailMessage) -> Result<(), DeliveryError>;
}

/// Input for [`send_estimate_email`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEstimateRequest {
    pub estimate_id: String,
    pub recipient_email: String,
    #[serde(default)]
    pub customer_name: Option<String>,
}

/// Builds the customer email for an estimate.
///
/// ## Subject
/// `[{company short name}] 견적서 - {customer}님 ({equipment})`
pub fn compose_estimate_email(
    config: &EstimatorConfig,
    record: &EstimateRecord,
    recipient: &str,
    customer_name: Option<&str>,
    equipment_name: &str,
) -> ApiResult<EmailMessage> {
    let recipient = recipient.trim();
    validate_email(recipient)?;

    let customer = customer_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_CUSTOMER_NAME);

    Ok(EmailMessage {
        to: recipient.to_string(),
        subject: format!(
            "[{}] 견적서 - {}님 ({})",
            config.company.short_name, customer, equipment_name
        ),
        text_body: text_body(config, record, customer, equipment_name),
        attachment_name: format!("견적서_{}_{}.pdf", customer, equipment_name),
    })
}

/// Composes, delivers and marks the estimate `sent`.
pub fn send_estimate_email(
    transport: &dyn MailTransport,
    estimates: &EstimateState,
    catalog: &RateCatalog,
    config: &EstimatorConfig,
    request: &SendEstimateRequest,
) -> ApiResult<EstimateRecord> {
    send_estimate_email_at(transport, estimates, catalog, config, request, Utc::now())
}

/// [`send_estimate_email`] with an explicit clock.
pub fn send_estimate_email_at(
    transport: &dyn MailTransport,
    estimates: &EstimateState,
    catalog: &RateCatalog,
    config: &EstimatorConfig,
    request: &SendEstimateRequest,
    now: DateTime<Utc>,
) -> ApiResult<EstimateRecord> {
    let record = estimates
        .get(&request.estimate_id)
        .ok_or_else(|| ApiError::not_found("Estimate", &request.estimate_id))?;

    let equipment_name = record
        .equipment_id
        .as_deref()
        .and_then(|id| catalog.equipment(id))
        .map(|e| e.name.as_str())
        .unwrap_or(DEFAULT_EQUIPMENT_NAME);

    let message = compose_estimate_email(
        config,
        &record,
        &request.recipient_email,
        request.customer_name.as_deref(),
        equipment_name,
    )?;
    record.status.mark_sent()?;

    transport.deliver(&message)?;

    // the record may have been edited while the mail was in flight
    let sent = estimates.with_records_mut(|records| {
        let current = records
            .get_mut(&request.estimate_id)
            .ok_or_else(|| ApiError::not_found("Estimate", &request.estimate_id))?;
        current.status = current.status.mark_sent()?;
        current.updated_at = now;
        Ok::<_, ApiError>(current.clone())
    })?;

    info!(estimate_id = %sent.id, to = %message.to, "Estimate email sent");
    Ok(sent)
}

fn text_body(
    config: &EstimatorConfig,
    record: &EstimateRecord,
    customer: &str,
    equipment_name: &str,
) -> String {
    let mut lines = vec![
        format!("안녕하세요, {}님.", customer),
        String::new(),
        "요청하신 A/S 진단 견적서를 보내드립니다.".to_string(),
        String::new(),
        "[견적 요약]".to_string(),
        format!("설비명: {}", equipment_name),
        format!("총 견적금액: {}", format_currency(record.breakdown.grand_total)),
    ];
    if let Some(valid_until) = record.valid_until {
        lines.push(format!(
            "견적 유효기간: {}",
            valid_until.format("%Y. %-m. %-d.")
        ));
    }

    lines.extend([
        String::new(),
        "견적서 상세 내용은 첨부된 PDF 파일을 확인해 주시기 바랍니다.".to_string(),
        "궁금하신 사항이 있으시면 언제든지 연락 주시기 바랍니다.".to_string(),
        String::new(),
        "감사합니다.".to_string(),
        String::new(),
        "---".to_string(),
        config.company.name.clone(),
    ]);

    let company = &config.company;
    if let Some(phone) = &company.phone {
        lines.push(format!("전화: {}", phone));
    }
    if let Some(email) = &company.email {
        lines.push(format!("이메일: {}", email));
    }
    if let Some(website) = &company.website {
        lines.push(format!("홈페이지: {}", website));
    }

    lines.join("\n")
}
