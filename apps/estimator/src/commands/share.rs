//! # Share Link Commands
//!
//! Issue and open the read-only links customers receive.
//!
//! ## Customer Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Technician                         Customer                            │
//! │  ──────────                         ────────                            │
//! │                                                                         │
//! │  create_share_link(estimate)                                            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  https://.../share/V1StGXR8Z5jdHi6B ──(SMS / email)──► opens link       │
//! │                                                              │          │
//! │                                                              ▼          │
//! │                                      open_share_link(token)             │
//! │                                        unknown token ──► NOT_FOUND      │
//! │                                        past expiry   ──► EXPIRED (410)  │
//! │                                        no estimate   ──► NOT_FOUND      │
//! │                                        otherwise     ──► estimate,      │
//! │                                                          views + 1      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use fieldfix_core::share::SHARE_TOKEN_LEN;
use fieldfix_core::ShareLink;

use crate::config::EstimatorConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::{EstimateRecord, EstimateState, ShareLinkState};

/// Returned to the technician after issuing a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLinkResponse {
    pub id: String,
    pub token: String,
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

/// What the customer's browser receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedEstimate {
    pub estimate: EstimateRecord,
    pub expires_at: DateTime<Utc>,
    pub view_count: u64,
}

/// Issues a new share link for a stored estimate.
pub fn create_share_link(
    links: &ShareLinkState,
    estimates: &EstimateState,
    config: &EstimatorConfig,
    estimate_id: &str,
) -> ApiResult<ShareLinkResponse> {
    create_share_link_at(links, estimates, config, estimate_id, Utc::now())
}

/// [`create_share_link`] with an explicit clock.
pub fn create_share_link_at(
    links: &ShareLinkState,
    estimates: &EstimateState,
    config: &EstimatorConfig,
    estimate_id: &str,
    now: DateTime<Utc>,
) -> ApiResult<ShareLinkResponse> {
    if estimates.get(estimate_id).is_none() {
        return Err(ApiError::not_found("Estimate", estimate_id));
    }

    let link = links.with_links_mut(|map| {
        let mut token = new_token();
        while map.contains_key(&token) {
            warn!("Share token collision, drawing another");
            token = new_token();
        }

        let link = ShareLink::new(
            Uuid::new_v4().to_string(),
            token,
            estimate_id,
            now,
            config.share_lifetime(),
        )?;
        map.insert(link.token.clone(), link.clone());
        Ok::<_, ApiError>(link)
    })?;

    info!(
        estimate_id = %estimate_id,
        expires_at = %link.expires_at,
        "Share link created"
    );

    Ok(ShareLinkResponse {
        url: config.share.url_for(&link.token),
        id: link.id,
        token: link.token,
        expires_at: link.expires_at,
    })
}

/// Opens a share link on behalf of a customer and counts the view.
pub fn open_share_link(
    links: &ShareLinkState,
    estimates: &EstimateState,
    token: &str,
) -> ApiResult<SharedEstimate> {
    open_share_link_at(links, estimates, token, Utc::now())
}

/// [`open_share_link`] with an explicit clock.
///
/// Expired links are left in place so repeated opens keep answering
/// `EXPIRED` rather than `NOT_FOUND`.
pub fn open_share_link_at(
    links: &ShareLinkState,
    estimates: &EstimateState,
    token: &str,
    now: DateTime<Utc>,
) -> ApiResult<SharedEstimate> {
    debug!(token = %token, "open_share_link");

    let (link, estimate) = links.with_links_mut(|map| {
        let current = map
            .get(token)
            .ok_or_else(|| ApiError::not_found("Share link", token))?;
        current.check_access(now)?;

        // a link whose estimate is gone does not count a view
        let estimate = estimates
            .get(&current.estimate_id)
            .ok_or_else(|| ApiError::not_found("Estimate", &current.estimate_id))?;

        let viewed = current.record_view();
        map.insert(token.to_string(), viewed.clone());
        Ok::<_, ApiError>((viewed, estimate))
    })?;

    Ok(SharedEstimate {
        estimate,
        expires_at: link.expires_at,
        view_count: link.view_count,
    })
}

/// 16 URL-safe characters from a v4 UUID.
fn new_token() -> String {
    let mut token = Uuid::new_v4().simple().to_string();
    token.truncate(SHARE_TOKEN_LEN);
    token
}
