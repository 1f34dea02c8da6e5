//! # Share Links
//!
//! Rules for the read-only link a customer receives instead of (or next to)
//! the PDF.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  issue ──► created_at = now, expires_at = now + 30 days, views = 0      │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  open ───► now > expires_at ? ──yes──► ShareLinkExpired                 │
//! │                │ no                                                     │
//! │                ▼                                                        │
//! │            record_view() ──► views + 1                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Issuing tokens and storing links are the app layer's business; this module
//! only decides what a link allows at a given instant. The caller passes
//! `now` so the rules stay deterministic.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::validation::validate_share_token;

/// Default lifetime of a share link, in days.
pub const DEFAULT_SHARE_LINK_DAYS: i64 = 30;

/// Length of generated share tokens.
pub const SHARE_TOKEN_LEN: usize = 16;

/// A share link for one estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShareLink {
    pub id: String,
    pub token: String,
    pub estimate_id: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub expires_at: DateTime<Utc>,
    pub view_count: u64,
}

impl ShareLink {
    /// Creates a link valid from `now` for `lifetime`.
    ///
    /// Fails if the token is not URL-safe.
    pub fn new(
        id: impl Into<String>,
        token: impl Into<String>,
        estimate_id: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> CoreResult<Self> {
        let token = token.into();
        validate_share_token(&token)?;

        Ok(ShareLink {
            id: id.into(),
            token,
            estimate_id: estimate_id.into(),
            created_at: now,
            expires_at: now + lifetime,
            view_count: 0,
        })
    }

    /// Whether the link has expired at `now`.
    ///
    /// The link is still valid at exactly `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Checks whether the link may be opened at `now`.
    pub fn check_access(&self, now: DateTime<Utc>) -> CoreResult<()> {
        if self.is_expired(now) {
            return Err(CoreError::ShareLinkExpired {
                token: self.token.clone(),
                expired_at: self.expires_at,
            });
        }
        Ok(())
    }

    /// The link after one more customer view.
    #[must_use]
    pub fn record_view(&self) -> Self {
        ShareLink {
            view_count: self.view_count + 1,
            ..self.clone()
        }
    }

    /// Time left before expiry, or `None` once expired.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        (!self.is_expired(now)).then(|| self.expires_at - now)
    }

    /// Path of the public page for this link, relative to the site root.
    pub fn path(&self) -> String {
        format!("/share/{}", self.token)
    }
}

/// Default lifetime as a `Duration`.
pub fn default_lifetime() -> Duration {
    Duration::days(DEFAULT_SHARE_LINK_DAYS)
}

// =============================================================================
// Unit Tests
// =============================================================================
