//! # Commands Module
//!
//! Everything a caller (web handler, CLI) invokes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── estimate.rs  ◄─── Build, update, store estimates
//! ├── share.rs     ◄─── Issue and open share links
//! └── email.rs     ◄─── Compose and send the customer email
//! ```
//!
//! Each command takes only the state it touches and returns
//! `Result<T, ApiError>`. Clock-dependent commands come in pairs: the plain
//! one reads `Utc::now()`, the `_at` variant takes the instant explicitly.

pub mod email;
pub mod estimate;
pub mod share;

pub use email::{
    compose_estimate_email, send_estimate_email, DeliveryError, EmailMessage, MailTransport,
    SendEstimateRequest,
};
pub use estimate::{
    build_estimate, get_estimate, save_estimate, update_estimate, EstimateRequest, PartRequest,
};
pub use share::{create_share_link, open_share_link, ShareLinkResponse, SharedEstimate};
