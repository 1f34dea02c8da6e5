//! # State Module
//!
//! In-memory stores shared by the estimator commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐            ┌──────────────────────┐           │
//! │  │    EstimateState     │            │    ShareLinkState    │           │
//! │  │                      │ estimateId │                      │           │
//! │  │  Arc<Mutex<HashMap<  │◄───────────│  Arc<Mutex<HashMap<  │           │
//! │  │    id, Record>>>     │            │    token, Link>>>    │           │
//! │  └──────────────────────┘            └──────────────────────┘           │
//! │                                                                         │
//! │  Each command takes only the stores it touches. Clones share the same   │
//! │  underlying map.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Durable storage sits outside this crate; a persistence layer loads
//! records into these stores and reads them back out.

mod estimates;
mod share;

pub use estimates::{EstimateRecord, EstimateState};
pub use share::ShareLinkState;
