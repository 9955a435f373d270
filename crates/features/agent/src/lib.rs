//! # Page agent
//!
//! Orchestrates one page: [`sfa_classifier`] types its inputs, [`sfa_patterns`] suggests
//! and learns values, and the host (browser glue, CLI) drives it with page events and
//! [`HostRequest`] messages.
//!
//! ```text
//! host ── scan ──▶ PageAgent ── classify ──▶ FieldType
//!      ◀─ Prefill ─┘    │
//!      ── submit ─▶     └── learn(site), learn(*) ──▶ PatternStore ──▶ vault ──▶ storage
//! ```

mod agent;
mod builder;
mod error;
pub mod install;
mod page;
mod protocol;

pub use agent::PageAgent;
pub use builder::{AgentBuilder, DiskAgent};
pub use error::{AgentError, AgentErrorExt};
pub use install::{CLEANUP_PERIOD_MINUTES, Installation};
pub use page::{FieldId, InputField, PageSnapshot, Prefill, SubmitReport};
pub use protocol::{HostRequest, HostResponse, StatusResponse};
