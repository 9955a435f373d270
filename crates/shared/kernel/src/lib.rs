//! Kernel utilities shared across the autofill slices.
//! Keep this crate lightweight: layered config loading, bounded waits and the wall clock.
//!
//! ## Config loading
//! ```rust,no_run
//! use sfa_kernel::config::load_config;
//! use sfa_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(Some("autofill.toml")).unwrap();
//! ```
//!
//! ## Deadlines
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use sfa_kernel::deadline::within;
//! use std::time::Duration;
//!
//! let v = within(Duration::from_secs(1), "noop", async { 1 }).await;
//! assert_eq!(v, Ok(1));
//! # }
//! ```
pub mod clock;
pub mod config;
pub mod deadline;

pub use clock::now_millis;
pub use deadline::{DeadlineExceeded, within};
pub use sfa_domain as domain;
