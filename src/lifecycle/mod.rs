//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Select environment → Build source → Load + validate → Install
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - No retry: a static misconfiguration cannot fix itself

pub mod startup;

pub use startup::{startup, StartupOptions};
