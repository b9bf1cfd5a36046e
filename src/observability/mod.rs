//! Observability subsystem.
//!
//! Structured logging via `tracing`. The library only emits events; the
//! binary decides where they go.

pub mod logging;
