#![forbid(unsafe_code)]
//! masthead-core library.
//!
//! Submission lifecycle domain for an academic journal: the status
//! transition table, SLA deadline policy, append-only status history, and
//! the workflow store that ties them together at the persistence seam.
//!
//! # Conventions
//!
//! - **Errors**: typed errors via `thiserror`; `anyhow::Result` at I/O
//!   boundaries (config loading).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).
//!   Subscriber setup belongs to the embedding application.

pub mod config;
pub mod error;
pub mod machine;
pub mod model;
pub mod sla;
pub mod store;
