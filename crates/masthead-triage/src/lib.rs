#![forbid(unsafe_code)]
//! masthead-triage library.
//!
//! Reviewer matching for incoming submissions: a weighted linear score
//! over expertise overlap, current workload, and assignment recency, plus
//! conflict-of-interest exclusion and ranking.
//!
//! # Conventions
//!
//! - **Errors**: scoring is pure and total; bad inputs clamp, they never
//!   panic.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod rank;
pub mod score;
