#![forbid(unsafe_code)]
//! masthead-search library.
//!
//! Lexical "semantic-ish" search over manuscript titles and abstracts: a
//! hashed bag-of-words vectorizer, cosine ranking over an in-memory index,
//! and a TTL cache for repeated queries.
//!
//! # Conventions
//!
//! - **Errors**: vectorization and lookup are total; there is nothing to
//!   fail.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod cache;
pub mod index;
pub mod vectorize;
