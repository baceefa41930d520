//! Core types and trait definitions for the Stockcheck stock log.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; the alert derivation lives here as pure
//! functions over already-fetched observations.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod alerts;
pub mod error;
pub mod item;
pub mod observation;
pub mod reduce;
pub mod session;
pub mod store;

pub use error::{Error, Result};
