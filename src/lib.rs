//! Underbar - Functional utilities over dynamic values
//!
//! This crate re-exports all layers of the Underbar system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: underbar_functions   — once, memoize, throttle, delay, timer queue
//! Layer 1: underbar_collections — Traversal engine, composite operations
//! Layer 0: underbar_foundation  — Core types (Value, Error, Limits)
//! ```
//!
//! The collection and function layers are independent of each other; both
//! build only on the foundation.

pub use underbar_collections as collections;
pub use underbar_foundation as foundation;
pub use underbar_functions as functions;
