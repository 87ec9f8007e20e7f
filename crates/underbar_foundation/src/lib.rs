//! Core types shared by every Underbar layer.
//!
//! This crate provides:
//! - [`Value`] - The dynamic value every combinator operates on
//! - [`Type`] - Type descriptors used in error reporting
//! - [`Error`] - Rich error types with context
//! - [`Limits`] - Configurable bounds for recursive and caching operations
//! - Persistent collections ([`LtVec`], [`LtMap`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod config;
pub mod error;
pub mod types;
pub mod value;

pub use collections::{LtMap, LtVec};
pub use config::Limits;
pub use error::{Error, ErrorContext, ErrorKind, SemanticLimit};
pub use types::Type;
pub use value::{NativeFn, Value};

/// Result type alias using the Underbar [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
