//! Traversal engine and composite collection operations for Underbar.
//!
//! This crate provides:
//! - [`each`] / [`try_each`] - The single dispatch point over sequences and mappings
//! - Traversal combinators ([`map`], [`filter`], [`reduce`], [`every`], ...)
//! - Composite operations ([`sort_by`], [`zip`], [`flatten`], [`intersection`], [`difference`])
//! - Mapping merges ([`extend`], [`defaults`])
//! - Seedable [`shuffle`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod composite;
mod keyset;
pub mod objects;
pub mod shuffle;
pub mod source;
pub mod traversal;

pub use composite::{
    Selector, difference, flatten, flatten_with, intersection, sort_by, zip,
};
pub use objects::{defaults, extend};
pub use shuffle::{shuffle, shuffle_seeded};
pub use source::{Key, Source, each, expect_sequence, try_each};
pub use traversal::{
    Invocation, Truthy, contains, every, every_truthy, filter, first, first_n, identity, index_of,
    invoke, last, last_n, map, pluck, reduce, reject, some, some_truthy, try_map, try_reduce,
    uniq,
};
