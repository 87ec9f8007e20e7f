//! Type descriptors for runtime checks and error reporting.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type descriptor for a [`Value`](crate::Value).
///
/// Combinators check their inputs against these descriptors and report
/// the expected and actual types when a check fails.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// The missing marker.
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
    /// Ordered sequence.
    Vec,
    /// Key/value mapping.
    Map,
    /// Native function.
    Fn,
    /// Either a sequence or a mapping.
    Collection,
}

impl Type {
    /// Returns true if this type describes a scalar value.
    #[must_use]
    pub const fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Undefined | Self::Null | Self::Bool | Self::Int | Self::Float | Self::String
        )
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Vec => write!(f, "vec"),
            Self::Map => write!(f, "map"),
            Self::Fn => write!(f, "fn"),
            Self::Collection => write!(f, "collection"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
