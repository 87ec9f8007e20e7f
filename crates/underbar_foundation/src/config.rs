//! Configurable limits for recursive and caching operations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bounds applied by operations that recurse or accumulate state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Limits {
    /// Deepest sequence nesting that `flatten` will descend into.
    pub max_flatten_depth: usize,

    /// Maximum number of results a memoized function retains
    /// (`None` = unbounded).
    pub max_memo_entries: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_flatten_depth: 256,
            max_memo_entries: None,
        }
    }
}

impl Limits {
    /// Builder method to set the flatten depth limit.
    #[must_use]
    pub fn with_max_flatten_depth(mut self, depth: usize) -> Self {
        self.max_flatten_depth = depth;
        self
    }

    /// Builder method to cap the memo cache.
    #[must_use]
    pub fn with_max_memo_entries(mut self, entries: usize) -> Self {
        self.max_memo_entries = Some(entries);
        self
    }

    /// Builder method to remove the memo cache cap.
    #[must_use]
    pub fn with_unbounded_memo(mut self) -> Self {
        self.max_memo_entries = None;
        self
    }
}
