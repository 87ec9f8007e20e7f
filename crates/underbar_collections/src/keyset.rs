//! Set of values identified by their coerced string keys.
//!
//! Enumeration follows property-key order: canonical array-index keys
//! (`"0"` through `"4294967294"`) ascend numerically, then every other key
//! appears in first-insertion order. `uniq` and `intersection` surface this
//! order directly.

use std::collections::HashMap;

use underbar_foundation::Value;

#[derive(Debug)]
struct Entry {
    key: String,
    value: Value,
    count: usize,
}

/// Insertion-tracking set keyed by [`Value::coerced_key`].
#[derive(Debug, Default)]
pub(crate) struct KeySet {
    entries: Vec<Entry>,
    positions: HashMap<String, usize>,
}

impl KeySet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds `value` unless its key is present. Returns true if it was added.
    pub(crate) fn insert(&mut self, value: &Value) -> bool {
        let key = value.coerced_key();
        if self.positions.contains_key(&key) {
            return false;
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push(Entry {
            key,
            value: value.clone(),
            count: 0,
        });
        true
    }

    /// Bumps the occurrence count for `value`, inserting it first if needed.
    pub(crate) fn increment(&mut self, value: &Value) -> usize {
        self.insert(value);
        let position = self.positions[&value.coerced_key()];
        let entry = &mut self.entries[position];
        entry.count += 1;
        entry.count
    }

    pub(crate) fn contains(&self, value: &Value) -> bool {
        self.positions.contains_key(&value.coerced_key())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the stored values in enumeration order.
    pub(crate) fn into_values(self) -> Vec<Value> {
        self.into_values_where(|_| true)
    }

    /// Returns stored values whose occurrence count satisfies `keep`, in
    /// enumeration order.
    pub(crate) fn into_values_where(self, keep: impl Fn(usize) -> bool) -> Vec<Value> {
        let (mut indexed, named): (Vec<_>, Vec<_>) = self
            .entries
            .into_iter()
            .filter(|entry| keep(entry.count))
            .partition(|entry| array_index(&entry.key).is_some());

        indexed.sort_by_key(|entry| array_index(&entry.key));
        indexed
            .into_iter()
            .chain(named)
            .map(|entry| entry.value)
            .collect()
    }
}

/// Parses a canonical array-index key.
fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}
