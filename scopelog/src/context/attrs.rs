//! Copy-on-write attribute store bound into a context chain.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use super::chain::{Context, Slot};

/// A frozen map of log attributes attached at one point in a context chain.
///
/// An `AttrMap` is fully built during derivation and never mutated
/// afterward; that construct-then-freeze discipline is what makes concurrent
/// reads and concurrent further derivations from the same node safe without
/// any locking. Entries iterate in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrMap {
    entries: BTreeMap<String, Value>,
}

impl AttrMap {
    /// Builds the successor map: a full shallow copy with one entry
    /// set or overwritten.
    fn derived(&self, key: String, value: Value) -> Self {
        let mut entries = self.entries.clone();
        entries.insert(key, value);
        Self { entries }
    }

    /// Gets a value from the map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all keys in sorted order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns a copy of all entries.
    #[must_use]
    pub fn to_dict(&self) -> BTreeMap<String, Value> {
        self.entries.clone()
    }
}

/// The token under which attribute maps are bound into contexts.
///
/// Created once at initialization and handed to both the derivation sites
/// and the [`ContextAttrSink`](crate::ContextAttrSink) decorator, so
/// application code cannot collide with the binding or reach it through any
/// other path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAttrs {
    slot: Slot<Arc<AttrMap>>,
}

impl LogAttrs {
    /// Creates an attribute token distinct from every other token.
    #[must_use]
    pub fn new() -> Self {
        Self { slot: Slot::new() }
    }

    /// Derives a child of `parent` whose attribute map additionally carries
    /// `key` → `value`.
    ///
    /// The parent's map, if any, is shallow-copied in full and the new entry
    /// set on the copy; an existing entry for `key` is overwritten in the
    /// copy only. The parent and any sibling derivation observe nothing.
    ///
    /// Cost is O(number of accumulated keys) per call: every derivation
    /// copies the whole map, trading copy cost for cross-branch isolation.
    /// Attribute counts per request are typically single digits.
    #[must_use]
    pub fn with_value(
        &self,
        parent: &Context,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Context {
        let next = match parent.value(&self.slot) {
            Some(existing) => existing.derived(key.into(), value.into()),
            None => AttrMap::default().derived(key.into(), value.into()),
        };
        parent.with_value(&self.slot, Arc::new(next))
    }

    /// Returns the attribute map reachable from `cx`, if its lineage ever
    /// attached one. Absence is not an error; it simply means there is
    /// nothing to inject.
    #[must_use]
    pub fn attached<'a>(&self, cx: &'a Context) -> Option<&'a AttrMap> {
        cx.value(&self.slot).map(Arc::as_ref)
    }
}
