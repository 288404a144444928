//! Reflection store
//!
//! A process-wide associative store keyed by `(metadata key, target)`. Each
//! entry is the "own" metadata of its target; effective lookup walks the
//! target's ancestor chain until an own entry is found. Entries are never
//! removed: stored metadata lives as long as the process, matching the
//! lifetime of the class objects it describes.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;

use crate::class::Target;

/// Opaque identifier namespacing one category of metadata.
///
/// Keys compare by value, so two keys created from the same name address
/// the same metadata. Conventionally namespaced like `"sigil:inject"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetadataKey(Arc<str>);

impl MetadataKey {
    /// Create a key from its name.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The key's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MetadataKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MetadataKey {
    fn from(name: String) -> Self {
        Self(Arc::from(name.as_str()))
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Associative metadata store keyed by `(key, target)`.
///
/// Individual reads and writes are thread-safe; read-modify-write sequences
/// built on top of them are not atomic and must be serialized by the caller.
#[derive(Debug)]
pub struct ReflectStore<V> {
    entries: DashMap<(MetadataKey, Target), V>,
}

impl<V> ReflectStore<V> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<V> Default for ReflectStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> ReflectStore<V> {
    /// Store or overwrite the own value for `(key, target)`.
    pub fn define(&self, key: &MetadataKey, target: Target, value: V) {
        tracing::trace!(%key, ?target, "define metadata");
        self.entries.insert((key.clone(), target), value);
    }

    /// The value defined directly on `target`, ignoring ancestors.
    pub fn get_own(&self, key: &MetadataKey, target: Target) -> Option<V> {
        self.entries
            .get(&(key.clone(), target))
            .map(|entry| entry.value().clone())
    }

    /// The own value, or the nearest ancestor's value along the target's
    /// parent chain.
    pub fn get_metadata(&self, key: &MetadataKey, target: Target) -> Option<V> {
        let mut current = Some(target);
        while let Some(t) = current {
            if let Some(value) = self.get_own(key, t) {
                return Some(value);
            }
            current = t.parent();
        }
        None
    }

    /// Whether an own value is defined for `(key, target)`.
    pub fn has_own(&self, key: &MetadataKey, target: Target) -> bool {
        self.entries.contains_key(&(key.clone(), target))
    }

    /// Whether a value is defined on `target` or any of its ancestors.
    pub fn has_metadata(&self, key: &MetadataKey, target: Target) -> bool {
        let mut current = Some(target);
        while let Some(t) = current {
            if self.has_own(key, t) {
                return true;
            }
            current = t.parent();
        }
        false
    }
}
