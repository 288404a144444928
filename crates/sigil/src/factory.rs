//! Decorator factory merge engine
//!
//! A factory is constructed once per declaration site with a key, a spec,
//! and options, and applied when the declaration is registered. Application
//! is a read-merge-write sequence over the process-wide store:
//!
//! 1. load the target's own metadata for the key;
//! 2. if absent and inheritance is allowed, load the effective (inherited)
//!    metadata, deep-clone it, and fold the new spec in;
//! 3. otherwise fold the new spec into the existing own metadata, rejecting
//!    a second direct application at the identical site;
//! 4. store the merged map back as the target's own metadata.
//!
//! How the spec folds into the map slot is supplied per decoration kind
//! through the [`DecorationKind`] strategy.

use std::sync::{Arc, LazyLock};

use sigil_reflect::{deep_clone, MetadataKey, ReflectStore, SpecFields, SpecValue};

use crate::error::{DecorationError, Result};
use crate::map::MetadataMap;
use crate::site::DecorationSite;

static STORE: LazyLock<ReflectStore<MetadataMap>> = LazyLock::new(ReflectStore::new);

/// The process-wide metadata store shared by factories and the inspector.
pub(crate) fn store() -> &'static ReflectStore<MetadataMap> {
    &STORE
}

/// Per-factory configuration.
#[derive(Debug, Clone)]
pub struct DecoratorOptions {
    /// Diagnostics label; defaults to the decoration kind's name.
    pub decorator_name: Option<String>,
    /// Merge with ancestor metadata when the target has none of its own.
    pub allow_inheritance: bool,
    /// Deep-clone the caller's spec at construction time, so later merges
    /// never touch the caller's object.
    pub clone_input_spec: bool,
}

impl Default for DecoratorOptions {
    fn default() -> Self {
        Self {
            decorator_name: None,
            allow_inheritance: true,
            clone_input_spec: true,
        }
    }
}

/// Everything a decoration kind hook may consult for one application.
#[derive(Debug)]
pub struct DecorationContext<'a> {
    /// The spec being applied.
    pub spec: &'a SpecValue,
    /// The factory's options.
    pub options: &'a DecoratorOptions,
    /// The site being decorated.
    pub site: &'a DecorationSite,
    decorator_name: &'a str,
}

impl DecorationContext<'_> {
    /// Fold the new spec into an existing slot value.
    ///
    /// The merge contract, exactly one level deep:
    /// - inheritance disabled, no existing value, or a `Null` spec: the new
    ///   spec as-is;
    /// - either side an array: the new spec (arrays replace, never merge);
    /// - existing value not an object: the new spec;
    /// - otherwise the new spec's fields laid over a deep clone of the
    ///   existing object, new fields winning; nested values replace whole.
    pub fn inherit(&self, existing: Option<&SpecValue>) -> SpecValue {
        if !self.options.allow_inheritance {
            return self.spec.clone();
        }
        let Some(existing) = existing else {
            return self.spec.clone();
        };
        if self.spec.is_null() {
            return self.spec.clone();
        }
        if existing.is_array() || self.spec.is_array() {
            return self.spec.clone();
        }
        let Some(existing_fields) = existing.as_object() else {
            return self.spec.clone();
        };
        let mut merged: SpecFields = existing_fields
            .iter()
            .map(|(name, field)| (name.clone(), deep_clone(field)))
            .collect();
        if let Some(new_fields) = self.spec.as_object() {
            for (name, field) in new_fields.iter() {
                merged.insert(name.clone(), field.clone());
            }
        }
        SpecValue::Object(Arc::new(merged))
    }

    /// Diagnostics name of the decorator being applied.
    pub fn decorator_name(&self) -> &str {
        self.decorator_name
    }

    /// Duplicate-application error for this site.
    pub fn duplicate_error(&self) -> DecorationError {
        DecorationError::DuplicateDecoration {
            decorator: self.decorator_name.to_string(),
            site: self.site.to_string(),
        }
    }
}

/// Strategy implemented by each decoration kind (class, method, parameter).
///
/// The engine in [`DecoratorFactory`] is kind-agnostic; a kind supplies how
/// to address its slot in the metadata map and how to fold data at that
/// slot. The hooks default to failing with
/// [`DecorationError::NotImplemented`], so a kind that omits one surfaces a
/// configuration error at first use rather than merging incorrectly.
pub trait DecorationKind: Send + Sync {
    /// Kind name used in diagnostics when the options carry no decorator
    /// name.
    fn name(&self) -> &'static str;

    /// Fold the new spec into a deep-cloned copy of inherited metadata.
    fn merge_with_inherited(
        &self,
        _cx: &DecorationContext<'_>,
        _inherited: MetadataMap,
    ) -> Result<MetadataMap> {
        Err(DecorationError::NotImplemented {
            kind: self.name(),
            hook: "merge_with_inherited",
        })
    }

    /// Fold the new spec into metadata already stored on the same target.
    fn merge_with_own(
        &self,
        _cx: &DecorationContext<'_>,
        _own: MetadataMap,
    ) -> Result<MetadataMap> {
        Err(DecorationError::NotImplemented {
            kind: self.name(),
            hook: "merge_with_own",
        })
    }
}

/// Declaration-time decorator factory: applies one spec under one key.
#[derive(Debug)]
pub struct DecoratorFactory<K: DecorationKind> {
    key: MetadataKey,
    spec: SpecValue,
    options: DecoratorOptions,
    kind: K,
}

impl<K: DecorationKind + Default> DecoratorFactory<K> {
    /// Factory with default options.
    pub fn new(key: impl Into<MetadataKey>, spec: SpecValue) -> Self {
        Self::with_options(key, spec, DecoratorOptions::default())
    }

    /// Factory with explicit options.
    pub fn with_options(
        key: impl Into<MetadataKey>,
        spec: SpecValue,
        options: DecoratorOptions,
    ) -> Self {
        let spec = if options.clone_input_spec {
            deep_clone(&spec)
        } else {
            spec
        };
        Self {
            key: key.into(),
            spec,
            options,
            kind: K::default(),
        }
    }
}

impl<K: DecorationKind> DecoratorFactory<K> {
    /// The factory's metadata key.
    pub fn key(&self) -> &MetadataKey {
        &self.key
    }

    /// The spec this factory applies.
    pub fn spec(&self) -> &SpecValue {
        &self.spec
    }

    fn decorator_name(&self) -> &str {
        self.options
            .decorator_name
            .as_deref()
            .unwrap_or_else(|| self.kind.name())
    }

    /// Apply the factory's spec at `site`.
    ///
    /// The read-merge-write sequence is not atomic: callers running
    /// decoration concurrently must serialize per `(key, target)` pair.
    /// Declaration-time registration is sequential, so this only matters
    /// for multi-threaded registration schemes.
    pub fn decorate(&self, site: &DecorationSite) -> Result<()> {
        let cx = DecorationContext {
            spec: &self.spec,
            options: &self.options,
            site,
            decorator_name: self.decorator_name(),
        };
        let own = store().get_own(&self.key, site.target);
        let merged = match own {
            None if self.options.allow_inheritance => {
                let inherited = store()
                    .get_metadata(&self.key, site.target)
                    .map(|map| map.deep_clone())
                    .unwrap_or_default();
                tracing::trace!(key = %self.key, site = %site, "merging with inherited metadata");
                self.kind.merge_with_inherited(&cx, inherited)?
            }
            own => {
                tracing::trace!(key = %self.key, site = %site, "merging with own metadata");
                self.kind.merge_with_own(&cx, own.unwrap_or_default())?
            }
        };
        store().define(&self.key, site.target, merged);
        tracing::debug!(
            key = %self.key,
            site = %site,
            decorator = self.decorator_name(),
            "decoration applied"
        );
        Ok(())
    }

    /// The callable marker form: a closure that applies this factory to a
    /// site, for frameworks that register decorations as callbacks.
    pub fn create(self) -> impl Fn(&DecorationSite) -> Result<()> {
        move |site| self.decorate(site)
    }
}
