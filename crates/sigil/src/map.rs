//! Metadata maps and origin tags
//!
//! The store holds one [`MetadataMap`] per `(key, target)` pair: member name
//! to slot, with the empty string reserved for the class-level slot. Each
//! stored spec travels in a [`TaggedSpec`] envelope recording the target it
//! was *directly* applied to: the side channel the engine uses to tell an
//! inherited copy apart from a direct application of the same decorator.

use rustc_hash::FxHashMap;
use serde::Serialize;
use sigil_reflect::{deep_clone, SpecValue, Target};

/// Map slot key reserved for class-level (constructor) metadata.
pub const CONSTRUCTOR_KEY: &str = "";

/// A stored spec together with the target it was directly applied to.
///
/// The origin is set at construction and can never change afterwards. An
/// inherited copy carries no origin (see [`MetadataMap::deep_clone`]), so
/// `origin() == Some(current_target)` holds exactly when the value was
/// written by a direct decoration of that target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaggedSpec {
    /// The stored spec value.
    pub value: SpecValue,
    #[serde(skip)]
    origin: Option<Target>,
}

impl TaggedSpec {
    /// Envelope with no origin, as produced by inheritance copying.
    pub fn untagged(value: SpecValue) -> Self {
        Self {
            value,
            origin: None,
        }
    }

    /// Envelope recording a direct application to `target`.
    pub fn tagged(value: SpecValue, target: Target) -> Self {
        Self {
            value,
            origin: Some(target),
        }
    }

    /// The target this value was directly applied to, if any.
    pub fn origin(&self) -> Option<Target> {
        self.origin
    }
}

/// One member's stored metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MetadataSlot {
    /// A single spec (class- and method-kind decorations).
    Spec(TaggedSpec),
    /// Parameter specs addressed by position (parameter-kind decorations).
    Params(Vec<Option<TaggedSpec>>),
}

/// Member-name-keyed metadata stored for one `(key, target)` pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataMap {
    slots: FxHashMap<String, MetadataSlot>,
}

impl MetadataMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the map has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of member slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// The spec stored for `member`, if that slot holds a single spec.
    pub fn spec(&self, member: &str) -> Option<&TaggedSpec> {
        match self.slots.get(member) {
            Some(MetadataSlot::Spec(spec)) => Some(spec),
            _ => None,
        }
    }

    /// The parameter sequence stored for `member`, if that slot holds one.
    pub fn params(&self, member: &str) -> Option<&[Option<TaggedSpec>]> {
        match self.slots.get(member) {
            Some(MetadataSlot::Params(params)) => Some(params),
            _ => None,
        }
    }

    /// Store a single spec for `member`, replacing any previous slot.
    pub fn set_spec(&mut self, member: &str, spec: TaggedSpec) {
        self.slots.insert(member.to_string(), MetadataSlot::Spec(spec));
    }

    /// Mutable parameter sequence for `member`, created on demand (replacing
    /// a scalar slot if present) and grown to cover `index`.
    pub fn params_slot_mut(&mut self, member: &str, index: usize) -> &mut Vec<Option<TaggedSpec>> {
        let slot = self
            .slots
            .entry(member.to_string())
            .or_insert_with(|| MetadataSlot::Params(Vec::new()));
        if !matches!(slot, MetadataSlot::Params(_)) {
            *slot = MetadataSlot::Params(Vec::new());
        }
        let MetadataSlot::Params(params) = slot else {
            unreachable!()
        };
        if params.len() <= index {
            params.resize(index + 1, None);
        }
        params
    }

    /// Iterate over `(member, slot)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataSlot)> {
        self.slots.iter().map(|(member, slot)| (member.as_str(), slot))
    }

    /// Independent structural copy with every origin tag cleared.
    ///
    /// This is the copy made when inherited metadata is pulled down into a
    /// subclass: values must not alias the ancestor's stored data, and they
    /// must not read as "directly applied" on the subclass.
    pub fn deep_clone(&self) -> Self {
        let slots = self
            .slots
            .iter()
            .map(|(member, slot)| {
                let slot = match slot {
                    MetadataSlot::Spec(spec) => {
                        MetadataSlot::Spec(TaggedSpec::untagged(deep_clone(&spec.value)))
                    }
                    MetadataSlot::Params(params) => MetadataSlot::Params(
                        params
                            .iter()
                            .map(|slot| {
                                slot.as_ref()
                                    .map(|spec| TaggedSpec::untagged(deep_clone(&spec.value)))
                            })
                            .collect(),
                    ),
                };
                (member.clone(), slot)
            })
            .collect();
        Self { slots }
    }
}
