//! Metadata inspector
//!
//! Read-side counterpart of the decorator factories: pure projections over
//! the process-wide store. Nothing here mutates; total absence of metadata
//! is reported as `None`, never as an error.

use rustc_hash::FxHashMap;

use sigil_reflect::{MetadataKey, SpecValue, Target};

use crate::factory::store;
use crate::map::{MetadataMap, MetadataSlot, CONSTRUCTOR_KEY};

/// Options for inspector reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct InspectionOptions {
    /// Restrict the read to metadata stored directly on the target,
    /// ignoring ancestors.
    pub own_metadata_only: bool,
}

fn lookup(key: &MetadataKey, target: Target, opts: InspectionOptions) -> Option<MetadataMap> {
    if opts.own_metadata_only {
        store().get_own(key, target)
    } else {
        store().get_metadata(key, target)
    }
}

/// All method-level metadata under `key`, keyed by member name.
pub fn get_all_method_metadata(
    key: &MetadataKey,
    target: Target,
    opts: InspectionOptions,
) -> Option<FxHashMap<String, SpecValue>> {
    let map = lookup(key, target, opts)?;
    Some(
        map.iter()
            .filter_map(|(member, slot)| match slot {
                MetadataSlot::Spec(spec) => Some((member.to_string(), spec.value.clone())),
                MetadataSlot::Params(_) => None,
            })
            .collect(),
    )
}

/// One method's metadata ([`CONSTRUCTOR_KEY`] addresses the class slot).
pub fn get_method_metadata(
    key: &MetadataKey,
    target: Target,
    method: &str,
    opts: InspectionOptions,
) -> Option<SpecValue> {
    lookup(key, target, opts)?
        .spec(method)
        .map(|spec| spec.value.clone())
}

/// Class-level metadata stored in the constructor slot.
pub fn get_class_metadata(
    key: &MetadataKey,
    target: Target,
    opts: InspectionOptions,
) -> Option<SpecValue> {
    get_method_metadata(key, target, CONSTRUCTOR_KEY, opts)
}

/// Ordered per-parameter metadata for one method.
pub fn get_all_parameter_metadata(
    key: &MetadataKey,
    target: Target,
    method: &str,
    opts: InspectionOptions,
) -> Option<Vec<Option<SpecValue>>> {
    let map = lookup(key, target, opts)?;
    map.params(method).map(|params| {
        params
            .iter()
            .map(|slot| slot.as_ref().map(|spec| spec.value.clone()))
            .collect()
    })
}

/// Metadata for a single parameter slot.
pub fn get_parameter_metadata(
    key: &MetadataKey,
    target: Target,
    method: &str,
    index: usize,
    opts: InspectionOptions,
) -> Option<SpecValue> {
    get_all_parameter_metadata(key, target, method, opts)?
        .get(index)
        .cloned()
        .flatten()
}
