//! sigil: declaration-time metadata decoration
//!
//! A small toolkit that lets class authors attach structured metadata
//! ("specs") to classes, methods, and parameters through decorator
//! factories, and lets frameworks read the merged metadata back through an
//! inspector. Metadata is stored per `(key, target)` in a process-wide
//! store; the first decoration of a subclass pulls a deep-cloned copy of
//! the base class's metadata down and merges into it, while a second direct
//! decoration of the identical site is rejected as a duplicate.
//!
//! # Example
//!
//! ```rust,ignore
//! use sigil::{
//!     get_method_metadata, ClassRegistry, DecorationSite, InspectionOptions,
//!     MetadataKey, MethodDecoratorFactory, SpecValue, Target,
//! };
//!
//! let registry = ClassRegistry::global();
//! let base = registry.register_class("Controller");
//! let sub = registry.register_subclass("AdminController", base);
//!
//! let key = MetadataKey::new("app:acl");
//! MethodDecoratorFactory::new(key.clone(), SpecValue::object([("role", "admin".into())]))
//!     .decorate(&DecorationSite::method(Target::prototype(base), "list"))?;
//! MethodDecoratorFactory::new(key.clone(), SpecValue::object([("level", 5.into())]))
//!     .decorate(&DecorationSite::method(Target::prototype(sub), "list"))?;
//!
//! // {role: "admin", level: 5}: the subclass inherited and extended.
//! let merged = get_method_metadata(
//!     &key,
//!     Target::prototype(sub),
//!     "list",
//!     InspectionOptions::default(),
//! );
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod error;
pub mod factory;
pub mod inspector;
pub mod kinds;
pub mod map;
pub mod site;

pub use error::{DecorationError, Result};
pub use factory::{DecorationContext, DecorationKind, DecoratorFactory, DecoratorOptions};
pub use inspector::{
    get_all_method_metadata, get_all_parameter_metadata, get_class_metadata, get_method_metadata,
    get_parameter_metadata, InspectionOptions,
};
pub use kinds::{
    ClassDecoration, ClassDecoratorFactory, MethodDecoration, MethodDecoratorFactory,
    ParameterDecoration, ParameterDecoratorFactory,
};
pub use map::{MetadataMap, MetadataSlot, TaggedSpec, CONSTRUCTOR_KEY};
pub use site::DecorationSite;

// Re-export the reflection substrate so downstream frameworks need only
// one dependency.
pub use sigil_reflect::{
    deep_clone, ClassId, ClassRegistry, MetadataKey, ReflectStore, SpecFields, SpecValue, Target,
    TargetSite,
};
