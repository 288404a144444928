//! Reflection substrate for the sigil metadata toolkit
//!
//! This crate provides the pieces the decoration engine builds on:
//! - **Values**: [`SpecValue`], a dynamic value with shared aggregate nodes
//!   (`value` module)
//! - **Deep clone**: [`deep_clone`], a structural copy that breaks all
//!   sharing (`clone` module)
//! - **Class model**: [`ClassRegistry`] with parent pointers, and [`Target`]
//!   identifying one side of a registered class (`class` module)
//! - **Store**: [`ReflectStore`], the process-wide associative metadata
//!   store with own and inherited lookup (`store` module)

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod class;
pub mod clone;
pub mod store;
pub mod value;

pub use class::{ClassId, ClassRegistry, Target, TargetSite};
pub use clone::deep_clone;
pub use store::{MetadataKey, ReflectStore};
pub use value::{SpecFields, SpecValue};
