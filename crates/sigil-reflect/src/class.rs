//! Class model for decoration targets
//!
//! Metadata attaches to classes, but Rust has no runtime class objects, so
//! the class model is an explicit registry: each class is registered once
//! with an optional parent, and the parent pointers supply the ancestor
//! chain that inherited-metadata lookup walks.

use std::sync::LazyLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Identifier of a registered class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClassId(u32);

#[derive(Debug)]
struct ClassInfo {
    name: String,
    parent: Option<ClassId>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    classes: Vec<ClassInfo>,
    name_to_id: FxHashMap<String, ClassId>,
}

/// Registry of decoration-target classes.
///
/// Classes are registered once, in declaration order, and never removed;
/// the registry lives for the whole process.
#[derive(Debug, Default)]
pub struct ClassRegistry {
    inner: RwLock<RegistryInner>,
}

static REGISTRY: LazyLock<ClassRegistry> = LazyLock::new(ClassRegistry::new);

impl ClassRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by decoration targets.
    pub fn global() -> &'static ClassRegistry {
        &REGISTRY
    }

    /// Register a root class.
    pub fn register_class(&self, name: &str) -> ClassId {
        self.register(name, None)
    }

    /// Register a class extending `parent`.
    pub fn register_subclass(&self, name: &str, parent: ClassId) -> ClassId {
        self.register(name, Some(parent))
    }

    fn register(&self, name: &str, parent: Option<ClassId>) -> ClassId {
        let mut inner = self.inner.write();
        let id = ClassId(inner.classes.len() as u32);
        inner.classes.push(ClassInfo {
            name: name.to_string(),
            parent,
        });
        inner.name_to_id.insert(name.to_string(), id);
        id
    }

    /// Name of a registered class.
    pub fn class_name(&self, id: ClassId) -> Option<String> {
        let inner = self.inner.read();
        inner.classes.get(id.0 as usize).map(|info| info.name.clone())
    }

    /// Direct parent of a class, if it has one.
    pub fn parent_of(&self, id: ClassId) -> Option<ClassId> {
        let inner = self.inner.read();
        inner.classes.get(id.0 as usize).and_then(|info| info.parent)
    }

    /// Look up a class by name (last registration wins on collision).
    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        let inner = self.inner.read();
        inner.name_to_id.get(name).copied()
    }

    /// Whether `ancestor` appears in `sub`'s parent chain (`sub` itself
    /// excluded).
    pub fn is_subclass_of(&self, sub: ClassId, ancestor: ClassId) -> bool {
        let mut current = self.parent_of(sub);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }
}

/// Which side of a class a decoration lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetSite {
    /// The constructor side: the class itself and its static members.
    Constructor,
    /// The instance-prototype side: instance members.
    Prototype,
}

/// A decoration target: one side of one registered class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// The registered class.
    pub class: ClassId,
    /// Which side of the class.
    pub site: TargetSite,
}

impl Target {
    /// The constructor side of `class`.
    pub fn constructor(class: ClassId) -> Self {
        Self {
            class,
            site: TargetSite::Constructor,
        }
    }

    /// The instance-prototype side of `class`.
    pub fn prototype(class: ClassId) -> Self {
        Self {
            class,
            site: TargetSite::Prototype,
        }
    }

    /// Ancestor step: the same side of the parent class, if any.
    pub fn parent(&self) -> Option<Target> {
        ClassRegistry::global()
            .parent_of(self.class)
            .map(|parent| Target {
                class: parent,
                site: self.site,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = ClassRegistry::new();
        let id = registry.register_class("Widget");

        assert_eq!(registry.class_name(id), Some("Widget".to_string()));
        assert_eq!(registry.class_by_name("Widget"), Some(id));
        assert_eq!(registry.parent_of(id), None);
        assert_eq!(registry.class_by_name("Gadget"), None);
    }

    #[test]
    fn test_parent_chain() {
        let registry = ClassRegistry::new();
        let base = registry.register_class("Base");
        let middle = registry.register_subclass("Middle", base);
        let leaf = registry.register_subclass("Leaf", middle);

        assert_eq!(registry.parent_of(leaf), Some(middle));
        assert_eq!(registry.parent_of(middle), Some(base));
        assert_eq!(registry.parent_of(base), None);
    }

    #[test]
    fn test_is_subclass_of() {
        let registry = ClassRegistry::new();
        let base = registry.register_class("A");
        let middle = registry.register_subclass("B", base);
        let leaf = registry.register_subclass("C", middle);
        let other = registry.register_class("D");

        assert!(registry.is_subclass_of(leaf, base));
        assert!(registry.is_subclass_of(leaf, middle));
        assert!(!registry.is_subclass_of(base, leaf));
        assert!(!registry.is_subclass_of(leaf, other));
        // A class is not its own subclass.
        assert!(!registry.is_subclass_of(base, base));
    }

    #[test]
    fn test_target_parent_preserves_site() {
        let registry = ClassRegistry::global();
        let base = registry.register_class("TargetParentBase");
        let sub = registry.register_subclass("TargetParentSub", base);

        let proto = Target::prototype(sub);
        assert_eq!(proto.parent(), Some(Target::prototype(base)));

        let ctor = Target::constructor(sub);
        assert_eq!(ctor.parent(), Some(Target::constructor(base)));
        assert_eq!(Target::constructor(base).parent(), None);
    }
}
