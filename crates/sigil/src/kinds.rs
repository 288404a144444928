//! Decoration kinds
//!
//! The three specializations of the merge engine. Each supplies only how to
//! address its slot in the metadata map and how to fold data at that slot;
//! the surrounding load/clone/store sequence lives in
//! [`crate::factory::DecoratorFactory`].

use crate::error::Result;
use crate::factory::{DecorationContext, DecorationKind, DecoratorFactory};
use crate::map::{MetadataMap, TaggedSpec, CONSTRUCTOR_KEY};

/// Method-level decoration: one spec per member name.
#[derive(Debug, Clone, Copy, Default)]
pub struct MethodDecoration;

impl DecorationKind for MethodDecoration {
    fn name(&self) -> &'static str {
        "MethodDecorator"
    }

    fn merge_with_inherited(
        &self,
        cx: &DecorationContext<'_>,
        mut inherited: MetadataMap,
    ) -> Result<MetadataMap> {
        let member = cx.site.member_key().to_string();
        let merged = cx.inherit(inherited.spec(&member).map(|spec| &spec.value));
        inherited.set_spec(&member, TaggedSpec::tagged(merged, cx.site.target));
        Ok(inherited)
    }

    fn merge_with_own(
        &self,
        cx: &DecorationContext<'_>,
        mut own: MetadataMap,
    ) -> Result<MetadataMap> {
        let member = cx.site.member_key().to_string();
        if own.spec(&member).and_then(|spec| spec.origin()) == Some(cx.site.target) {
            return Err(cx.duplicate_error());
        }
        // An untagged slot came from an ancestor via clone-down: extend it.
        let merged = cx.inherit(own.spec(&member).map(|spec| &spec.value));
        own.set_spec(&member, TaggedSpec::tagged(merged, cx.site.target));
        Ok(own)
    }
}

/// Class-level decoration: a single spec in the constructor slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassDecoration;

impl DecorationKind for ClassDecoration {
    fn name(&self) -> &'static str {
        "ClassDecorator"
    }

    fn merge_with_inherited(
        &self,
        cx: &DecorationContext<'_>,
        mut inherited: MetadataMap,
    ) -> Result<MetadataMap> {
        let merged = cx.inherit(inherited.spec(CONSTRUCTOR_KEY).map(|spec| &spec.value));
        inherited.set_spec(CONSTRUCTOR_KEY, TaggedSpec::tagged(merged, cx.site.target));
        Ok(inherited)
    }

    fn merge_with_own(
        &self,
        cx: &DecorationContext<'_>,
        mut own: MetadataMap,
    ) -> Result<MetadataMap> {
        if own
            .spec(CONSTRUCTOR_KEY)
            .and_then(|spec| spec.origin())
            == Some(cx.site.target)
        {
            return Err(cx.duplicate_error());
        }
        let merged = cx.inherit(own.spec(CONSTRUCTOR_KEY).map(|spec| &spec.value));
        own.set_spec(CONSTRUCTOR_KEY, TaggedSpec::tagged(merged, cx.site.target));
        Ok(own)
    }
}

/// Parameter-level decoration: index-addressed specs per member.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterDecoration;

impl DecorationKind for ParameterDecoration {
    fn name(&self) -> &'static str {
        "ParameterDecorator"
    }

    fn merge_with_inherited(
        &self,
        cx: &DecorationContext<'_>,
        mut inherited: MetadataMap,
    ) -> Result<MetadataMap> {
        let member = cx.site.member_key().to_string();
        let index = cx.site.index.unwrap_or(0);
        let existing = inherited
            .params(&member)
            .and_then(|params| params.get(index))
            .and_then(|slot| slot.as_ref())
            .map(|spec| spec.value.clone());
        let merged = cx.inherit(existing.as_ref());
        let params = inherited.params_slot_mut(&member, index);
        params[index] = Some(TaggedSpec::tagged(merged, cx.site.target));
        Ok(inherited)
    }

    fn merge_with_own(
        &self,
        cx: &DecorationContext<'_>,
        mut own: MetadataMap,
    ) -> Result<MetadataMap> {
        let member = cx.site.member_key().to_string();
        let index = cx.site.index.unwrap_or(0);
        let existing = own
            .params(&member)
            .and_then(|params| params.get(index))
            .and_then(|slot| slot.as_ref());
        if existing.and_then(|spec| spec.origin()) == Some(cx.site.target) {
            return Err(cx.duplicate_error());
        }
        let existing_value = existing.map(|spec| spec.value.clone());
        let merged = cx.inherit(existing_value.as_ref());
        let params = own.params_slot_mut(&member, index);
        params[index] = Some(TaggedSpec::tagged(merged, cx.site.target));
        Ok(own)
    }
}

/// Factory producing class-level decorators.
pub type ClassDecoratorFactory = DecoratorFactory<ClassDecoration>;
/// Factory producing method-level decorators.
pub type MethodDecoratorFactory = DecoratorFactory<MethodDecoration>;
/// Factory producing parameter-level decorators.
pub type ParameterDecoratorFactory = DecoratorFactory<ParameterDecoration>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecorationError;
    use crate::inspector::{get_method_metadata, get_parameter_metadata, InspectionOptions};
    use crate::site::DecorationSite;
    use sigil_reflect::{ClassRegistry, MetadataKey, SpecValue, Target};

    #[test]
    fn test_method_decoration_and_duplicate() {
        let class = ClassRegistry::global().register_class("KindMethodDup");
        let target = Target::prototype(class);
        let key = MetadataKey::new("test:kind-method-dup");
        let site = DecorationSite::method(target, "run");

        let factory = MethodDecoratorFactory::new(
            key.clone(),
            SpecValue::object([("role", SpecValue::from("admin"))]),
        );
        factory.decorate(&site).unwrap();
        assert_eq!(
            get_method_metadata(&key, target, "run", InspectionOptions::default()),
            Some(SpecValue::object([("role", SpecValue::from("admin"))]))
        );

        let err = factory.decorate(&site).unwrap_err();
        match err {
            DecorationError::DuplicateDecoration { decorator, site } => {
                assert_eq!(decorator, "MethodDecorator");
                assert_eq!(site, "KindMethodDup.prototype.run");
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_class_decoration_and_duplicate() {
        let class = ClassRegistry::global().register_class("KindClassDup");
        let target = Target::constructor(class);
        let key = MetadataKey::new("test:kind-class-dup");
        let site = DecorationSite::class(target);

        let first = ClassDecoratorFactory::new(key.clone(), SpecValue::from("v1"));
        first.decorate(&site).unwrap();
        assert_eq!(
            get_method_metadata(&key, target, CONSTRUCTOR_KEY, InspectionOptions::default()),
            Some(SpecValue::from("v1"))
        );

        let second = ClassDecoratorFactory::new(key, SpecValue::from("v2"));
        let err = second.decorate(&site).unwrap_err();
        assert!(matches!(err, DecorationError::DuplicateDecoration { .. }));
    }

    #[test]
    fn test_parameter_decoration_slots() {
        let class = ClassRegistry::global().register_class("KindParams");
        let target = Target::prototype(class);
        let key = MetadataKey::new("test:kind-params");

        let first = ParameterDecoratorFactory::new(key.clone(), SpecValue::from("ctx"));
        first
            .decorate(&DecorationSite::parameter(target, "handle", 1))
            .unwrap();
        let second = ParameterDecoratorFactory::new(key.clone(), SpecValue::from("req"));
        second
            .decorate(&DecorationSite::parameter(target, "handle", 0))
            .unwrap();

        let opts = InspectionOptions::default();
        assert_eq!(
            get_parameter_metadata(&key, target, "handle", 0, opts),
            Some(SpecValue::from("req"))
        );
        assert_eq!(
            get_parameter_metadata(&key, target, "handle", 1, opts),
            Some(SpecValue::from("ctx"))
        );
        assert_eq!(get_parameter_metadata(&key, target, "handle", 2, opts), None);

        // Same parameter slot decorated twice on the same target.
        let err = second
            .decorate(&DecorationSite::parameter(target, "handle", 0))
            .unwrap_err();
        match err {
            DecorationError::DuplicateDecoration { site, .. } => {
                assert_eq!(site, "KindParams.prototype.handle[0]");
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_different_members_do_not_collide() {
        let class = ClassRegistry::global().register_class("KindMembers");
        let target = Target::prototype(class);
        let key = MetadataKey::new("test:kind-members");

        let factory = MethodDecoratorFactory::new(key.clone(), SpecValue::from(1));
        factory
            .decorate(&DecorationSite::method(target, "first"))
            .unwrap();
        factory
            .decorate(&DecorationSite::method(target, "second"))
            .unwrap();

        let opts = InspectionOptions::default();
        assert_eq!(
            get_method_metadata(&key, target, "first", opts),
            Some(SpecValue::from(1))
        );
        assert_eq!(
            get_method_metadata(&key, target, "second", opts),
            Some(SpecValue::from(1))
        );
    }
}
