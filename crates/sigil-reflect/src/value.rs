//! Spec values
//!
//! A spec is the user-supplied metadata value for one declaration site. The
//! engine treats it as a black box except for cloning and merging, so the
//! representation is a small dynamic value: scalars are stored inline, while
//! arrays and objects are `Arc`-shared nodes. A plain `clone()` aliases the
//! same node; only [`crate::deep_clone`] produces an independent copy.

use std::sync::Arc;
use std::time::SystemTime;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Fields of an object-valued spec, keyed by field name.
pub type SpecFields = FxHashMap<String, SpecValue>;

/// A dynamic metadata value attached at a declaration site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SpecValue {
    /// Absent value.
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// String scalar.
    Str(String),
    /// A point in time (the "Date-like" case).
    Date(SystemTime),
    /// Ordered sequence of values, shared by reference.
    Array(Arc<Vec<SpecValue>>),
    /// Structured record of named fields, shared by reference.
    Object(Arc<SpecFields>),
}

impl SpecValue {
    /// Build an object value from an iterator of `(name, value)` pairs.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, SpecValue)>,
    {
        Self::Object(Arc::new(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        ))
    }

    /// Build an array value from an iterator of values.
    pub fn array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = SpecValue>,
    {
        Self::Array(Arc::new(items.into_iter().collect()))
    }

    /// Whether this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Whether this value is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// The fields of an object value.
    pub fn as_object(&self) -> Option<&SpecFields> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }

    /// The items of an array value.
    pub fn as_array(&self) -> Option<&[SpecValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Whether two values share the same aggregate node.
    ///
    /// Always false for scalars, which have no identity.
    pub fn ptr_eq(&self, other: &SpecValue) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => Arc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Default for SpecValue {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for SpecValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for SpecValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for SpecValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for SpecValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for SpecValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<SystemTime> for SpecValue {
    fn from(value: SystemTime) -> Self {
        Self::Date(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_builder_and_accessors() {
        let value = SpecValue::object([("a", SpecValue::from(1)), ("b", SpecValue::from(true))]);
        assert!(value.is_object());
        let fields = value.as_object().unwrap();
        assert_eq!(fields.get("a"), Some(&SpecValue::Int(1)));
        assert_eq!(fields.get("b"), Some(&SpecValue::Bool(true)));
        assert_eq!(fields.get("c"), None);
    }

    #[test]
    fn test_array_builder_preserves_order() {
        let value = SpecValue::array([SpecValue::from(1), SpecValue::from(2), SpecValue::from(3)]);
        assert!(value.is_array());
        assert_eq!(
            value.as_array().unwrap(),
            &[SpecValue::Int(1), SpecValue::Int(2), SpecValue::Int(3)]
        );
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(SpecValue::from(42), SpecValue::Int(42));
        assert_eq!(SpecValue::from(1.5), SpecValue::Float(1.5));
        assert_eq!(SpecValue::from("admin"), SpecValue::Str("admin".to_string()));
        assert_eq!(SpecValue::from(false), SpecValue::Bool(false));
        assert!(SpecValue::default().is_null());
    }

    #[test]
    fn test_plain_clone_aliases_aggregates() {
        let original = SpecValue::object([("a", SpecValue::from(1))]);
        let alias = original.clone();
        assert_eq!(alias, original);
        assert!(alias.ptr_eq(&original));

        let scalar = SpecValue::from(1);
        assert!(!scalar.ptr_eq(&scalar.clone()));
    }

    #[test]
    fn test_serde_round_trip() {
        let value = SpecValue::object([
            ("name", SpecValue::from("widget")),
            ("tags", SpecValue::array([SpecValue::from("a"), SpecValue::from("b")])),
            ("weight", SpecValue::from(2.5)),
        ]);
        let encoded = serde_json::to_string(&value).unwrap();
        let decoded: SpecValue = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, value);
    }
}
