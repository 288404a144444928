//! Deep clone for spec values
//!
//! Produces a value that is structurally equal to the input but shares no
//! aggregate node with it, so that stored metadata and a caller's spec can
//! never alias each other. Recursion depth is bounded only by the input:
//! pathologically nested specs will overflow the stack. Cycle detection is
//! not performed; with immutable `Arc` nodes a cycle cannot be constructed
//! through this crate's API.

use std::sync::Arc;

use crate::value::SpecValue;

/// Structurally copy a spec value, breaking all sharing with the input.
///
/// Scalars are returned by value, dates by copying the instant, and arrays
/// and objects are rebuilt node by node into fresh allocations.
pub fn deep_clone(value: &SpecValue) -> SpecValue {
    match value {
        SpecValue::Str(s) => SpecValue::Str(s.clone()),
        SpecValue::Date(instant) => SpecValue::Date(*instant),
        SpecValue::Array(items) => {
            SpecValue::Array(Arc::new(items.iter().map(deep_clone).collect()))
        }
        SpecValue::Object(fields) => SpecValue::Object(Arc::new(
            fields
                .iter()
                .map(|(name, field)| (name.clone(), deep_clone(field)))
                .collect(),
        )),
        scalar => scalar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    #[test]
    fn test_deep_clone_breaks_sharing() {
        let nested = SpecValue::object([("inner", SpecValue::from(1))]);
        let items = SpecValue::array([SpecValue::from(1), SpecValue::from(2)]);
        let original = SpecValue::object([("nested", nested), ("items", items)]);

        let copy = deep_clone(&original);
        assert_eq!(copy, original);
        assert!(!copy.ptr_eq(&original));

        let original_fields = original.as_object().unwrap();
        let copy_fields = copy.as_object().unwrap();
        assert!(!copy_fields["nested"].ptr_eq(&original_fields["nested"]));
        assert!(!copy_fields["items"].ptr_eq(&original_fields["items"]));
    }

    #[test]
    fn test_scalars_returned_by_value() {
        assert_eq!(deep_clone(&SpecValue::Null), SpecValue::Null);
        assert_eq!(deep_clone(&SpecValue::Bool(true)), SpecValue::Bool(true));
        assert_eq!(deep_clone(&SpecValue::Int(7)), SpecValue::Int(7));
        assert_eq!(
            deep_clone(&SpecValue::Str("x".to_string())),
            SpecValue::Str("x".to_string())
        );
    }

    #[test]
    fn test_date_copied_by_instant() {
        let now = SystemTime::now();
        let copy = deep_clone(&SpecValue::Date(now));
        assert_eq!(copy, SpecValue::Date(now));
    }

    #[test]
    fn test_array_order_preserved() {
        let original = SpecValue::array([
            SpecValue::from("first"),
            SpecValue::from("second"),
            SpecValue::from("third"),
        ]);
        let copy = deep_clone(&original);
        assert_eq!(
            copy.as_array().unwrap(),
            original.as_array().unwrap()
        );
    }
}
