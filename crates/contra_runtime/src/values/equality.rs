use std::cmp::Ordering;
use std::sync::Arc;

use super::core::{Field, Value};

/// Structural equality. Closures are equal only to themselves.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Error(a), Value::Error(b)) => a == b,
        (Value::Record(a), Value::Record(b)) => {
            a.len() == b.len()
                && a.iter().zip(b.iter()).all(|(left, right)| {
                    left.name == right.name && values_equal(&left.value, &right.value)
                })
        }
        (Value::Variant(a), Value::Variant(b)) => {
            a.tag == b.tag && values_equal(&a.payload, &b.payload)
        }
        (Value::Vector(a), Value::Vector(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|(left, right)| values_equal(left, right))
        }
        (Value::Halt, Value::Halt) => true,
        (Value::Continuation(a), Value::Continuation(b)) => Arc::ptr_eq(a, b),
        (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
        (Value::FunctionGroup(a), Value::FunctionGroup(b)) => {
            Arc::ptr_eq(&a.group, &b.group) && a.index == b.index
        }
        _ => false,
    }
}

/// Ordering between two values of the same kind. Closures and values of
/// different kinds are unordered.
pub fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
        (Value::Error(a), Value::Error(b)) => Some(a.as_bytes().cmp(b.as_bytes())),
        (Value::Record(a), Value::Record(b)) => compare_sequences(a, b, compare_fields),
        (Value::Variant(a), Value::Variant(b)) => match a.tag.cmp(&b.tag) {
            Ordering::Equal => compare_values(&a.payload, &b.payload),
            other => Some(other),
        },
        (Value::Vector(a), Value::Vector(b)) => compare_sequences(a, b, compare_values),
        _ => None,
    }
}

fn compare_fields(left: &Field, right: &Field) -> Option<Ordering> {
    match left.name.cmp(&right.name) {
        Ordering::Equal => compare_values(&left.value, &right.value),
        other => Some(other),
    }
}

fn compare_sequences<T>(
    left: &[T],
    right: &[T],
    cmp: impl Fn(&T, &T) -> Option<Ordering>,
) -> Option<Ordering> {
    for (left, right) in left.iter().zip(right.iter()) {
        match cmp(left, right)? {
            Ordering::Equal => continue,
            other => return Some(other),
        }
    }
    Some(left.len().cmp(&right.len()))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_equal(self, other)
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        compare_values(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::core::Field;

    fn rec(fields: &[(&str, i64)]) -> Value {
        Value::record(
            fields
                .iter()
                .map(|(name, value)| Field::new(*name, Value::int(*value)))
                .collect(),
        )
    }

    #[test]
    fn ints_order_numerically() {
        let big = Value::int(10_i64).partial_cmp(&Value::int(9_i64));
        assert_eq!(big, Some(Ordering::Greater));
        let huge: num_bigint::BigInt = "123456789012345678901234567890".parse().unwrap();
        assert!(Value::int(huge) > Value::int(i64::MAX));
    }

    #[test]
    fn strings_order_by_bytes() {
        assert!(Value::str("Zebra") < Value::str("apple"));
        assert!(Value::str("ab") < Value::str("abc"));
    }

    #[test]
    fn records_compare_position_by_position() {
        assert_eq!(rec(&[("a", 1), ("b", 2)]), rec(&[("a", 1), ("b", 2)]));
        assert_ne!(rec(&[("a", 1), ("b", 2)]), rec(&[("b", 2), ("a", 1)]));
        assert!(rec(&[("a", 1), ("b", 2)]) < rec(&[("a", 1), ("b", 3)]));
        assert!(rec(&[("a", 1)]) < rec(&[("a", 1), ("a", 1)]));
    }

    #[test]
    fn variants_order_by_tag_then_payload() {
        let a = Value::variant("a", Value::int(5_i64));
        let b = Value::variant("b", Value::int(1_i64));
        assert!(a < b);
        assert!(Value::variant("a", Value::int(1_i64)) < a);
    }

    #[test]
    fn vectors_order_pointwise() {
        let short = Value::vector(vec![Value::int(1_i64)]);
        let long = Value::vector(vec![Value::int(1_i64), Value::int(0_i64)]);
        assert!(Value::vector(Vec::new()) < short);
        assert!(short < long);
    }

    #[test]
    fn mismatched_kinds_are_unordered_and_unequal() {
        assert_eq!(compare_values(&Value::int(1_i64), &Value::str("1")), None);
        assert_ne!(Value::int(1_i64), Value::str("1"));
        assert_eq!(compare_values(&Value::Halt, &Value::Halt), None);
        assert_eq!(Value::Halt, Value::Halt);
    }
}
