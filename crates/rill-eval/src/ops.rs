//! Binary operator and indexing semantics.
//!
//! These are pure functions over [`Value`]s; the interpreter evaluates the
//! operands and delegates here. The dispatch order matters and mirrors the
//! language definition:
//!
//! 1. `&&` / `||` coerce both operands via truthiness (both operands are
//!    already evaluated - Rill does not short-circuit).
//! 2. `==` / `!=` compare canonical string forms.
//! 3. Arithmetic and relational operators on two numeric operands work in
//!    `f64`; the result is a float iff either operand was, except `/`
//!    which always yields a float. Division by zero yields `0.0`.
//! 4. `+` with at least one string operand concatenates canonical forms.
//! 5. Anything else is `null`.

use rill_par::BinOp;

use crate::value::Value;

/// Applies a binary operator to two evaluated operands.
pub fn binary(op: BinOp, left: &Value, right: &Value) -> Value {
    match op {
        BinOp::And => Value::Bool(left.is_truthy() && right.is_truthy()),
        BinOp::Or => Value::Bool(left.is_truthy() || right.is_truthy()),
        BinOp::Eq => Value::Bool(left.to_string() == right.to_string()),
        BinOp::Ne => Value::Bool(left.to_string() != right.to_string()),
        _ => {
            if left.is_numeric() && right.is_numeric() {
                numeric(op, left, right)
            } else if op == BinOp::Add
                && (matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)))
            {
                Value::str(format!("{}{}", left, right))
            } else {
                Value::Null
            }
        },
    }
}

/// Numeric arithmetic and comparison.
///
/// Both operands are widened to `f64`. An arithmetic result truncates
/// back toward zero to an integer unless either operand was a float.
fn numeric(op: BinOp, left: &Value, right: &Value) -> Value {
    let l = left.to_float();
    let r = right.to_float();
    let any_float = matches!(left, Value::Float(_)) || matches!(right, Value::Float(_));

    let result = match op {
        BinOp::Add => l + r,
        BinOp::Sub => l - r,
        BinOp::Mul => l * r,
        BinOp::Mod => l % r,
        // Division always produces a float, and division by zero is
        // defined as zero rather than an error.
        BinOp::Div => {
            return Value::Float(if r == 0.0 { 0.0 } else { l / r });
        },
        BinOp::Lt => return Value::Bool(l < r),
        BinOp::Gt => return Value::Bool(l > r),
        BinOp::Le => return Value::Bool(l <= r),
        BinOp::Ge => return Value::Bool(l >= r),
        // Handled in `binary` above.
        BinOp::And | BinOp::Or | BinOp::Eq | BinOp::Ne => return Value::Null,
    };

    if any_float {
        Value::Float(result)
    } else {
        Value::Int(result as i64)
    }
}

/// Bounds-checked index read.
///
/// Defined conservatively: an in-range integer index into a list yields
/// the element; every other combination yields `null`. Indexing never
/// errors.
pub fn index(target: &Value, index: &Value) -> Value {
    let (items, i) = match (target, index) {
        (Value::List(items), Value::Int(i)) => (items, *i),
        _ => return Value::Null,
    };
    if i < 0 {
        return Value::Null;
    }
    items
        .borrow()
        .get(i as usize)
        .cloned()
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_arithmetic_stays_integer() {
        assert_eq!(binary(BinOp::Add, &Value::Int(1), &Value::Int(2)).to_string(), "3");
        assert_eq!(binary(BinOp::Sub, &Value::Int(1), &Value::Int(2)).to_string(), "-1");
        assert_eq!(binary(BinOp::Mul, &Value::Int(6), &Value::Int(7)).to_string(), "42");
        assert_eq!(binary(BinOp::Mod, &Value::Int(7), &Value::Int(3)).to_string(), "1");
    }

    #[test]
    fn test_float_contaminates_result() {
        let result = binary(BinOp::Add, &Value::Float(1.5), &Value::Int(1));
        assert!(matches!(result, Value::Float(_)));
        assert_eq!(result.to_string(), "2.5");

        let result = binary(BinOp::Mul, &Value::Int(2), &Value::Float(2.0));
        assert_eq!(result.to_string(), "4.0");
    }

    #[test]
    fn test_division_always_float() {
        assert_eq!(binary(BinOp::Div, &Value::Int(5), &Value::Int(2)).to_string(), "2.5");
        assert_eq!(binary(BinOp::Div, &Value::Int(4), &Value::Int(2)).to_string(), "2.0");
    }

    #[test]
    fn test_division_by_zero_is_zero() {
        assert_eq!(binary(BinOp::Div, &Value::Int(5), &Value::Int(0)).to_string(), "0.0");
        assert_eq!(
            binary(BinOp::Div, &Value::Float(5.0), &Value::Float(0.0)).to_string(),
            "0.0"
        );
    }

    #[test]
    fn test_relational_on_numbers() {
        assert!(binary(BinOp::Lt, &Value::Int(1), &Value::Int(2)).is_truthy());
        assert!(!binary(BinOp::Gt, &Value::Int(1), &Value::Int(2)).is_truthy());
        assert!(binary(BinOp::Le, &Value::Int(2), &Value::Float(2.0)).is_truthy());
        assert!(binary(BinOp::Ge, &Value::Float(2.5), &Value::Int(2)).is_truthy());
    }

    #[test]
    fn test_relational_on_non_numbers_is_null() {
        assert!(matches!(
            binary(BinOp::Lt, &Value::str("a"), &Value::str("b")),
            Value::Null
        ));
        assert!(matches!(
            binary(BinOp::Gt, &Value::Null, &Value::Int(1)),
            Value::Null
        ));
    }

    #[test]
    fn test_equality_is_canonical() {
        assert!(binary(BinOp::Eq, &Value::Int(5), &Value::str("5")).is_truthy());
        assert!(binary(BinOp::Eq, &Value::Null, &Value::str("null")).is_truthy());
        // 1 renders as "1", 1.0 renders as "1.0"; they are not equal.
        assert!(!binary(BinOp::Eq, &Value::Int(1), &Value::Float(1.0)).is_truthy());
    }

    #[test]
    fn test_eq_and_ne_are_complementary() {
        let pairs = [
            (Value::Int(1), Value::Int(1)),
            (Value::Int(1), Value::Int(2)),
            (Value::str("a"), Value::str("a")),
            (Value::Int(1), Value::Float(1.0)),
            (Value::Null, Value::Null),
        ];
        for (a, b) in pairs {
            let eq = binary(BinOp::Eq, &a, &b).is_truthy();
            let ne = binary(BinOp::Ne, &a, &b).is_truthy();
            assert_ne!(eq, ne, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_logical_via_truthiness() {
        assert!(binary(BinOp::And, &Value::Int(1), &Value::str("")).is_truthy());
        assert!(!binary(BinOp::And, &Value::Int(0), &Value::Bool(true)).is_truthy());
        assert!(binary(BinOp::Or, &Value::Null, &Value::Int(2)).is_truthy());
        assert!(!binary(BinOp::Or, &Value::Null, &Value::Int(0)).is_truthy());
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(
            binary(BinOp::Add, &Value::str("hi"), &Value::str(" there")).to_string(),
            "hi there"
        );
        assert_eq!(binary(BinOp::Add, &Value::str("a"), &Value::Int(1)).to_string(), "a1");
        assert_eq!(binary(BinOp::Add, &Value::Int(1), &Value::str("a")).to_string(), "1a");
        assert_eq!(
            binary(BinOp::Add, &Value::str("x"), &Value::Float(1.0)).to_string(),
            "x1.0"
        );
    }

    #[test]
    fn test_unsupported_combinations_are_null() {
        assert!(matches!(
            binary(BinOp::Add, &Value::Null, &Value::Int(1)),
            Value::Null
        ));
        assert!(matches!(
            binary(BinOp::Sub, &Value::str("a"), &Value::str("b")),
            Value::Null
        ));
        assert!(matches!(
            binary(BinOp::Add, &Value::Bool(true), &Value::Int(1)),
            Value::Null
        ));
        assert!(matches!(
            binary(BinOp::Mul, &Value::list(vec![]), &Value::Int(2)),
            Value::Null
        ));
    }

    #[test]
    fn test_index_in_range() {
        let list = Value::list(vec![Value::Int(10), Value::Int(20)]);
        assert_eq!(index(&list, &Value::Int(0)).to_string(), "10");
        assert_eq!(index(&list, &Value::Int(1)).to_string(), "20");
    }

    #[test]
    fn test_index_out_of_range_is_null() {
        let list = Value::list(vec![Value::Int(10)]);
        assert!(matches!(index(&list, &Value::Int(5)), Value::Null));
        assert!(matches!(index(&list, &Value::Int(-1)), Value::Null));
    }

    #[test]
    fn test_index_non_list_is_null() {
        assert!(matches!(index(&Value::str("abc"), &Value::Int(0)), Value::Null));
        assert!(matches!(index(&Value::Int(1), &Value::Int(0)), Value::Null));
        let list = Value::list(vec![Value::Int(1)]);
        assert!(matches!(index(&list, &Value::str("0")), Value::Null));
    }
}
