//! Builtin functions.
//!
//! Builtins are dispatched by name before user functions, so a user
//! definition cannot shadow them. The unary conversions are lenient about
//! arity - a missing argument coerces from `null` - while `append`
//! enforces its contract and is the only builtin that can fail.

use rill_util::symbol::{ID_APPEND, ID_FLOAT, ID_INT, ID_LEN, ID_STRING, ID_TYPEOF};
use rill_util::Symbol;

use crate::error::RuntimeError;
use crate::value::Value;

/// Dispatches a builtin call by name.
///
/// Returns `None` when `name` is not a builtin, so the caller can fall
/// through to user-defined functions.
pub fn call_builtin(
    name: Symbol,
    args: &[Value],
    line: u32,
) -> Option<Result<Value, RuntimeError>> {
    let result = if name == ID_INT {
        Ok(Value::Int(first(args).to_int()))
    } else if name == ID_FLOAT {
        Ok(Value::Float(first(args).to_float()))
    } else if name == ID_STRING {
        Ok(Value::str(first(args).to_string()))
    } else if name == ID_TYPEOF {
        Ok(Value::str(first(args).type_name()))
    } else if name == ID_LEN {
        Ok(Value::Int(len_of(&first(args))))
    } else if name == ID_APPEND {
        append(args, line)
    } else {
        return None;
    };
    Some(result)
}

/// The first argument, or `null` when the call site passed none.
fn first(args: &[Value]) -> Value {
    args.first().cloned().unwrap_or(Value::Null)
}

/// Length of a value: character count for strings, element count for
/// lists, 0 for everything else.
fn len_of(value: &Value) -> i64 {
    match value {
        Value::Str(s) => s.chars().count() as i64,
        Value::List(items) => items.borrow().len() as i64,
        _ => 0,
    }
}

/// `append(lst, v)`: push a deep copy of `v` onto `lst`, returning `null`.
///
/// The deep copy keeps the appended value independent - mutating `v`
/// afterwards does not change the list, and vice versa. Extra arguments
/// beyond the second are ignored.
fn append(args: &[Value], line: u32) -> Result<Value, RuntimeError> {
    if args.len() < 2 {
        return Err(RuntimeError::AppendArity { line });
    }
    match &args[0] {
        Value::List(items) => {
            let copy = args[1].deep_clone();
            items.borrow_mut().push(copy);
            Ok(Value::Null)
        },
        _ => Err(RuntimeError::AppendTarget { line }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Value]) -> Result<Value, RuntimeError> {
        call_builtin(Symbol::intern(name), args, 1).expect("must be a builtin")
    }

    #[test]
    fn test_unknown_name_is_not_a_builtin() {
        assert!(call_builtin(Symbol::intern("frobnicate"), &[], 1).is_none());
    }

    #[test]
    fn test_int_builtin() {
        assert_eq!(call("int", &[Value::Float(2.9)]).unwrap().to_string(), "2");
        assert_eq!(call("int", &[Value::str("41")]).unwrap().to_string(), "41");
        assert_eq!(call("int", &[Value::str("bad")]).unwrap().to_string(), "0");
        // Missing argument coerces from null.
        assert_eq!(call("int", &[]).unwrap().to_string(), "0");
    }

    #[test]
    fn test_float_builtin() {
        assert_eq!(call("float", &[Value::Int(2)]).unwrap().to_string(), "2.0");
        assert_eq!(call("float", &[Value::Bool(true)]).unwrap().to_string(), "1.0");
    }

    #[test]
    fn test_string_builtin() {
        assert_eq!(call("string", &[Value::Int(42)]).unwrap().to_string(), "42");
        assert_eq!(call("string", &[Value::Null]).unwrap().to_string(), "null");
        let list = Value::list(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(call("string", &[list]).unwrap().to_string(), "[1, 2]");
    }

    #[test]
    fn test_typeof_builtin() {
        assert_eq!(call("typeof", &[Value::Int(1)]).unwrap().to_string(), "int");
        assert_eq!(call("typeof", &[Value::Float(1.0)]).unwrap().to_string(), "float");
        assert_eq!(call("typeof", &[Value::str("")]).unwrap().to_string(), "string");
        assert_eq!(call("typeof", &[Value::Bool(false)]).unwrap().to_string(), "bool");
        assert_eq!(call("typeof", &[Value::list(vec![])]).unwrap().to_string(), "list");
        assert_eq!(call("typeof", &[Value::Null]).unwrap().to_string(), "null");
    }

    #[test]
    fn test_len_builtin() {
        assert_eq!(call("len", &[Value::str("hello")]).unwrap().to_string(), "5");
        assert_eq!(call("len", &[Value::str("")]).unwrap().to_string(), "0");
        let list = Value::list(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(call("len", &[list]).unwrap().to_string(), "2");
        assert_eq!(call("len", &[Value::list(vec![])]).unwrap().to_string(), "0");
        assert_eq!(call("len", &[Value::Int(99)]).unwrap().to_string(), "0");
    }

    #[test]
    fn test_append_mutates_through_alias() {
        let list = Value::list(vec![]);
        let alias = list.clone();
        call("append", &[list, Value::Int(1)]).unwrap();
        assert_eq!(alias.to_string(), "[1]");
    }

    #[test]
    fn test_append_returns_null() {
        let list = Value::list(vec![]);
        let result = call("append", &[list, Value::Int(1)]).unwrap();
        assert!(matches!(result, Value::Null));
    }

    #[test]
    fn test_append_stores_deep_copy() {
        let list = Value::list(vec![]);
        let item = Value::list(vec![Value::Int(1)]);
        call("append", &[list.clone(), item.clone()]).unwrap();

        // Mutating the original item afterwards must not affect the list.
        if let Value::List(items) = &item {
            items.borrow_mut().push(Value::Int(2));
        }
        assert_eq!(list.to_string(), "[[1]]");
        assert_eq!(item.to_string(), "[1, 2]");
    }

    #[test]
    fn test_append_arity_error() {
        let list = Value::list(vec![]);
        let err = call("append", &[list]).unwrap_err();
        assert!(matches!(err, RuntimeError::AppendArity { .. }));
        let err = call("append", &[]).unwrap_err();
        assert!(matches!(err, RuntimeError::AppendArity { .. }));
    }

    #[test]
    fn test_append_target_error() {
        let err = call("append", &[Value::Int(1), Value::Int(2)]).unwrap_err();
        assert!(matches!(err, RuntimeError::AppendTarget { .. }));
    }
}
