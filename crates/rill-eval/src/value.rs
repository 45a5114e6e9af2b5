//! The Rill runtime value.
//!
//! A [`Value`] is a tagged sum over the six dynamic types: integer, float,
//! string, bool, list, and null. Lists are the only mutable variant; they
//! are reference-counted so every alias observes mutation through
//! `append`. Strings are immutable shared slices.
//!
//! The `Display` impl is the canonical string form, which the language
//! uses for printing, string concatenation, `==`/`!=`, and switch-case
//! matching. Floats always render with a decimal point (`1.0`, not `1`),
//! which is what keeps an integer discriminant from matching a float case.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A Rill runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    /// Signed integer
    Int(i64),
    /// IEEE-754 double
    Float(f64),
    /// Immutable string
    Str(Rc<str>),
    /// Boolean
    Bool(bool),
    /// Mutable growable list; aliases share the backing store
    List(Rc<RefCell<Vec<Value>>>),
    /// The absent value
    Null,
}

impl Value {
    /// Builds a string value.
    pub fn str(s: impl AsRef<str>) -> Value {
        Value::Str(Rc::from(s.as_ref()))
    }

    /// Builds a list value with a fresh backing store.
    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// The type tag name, as reported by `typeof`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
            Value::Null => "null",
        }
    }

    /// The truthiness of this value.
    ///
    /// Bools are themselves, integers are true iff non-zero, null is
    /// false. Everything else is true, including the empty string and the
    /// empty list.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Null => false,
            _ => true,
        }
    }

    /// Returns true for `Int` and `Float` values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Coerces to an integer.
    ///
    /// Floats truncate toward zero, bools map to 0/1, strings parse as a
    /// double then truncate (0 on parse failure), everything else is 0.
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            Value::Float(f) => *f as i64,
            Value::Bool(b) => *b as i64,
            Value::Str(s) => s.trim().parse::<f64>().map(|f| f as i64).unwrap_or(0),
            _ => 0,
        }
    }

    /// Coerces to a float.
    ///
    /// Integers widen, bools map to 0.0/1.0, strings parse as a double
    /// (0.0 on parse failure), everything else is 0.0.
    pub fn to_float(&self) -> f64 {
        match self {
            Value::Int(n) => *n as f64,
            Value::Float(f) => *f,
            Value::Bool(b) => *b as i64 as f64,
            Value::Str(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Structural copy.
    ///
    /// Lists get a fresh backing store with deep-cloned elements; every
    /// other variant is already immutable and clones cheaply. This is what
    /// `append` stores, so the appended value cannot be mutated through
    /// the list afterwards.
    pub fn deep_clone(&self) -> Value {
        match self {
            Value::List(items) => {
                let copied = items.borrow().iter().map(Value::deep_clone).collect();
                Value::list(copied)
            },
            other => other.clone(),
        }
    }
}

impl fmt::Display for Value {
    /// The canonical string form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", format_float(*x)),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            },
            Value::Null => write!(f, "null"),
        }
    }
}

/// Formats a float in canonical form: whole-valued floats keep a trailing
/// `.0` so they stay distinguishable from integers.
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
