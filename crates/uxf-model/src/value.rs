//! `Value` and `Key` - the tagged unions at the heart of the data model
//! (§3 "Value", "Key").

use crate::datetime::{UxfDate, UxfDateTime};
use crate::list::UxfList;
use crate::map::UxfMap;
use crate::table::UxfTable;

/// Any value a list item, map value, or table cell can hold (§3 "Value").
///
/// Collections are boxed: `Value` would otherwise be infinitely sized, and
/// boxing also matches the ownership story in the design notes (§9
/// "Value as a sum type... collection arms hold owning handles").
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Date(UxfDate),
    DateTime(UxfDateTime),
    Str(String),
    Bytes(Vec<u8>),
    List(Box<UxfList>),
    Map(Box<UxfMap>),
    Table(Box<UxfTable>),
}

impl Value {
    /// The built-in type name this value's kind corresponds to, or `None`
    /// for `Null` (which has no vtype of its own and is assignable to any
    /// typed slot, Invariant I6).
    pub fn builtin_type_name(&self) -> Option<&'static str> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Real(_) => "real",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Table(_) => "table",
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_table(&self) -> Option<&UxfTable> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&UxfList> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&UxfMap> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(r) => Some(*r),
            _ => None,
        }
    }
}

impl From<UxfList> for Value {
    fn from(l: UxfList) -> Self {
        Value::List(Box::new(l))
    }
}

impl From<UxfMap> for Value {
    fn from(m: UxfMap) -> Self {
        Value::Map(Box::new(m))
    }
}

impl From<UxfTable> for Value {
    fn from(t: UxfTable) -> Self {
        Value::Table(Box::new(t))
    }
}

/// The subset of [`Value`] that may appear as a map key (§3 "Key"):
/// `{Int, Date, DateTime, Str, Bytes}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Date(UxfDate),
    DateTime(UxfDateTime),
    Str(String),
    Bytes(Vec<u8>),
}

impl Key {
    pub fn builtin_type_name(&self) -> &'static str {
        match self {
            Key::Int(_) => "int",
            Key::Date(_) => "date",
            Key::DateTime(_) => "datetime",
            Key::Str(_) => "str",
            Key::Bytes(_) => "bytes",
        }
    }

    /// Widen a key into the corresponding scalar `Value`, for contexts
    /// (e.g. the writer, or API callers iterating a `Map`) that want a
    /// single `Value` type to work with.
    pub fn into_value(self) -> Value {
        match self {
            Key::Int(i) => Value::Int(i),
            Key::Date(d) => Value::Date(d),
            Key::DateTime(dt) => Value::DateTime(dt),
            Key::Str(s) => Value::Str(s),
            Key::Bytes(b) => Value::Bytes(b),
        }
    }

    /// Narrow a scalar `Value` into a `Key`, if its kind is key-eligible.
    pub fn from_value(value: &Value) -> Option<Key> {
        Some(match value {
            Value::Int(i) => Key::Int(*i),
            Value::Date(d) => Key::Date(*d),
            Value::DateTime(dt) => Key::DateTime(*dt),
            Value::Str(s) => Key::Str(s.clone()),
            Value::Bytes(b) => Key::Bytes(b.clone()),
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_has_no_builtin_type_name() {
        assert_eq!(Value::Null.builtin_type_name(), None);
    }

    #[test]
    fn scalar_values_report_their_type_name() {
        assert_eq!(Value::Int(1).builtin_type_name(), Some("int"));
        assert_eq!(Value::Str("x".into()).builtin_type_name(), Some("str"));
    }

    #[test]
    fn key_round_trips_through_value() {
        let key = Key::Int(42);
        let value = key.clone().into_value();
        assert_eq!(Key::from_value(&value), Some(key));
    }

    #[test]
    fn non_key_value_does_not_narrow() {
        assert_eq!(Key::from_value(&Value::Bool(true)), None);
        assert_eq!(Key::from_value(&Value::Null), None);
    }
}
