//! Unified lookup by dotted path or list position.
//!
//! [`ValueIndex`] lets [`Value::find`] and [`Value::find_mut`] accept
//! either a `&str` dotted path or a `usize` list index. The
//! `std::ops::Index`/`IndexMut` impls follow the ecosystem convention for
//! dynamically-typed value trees: reads of a missing object child yield a
//! shared `Null`, square-bracket writes auto-create object children
//! (upgrading `Null` receivers), and indexing an incompatible variant or a
//! missing list slot panics — those are programmer errors, not data
//! errors.
//!
//! Note the asymmetry, inherited from the value model: `value.find("a.b")`
//! interprets the string as a dotted path, while `value["a.b"]` is a
//! literal child lookup.

use std::ops;

use crate::value::{Object, Value};

/// Shared target for reads that miss.
static NULL: Value = Value::Null;

mod private {
    pub trait Sealed {}

    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T: Sealed + ?Sized> Sealed for &T {}
}

/// A type that can address into a [`Value`]: a `usize` list position or a
/// `&str` dotted path. Sealed; not implementable outside this crate.
pub trait ValueIndex: private::Sealed {
    #[doc(hidden)]
    fn find_in<'v>(&self, value: &'v Value) -> Option<&'v Value>;

    #[doc(hidden)]
    fn find_in_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value>;
}

impl ValueIndex for usize {
    fn find_in<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        match value {
            Value::List(items) => items.get(*self),
            _ => None,
        }
    }

    fn find_in_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        match value {
            Value::List(items) => items.get_mut(*self),
            _ => None,
        }
    }
}

impl ValueIndex for str {
    fn find_in<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        if !matches!(value, Value::Object(_)) {
            return None;
        }
        let parts = Value::parse_path(self)?;
        let (last, walk) = parts.split_last()?;

        let mut current = value;
        for part in walk {
            current = current.find_child(part)?;
            if !matches!(current, Value::Object(_)) {
                return None;
            }
        }
        current.find_child(last)
    }

    fn find_in_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        if !matches!(value, Value::Object(_)) {
            return None;
        }
        let parts = Value::parse_path(self)?;
        let (last, walk) = parts.split_last()?;

        let mut current = value;
        for part in walk {
            current = current.find_child_mut(part)?;
            if !matches!(current, Value::Object(_)) {
                return None;
            }
        }
        current.find_child_mut(last)
    }
}

impl ValueIndex for String {
    fn find_in<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        self.as_str().find_in(value)
    }

    fn find_in_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        self.as_str().find_in_mut(value)
    }
}

impl<T: ValueIndex + ?Sized> ValueIndex for &T {
    fn find_in<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        (**self).find_in(value)
    }

    fn find_in_mut<'v>(&self, value: &'v mut Value) -> Option<&'v mut Value> {
        (**self).find_in_mut(value)
    }
}

impl ops::Index<&str> for Value {
    type Output = Value;

    /// Literal child lookup. Missing children (and a `Null` receiver) read
    /// as `Null`; a non-object receiver panics.
    fn index(&self, key: &str) -> &Value {
        match self {
            Value::Null => &NULL,
            Value::Object(map) => map.get(key).unwrap_or(&NULL),
            other => panic!("cannot index {} with a string key", other.type_name()),
        }
    }
}

impl ops::IndexMut<&str> for Value {
    /// Literal child access, creating the child (and upgrading a `Null`
    /// receiver to an object) as needed. Panics on any other variant.
    fn index_mut(&mut self, key: &str) -> &mut Value {
        if !self.is_valid() {
            *self = Value::Object(Object::new());
        }
        match self {
            Value::Object(map) => map.entry(key.to_string()).or_insert(Value::Null),
            other => panic!("cannot index {} with a string key", other.type_name()),
        }
    }
}

impl ops::Index<usize> for Value {
    type Output = Value;

    /// List element access. Panics on a non-list or out-of-bounds index.
    fn index(&self, index: usize) -> &Value {
        match self {
            Value::List(items) => &items[index],
            other => panic!("cannot index {} with a list position", other.type_name()),
        }
    }
}

impl ops::IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        match self {
            Value::List(items) => &mut items[index],
            other => panic!("cannot index {} with a list position", other.type_name()),
        }
    }
}
