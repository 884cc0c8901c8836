//! The dynamically-typed configuration value tree.
//!
//! [`Value`] is a sum type over the seven HCL value shapes. Containers own
//! their children exclusively: `Clone` deep-clones, [`Value::take`] moves
//! the value out and leaves `Null` behind.
//!
//! Two key namespaces coexist and are easy to conflate:
//!
//! - **Literal child keys** — whatever the parser stored, dots included.
//!   `find_child`, `set_child`, `erase_child` and `value["key"]` operate on
//!   these.
//! - **Dotted paths** — strings like `a.b.c` interpreted as a sequence of
//!   object descents. `find`, `set`, `erase` and `has` operate on these,
//!   tokenising the path with the lexer in path mode. A literal key `"a.b"`
//!   stored by the parser is therefore *not* reachable through
//!   `find("a.b")`, which descends into `a` instead.
//!
//! Typed extraction goes through [`FromValue`], giving `is::<T>()`,
//! `get::<T>(key)` and `as_vec::<T>()` a single conversion surface with
//! uniform type-error diagnostics.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::{Error, Result};
use crate::index::ValueIndex;
use crate::lexer::Lexer;
use crate::token::Token;

/// Ordered list of values.
pub type List = Vec<Value>;

/// Object storage. Hash-backed by default; the `sorted_keys` feature swaps
/// in a sorted map for deterministic serialisation. Both satisfy the same
/// equality contract — key order is never semantically significant.
#[cfg(feature = "sorted_keys")]
pub type Object = std::collections::BTreeMap<String, Value>;

/// Object storage. Hash-backed by default; the `sorted_keys` feature swaps
/// in a sorted map for deterministic serialisation. Both satisfy the same
/// equality contract — key order is never semantically significant.
#[cfg(not(feature = "sorted_keys"))]
pub type Object = std::collections::HashMap<String, Value>;

/// A parsed HCL value.
///
/// `Null` marks an absent or moved-out value and is distinct from every
/// real value, including `Bool(false)`. Numeric comparisons are exact
/// across variants: `Int(1) != Double(1.0)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    List(List),
    Object(Object),
}

/// Conversion from a [`Value`] into a concrete Rust type.
///
/// Drives the generic accessors [`Value::is`], [`Value::get`],
/// [`Value::get_index`] and [`Value::as_vec`]. Implemented for `bool`,
/// `i64`, `f64`, `String`, [`Object`], [`Value`] itself, and `Vec<T>` of
/// any implementor (so [`List`] comes along as `Vec<Value>`).
pub trait FromValue: Sized {
    /// Variant name used in type-error diagnostics.
    const EXPECTED: &'static str;

    /// Whether `value` holds this type.
    fn matches(value: &Value) -> bool;

    /// Extract an owned copy, failing with a typed diagnostic otherwise.
    fn from_value(value: &Value) -> Result<Self>;
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn matches(value: &Value) -> bool {
        matches!(value, Value::Bool(_))
    }

    fn from_value(value: &Value) -> Result<bool> {
        value.as_bool()
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "int";

    fn matches(value: &Value) -> bool {
        matches!(value, Value::Int(_))
    }

    fn from_value(value: &Value) -> Result<i64> {
        value.as_int()
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "double";

    fn matches(value: &Value) -> bool {
        matches!(value, Value::Double(_))
    }

    fn from_value(value: &Value) -> Result<f64> {
        value.as_double()
    }
}

impl FromValue for String {
    const EXPECTED: &'static str = "string";

    fn matches(value: &Value) -> bool {
        matches!(value, Value::String(_))
    }

    fn from_value(value: &Value) -> Result<String> {
        Ok(value.as_str()?.to_string())
    }
}

impl FromValue for Object {
    const EXPECTED: &'static str = "object";

    fn matches(value: &Value) -> bool {
        matches!(value, Value::Object(_))
    }

    fn from_value(value: &Value) -> Result<Object> {
        Ok(value.as_object()?.clone())
    }
}

impl FromValue for Value {
    const EXPECTED: &'static str = "value";

    fn matches(_value: &Value) -> bool {
        true
    }

    fn from_value(value: &Value) -> Result<Value> {
        Ok(value.clone())
    }
}

/// A list converts to `Vec<T>` when it is empty or every element is a `T`.
impl<T: FromValue> FromValue for Vec<T> {
    const EXPECTED: &'static str = "list";

    fn matches(value: &Value) -> bool {
        match value {
            Value::List(items) => items.first().map_or(true, T::matches),
            _ => false,
        }
    }

    fn from_value(value: &Value) -> Result<Vec<T>> {
        value.as_list()?.iter().map(T::from_value).collect()
    }
}

impl Value {
    /// Variant name as used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }

    pub(crate) fn type_error(&self, expected: &'static str) -> Error {
        Error::Type {
            expected,
            actual: self.type_name(),
        }
    }

    /// A value is valid iff it is not `Null`.
    pub fn is_valid(&self) -> bool {
        !matches!(self, Value::Null)
    }

    /// Element count for containers, 0 for `Null`, 1 for scalars.
    pub fn len(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::List(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move the value out, leaving `Null` behind.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Whether this value holds a `T`.
    pub fn is<T: FromValue>(&self) -> bool {
        T::matches(self)
    }

    // ------------------------------------------------------------------
    // Borrowing accessors

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(other.type_error("bool")),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(other.type_error("int")),
        }
    }

    pub fn as_double(&self) -> Result<f64> {
        match self {
            Value::Double(d) => Ok(*d),
            other => Err(other.type_error("double")),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match self {
            Value::String(s) => Ok(s),
            other => Err(other.type_error("string")),
        }
    }

    pub fn as_list(&self) -> Result<&List> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.type_error("list")),
        }
    }

    pub fn as_list_mut(&mut self) -> Result<&mut List> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(other.type_error("list")),
        }
    }

    pub fn as_object(&self) -> Result<&Object> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.type_error("object")),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object> {
        match self {
            Value::Object(map) => Ok(map),
            other => Err(other.type_error("object")),
        }
    }

    /// True for `Int` and `Double`.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Double(_))
    }

    /// Numeric value as a double, from either `Int` or `Double`.
    pub fn as_number(&self) -> Result<f64> {
        match self {
            Value::Int(n) => Ok(*n as f64),
            Value::Double(d) => Ok(*d),
            other => Err(other.type_error("number")),
        }
    }

    // ------------------------------------------------------------------
    // Typed lookups

    /// Dotted-path lookup converted to `T`.
    pub fn get<T: FromValue>(&self, key: &str) -> Result<T> {
        if !matches!(self, Value::Object(_)) {
            return Err(self.type_error("object"));
        }
        match self.find(key) {
            Some(child) => T::from_value(child),
            None => Err(Error::KeyNotFound(key.to_string())),
        }
    }

    /// List element converted to `T`.
    pub fn get_index<T: FromValue>(&self, index: usize) -> Result<T> {
        let items = self.as_list()?;
        match items.get(index) {
            Some(item) => T::from_value(item),
            None => Err(Error::OutOfBounds {
                index,
                len: items.len(),
            }),
        }
    }

    /// List converted element-wise to `Vec<T>`.
    pub fn as_vec<T: FromValue>(&self) -> Result<Vec<T>> {
        Vec::<T>::from_value(self)
    }

    // ------------------------------------------------------------------
    // Dotted-path operations

    /// Tokenise a dotted path into its segments: `Ident`/`Str` tokens
    /// separated by periods, nothing else.
    pub(crate) fn parse_path(key: &str) -> Option<Vec<String>> {
        let mut lexer = Lexer::for_path(key);
        let mut parts = Vec::new();
        loop {
            match lexer.next_token() {
                Token::Ident(part) | Token::Str(part) => parts.push(part),
                _ => return None,
            }
            match lexer.next_token() {
                Token::Period => continue,
                Token::Eof => return Some(parts),
                _ => return None,
            }
        }
    }

    /// Look up a value by dotted path (`&str`) or list position (`usize`).
    ///
    /// Every intermediate path segment must name an object child; the final
    /// segment may hold any variant.
    pub fn find<I: ValueIndex>(&self, index: I) -> Option<&Value> {
        index.find_in(self)
    }

    /// Mutable counterpart of [`Value::find`].
    pub fn find_mut<I: ValueIndex>(&mut self, index: I) -> Option<&mut Value> {
        index.find_in_mut(self)
    }

    /// Whether a dotted path resolves to a value.
    pub fn has(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Install `value` at a dotted path, creating intermediate objects.
    ///
    /// A `Null` receiver becomes an object first. Fails when the receiver
    /// or an existing intermediate is not an object, or when the path does
    /// not tokenise. Returns the slot the value landed in.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<&mut Value> {
        let value = value.into();
        let slot = self.ensure_value(key)?;
        *slot = value;
        Ok(slot)
    }

    /// Walk a dotted path, creating object nodes, and return the final slot
    /// (freshly `Null` if it did not exist).
    fn ensure_value(&mut self, key: &str) -> Result<&mut Value> {
        if !self.is_valid() {
            *self = Value::Object(Object::new());
        }
        if !matches!(self, Value::Object(_)) {
            return Err(self.type_error("object"));
        }

        let parts =
            Value::parse_path(key).ok_or_else(|| Error::InvalidKey(key.to_string()))?;
        let Some((last, walk)) = parts.split_last() else {
            return Err(Error::InvalidKey(key.to_string()));
        };

        let mut current = self;
        for part in walk {
            let map = current.as_object_mut()?;
            let child = map
                .entry(part.clone())
                .or_insert_with(|| Value::Object(Object::new()));
            if !matches!(child, Value::Object(_)) {
                return Err(child.type_error("object"));
            }
            current = child;
        }

        let map = current.as_object_mut()?;
        Ok(map.entry(last.clone()).or_insert(Value::Null))
    }

    /// Remove the value at a dotted path. True iff the path existed.
    pub fn erase(&mut self, key: &str) -> bool {
        if !matches!(self, Value::Object(_)) {
            return false;
        }
        let Some(parts) = Value::parse_path(key) else {
            return false;
        };
        let Some((last, walk)) = parts.split_last() else {
            return false;
        };

        let mut current = self;
        for part in walk {
            let Some(child) = current.find_child_mut(part) else {
                return false;
            };
            if !matches!(child, Value::Object(_)) {
                return false;
            }
            current = child;
        }

        current.erase_child(last)
    }

    // ------------------------------------------------------------------
    // Literal child operations (no dotted-path interpretation)

    /// Immediate child by literal key.
    pub fn find_child(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Mutable immediate child by literal key.
    pub fn find_child_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Object(map) => map.get_mut(key),
            _ => None,
        }
    }

    /// Insert or overwrite an immediate child. A `Null` receiver becomes an
    /// object first; any other non-object receiver is a type error.
    pub fn set_child(&mut self, key: &str, value: impl Into<Value>) -> Result<&mut Value> {
        let value = value.into();
        if !self.is_valid() {
            *self = Value::Object(Object::new());
        }
        let map = self.as_object_mut()?;
        let slot = map.entry(key.to_string()).or_insert(Value::Null);
        *slot = value;
        Ok(slot)
    }

    /// Remove an immediate child. True iff the key was present.
    pub fn erase_child(&mut self, key: &str) -> bool {
        match self {
            Value::Object(map) => map.remove(key).is_some(),
            _ => false,
        }
    }

    // ------------------------------------------------------------------
    // List operations

    /// Append to a list. A `Null` receiver becomes a list first; any other
    /// non-list receiver is a type error. Returns the new slot.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<&mut Value> {
        let value = value.into();
        if !self.is_valid() {
            *self = Value::List(List::new());
        }
        let items = self.as_list_mut()?;
        let index = items.len();
        items.push(value);
        Ok(&mut items[index])
    }

    // ------------------------------------------------------------------
    // Merging

    /// Deep-merge `other` into `self`.
    ///
    /// Keys absent here are copied from `other`; keys where both sides are
    /// objects merge recursively; otherwise `other`'s value overwrites.
    /// Returns false iff either side is not an object at the top.
    pub fn merge(&mut self, other: &Value) -> bool {
        let Value::Object(src) = other else {
            return false;
        };
        let Value::Object(dst) = self else {
            return false;
        };

        for (key, incoming) in src {
            let absent = match dst.get_mut(key) {
                Some(existing) => {
                    if matches!(existing, Value::Object(_)) && matches!(incoming, Value::Object(_))
                    {
                        if !existing.merge(incoming) {
                            return false;
                        }
                    } else {
                        *existing = incoming.clone();
                    }
                    false
                }
                None => true,
            };
            if absent {
                dst.insert(key.clone(), incoming.clone());
            }
        }

        true
    }

    /// Install a parsed statement under its key sequence (the block-fold).
    ///
    /// With keys `[k1, k2, …, kn]` the value is first wrapped so it becomes
    /// `{k2: {… {kn: value} …}}`, then installed at `k1`:
    ///
    /// - absent: plain set
    /// - existing list: append
    /// - anything else: replace with the two-element list `[existing, new]`
    ///
    /// All key handling is literal — dots inside keys are not paths.
    pub fn merge_objects(&mut self, keys: &[String], value: Value) -> bool {
        let Some((first, rest)) = keys.split_first() else {
            return false;
        };
        if !self.is_valid() {
            *self = Value::Object(Object::new());
        }
        let Value::Object(map) = self else {
            return false;
        };

        let mut inner = value;
        for key in rest.iter().rev() {
            let mut wrapper = Object::new();
            wrapper.insert(key.clone(), inner);
            inner = Value::Object(wrapper);
        }

        match map.remove(first) {
            Some(Value::List(mut items)) => {
                items.push(inner);
                map.insert(first.clone(), Value::List(items));
            }
            Some(existing) => {
                map.insert(first.clone(), Value::List(vec![existing, inner]));
            }
            None => {
                map.insert(first.clone(), inner);
            }
        }

        true
    }

    /// True iff both values are objects sharing at least one top-level key.
    /// Nested keys are not considered.
    pub fn shares_key_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => a.keys().any(|key| b.contains_key(key)),
            _ => false,
        }
    }
}

// ----------------------------------------------------------------------
// Conversions from primitives

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Value {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Value {
        Value::Int(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Value {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::String(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Value {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Value {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

// ----------------------------------------------------------------------
// serde support

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut ser = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    ser.serialize_entry(key, value)?;
                }
                ser.end()
            }
        }
    }
}
