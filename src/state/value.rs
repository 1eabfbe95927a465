//! The immutable state tree.
//!
//! `Value` is a dynamically shaped tree with `Arc`-backed containers.
//! Cloning is O(1): a clone shares every container with the original.
//! State transitions never mutate a `Value` in place; they build a new
//! root that shares all untouched subtrees with the previous one.
//!
//! Change detection throughout the engine uses [`Value::same`], which
//! compares containers by pointer, never by content. Two states differ
//! at a sub-path iff the containers there are different allocations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A node in the immutable state tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    Seq(Arc<Vec<Value>>),
    Map(Arc<BTreeMap<String, Value>>),
}

impl Value {
    /// Build a sequence from anything yielding values.
    pub fn seq(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Seq(Arc::new(items.into_iter().collect()))
    }

    /// Build a mapping from key/value pairs.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(Arc::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// An empty sequence.
    pub fn empty_seq() -> Self {
        Value::Seq(Arc::new(Vec::new()))
    }

    /// An empty mapping.
    pub fn empty_map() -> Self {
        Value::Map(Arc::new(BTreeMap::new()))
    }

    /// The change-detection relation: pointer equality for containers,
    /// value equality for leaves (with a pointer fast path for strings).
    ///
    /// This is deliberately *not* deep equality. A freshly built container
    /// is never `same` as another container, even with identical contents.
    pub fn same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => Arc::ptr_eq(a, b) || a == b,
            (Value::Seq(a), Value::Seq(b)) => Arc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&Arc<Vec<Value>>> {
        match self {
            Value::Seq(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Arc<BTreeMap<String, Value>>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Child of a mapping by key; `None` for anything else.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(m) => m.get(key),
            _ => None,
        }
    }

    /// Element of a sequence by index; `None` for anything else.
    pub fn idx(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Seq(s) => s.get(index),
            _ => None,
        }
    }

    /// Short kind name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Arc::from(s.as_str()))
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Seq(Arc::new(v))
    }
}
