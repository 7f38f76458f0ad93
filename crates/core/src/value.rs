//! Resolved values produced by evaluation.

use indexmap::IndexMap;
use serde::Serialize;

/// A fully resolved hexconf value.
///
/// `Null` is the sentinel left in place of anything that failed to resolve;
/// it only appears when evaluation also recorded a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Array(Vec<Value>),
    Dict(Dict),
    Null,
}

impl Value {
    /// Short kind name used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Array(_) => "array",
            Value::Dict(_) => "dict",
            Value::Null => "null",
        }
    }
}

/// Insertion-ordered string-keyed map.
///
/// Re-inserting an existing key replaces its value but keeps the key where
/// it was first inserted. Equality compares entries in order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Dict(IndexMap<String, Value>);

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns the replaced value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.0.iter().eq(other.0.iter())
    }
}

impl Eq for Dict {}

impl<K: Into<String>> FromIterator<(K, Value)> for Dict {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut dict = Dict::new();
        for (k, v) in iter {
            dict.insert(k, v);
        }
        dict
    }
}
