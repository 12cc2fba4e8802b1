//! Input normalization - tagged union over list and map shaped iterables
//!
//! Entry points accept anything convertible into [`Input`]. Normalization
//! flattens both shapes into one ordered task list consumed uniformly by the
//! executor; map keys are discarded at this boundary.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use tracing::debug;

use crate::error::InputError;

/// An iterable accepted by the entry points, before normalization.
///
/// Lists keep their element order. Maps are flattened into a positional
/// sequence in their iteration order: `BTreeMap` and JSON objects enumerate
/// in ascending key order, `HashMap` in its own unspecified order (the order
/// is not part of the contract, only the positional stability of results).
#[derive(Debug, Clone)]
pub enum Input<V> {
    /// Ordered sequence of values
    List(Vec<V>),

    /// Key/value entries; keys are dropped during normalization
    Map(Vec<(String, V)>),
}

impl<V> Input<V> {
    /// Number of tasks this input will normalize into
    pub fn len(&self) -> usize {
        match self {
            Self::List(values) => values.len(),
            Self::Map(entries) => entries.len(),
        }
    }

    /// True when normalization would yield an empty task list
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into the ordered task value sequence
    pub(crate) fn into_values(self) -> Vec<V> {
        match self {
            Self::List(values) => values,
            Self::Map(entries) => {
                debug!(entries = entries.len(), "Input::into_values: flattening map input");
                entries.into_iter().map(|(_, value)| value).collect()
            }
        }
    }
}

impl<V> From<Vec<V>> for Input<V> {
    fn from(values: Vec<V>) -> Self {
        Self::List(values)
    }
}

impl<V, const N: usize> From<[V; N]> for Input<V> {
    fn from(values: [V; N]) -> Self {
        Self::List(values.into())
    }
}

impl<V> FromIterator<V> for Input<V> {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}

impl<V> From<BTreeMap<String, V>> for Input<V> {
    fn from(map: BTreeMap<String, V>) -> Self {
        Self::Map(map.into_iter().collect())
    }
}

impl<V> From<HashMap<String, V>> for Input<V> {
    fn from(map: HashMap<String, V>) -> Self {
        Self::Map(map.into_iter().collect())
    }
}

/// JSON arrays and objects are iterables; every other shape is rejected with
/// the name of what was actually passed.
impl TryFrom<Value> for Input<Value> {
    type Error = InputError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(values) => Ok(Self::List(values)),
            Value::Object(map) => Ok(Self::Map(map.into_iter().collect())),
            Value::Null => Err(InputError { got: "null" }),
            Value::Bool(_) => Err(InputError { got: "boolean" }),
            Value::Number(_) => Err(InputError { got: "number" }),
            Value::String(_) => Err(InputError { got: "string" }),
        }
    }
}
