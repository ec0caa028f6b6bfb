//! Flat, string keyed parameter tables.
//!
//! Keys follow the `"<process> <field>"` / `"m_<label>"` convention. Consumers
//! only ever read from a table; lookups of absent keys surface as
//! [`LbxError::Parameter`] through [`ParameterSource::require`].

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, LbxError};

/// Read-only access to real valued parameters by name.
pub trait ParameterSource {
    /// Returns the value stored under `key`, if any.
    fn value(&self, key: &str) -> Option<f64>;

    /// Returns the value stored under `key` or a missing-parameter error.
    fn require(&self, key: &str) -> Result<f64, LbxError> {
        self.value(key)
            .ok_or_else(|| LbxError::missing_parameter(key))
    }
}

impl<S: ParameterSource + ?Sized> ParameterSource for &S {
    fn value(&self, key: &str) -> Option<f64> {
        (**self).value(key)
    }
}

impl ParameterSource for BTreeMap<String, f64> {
    fn value(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

impl<S: std::hash::BuildHasher> ParameterSource for HashMap<String, f64, S> {
    fn value(&self, key: &str) -> Option<f64> {
        self.get(key).copied()
    }
}

/// Owned parameter table with deterministic (sorted) key order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterTable {
    values: BTreeMap<String, f64>,
}

impl ParameterTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(key.into(), value)
    }

    /// Removes a key, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<f64> {
        self.values.remove(key)
    }

    /// Returns `true` when the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of stored parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when the table holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(key, value)| (key.as_str(), *value))
    }

    /// Returns a new table holding only the listed keys that are present.
    pub fn subset<'a>(&self, keys: impl IntoIterator<Item = &'a str>) -> ParameterTable {
        keys.into_iter()
            .filter_map(|key| self.values.get(key).map(|value| (key.to_owned(), *value)))
            .collect()
    }

    /// Borrows the underlying map.
    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.values
    }

    /// Decodes a table from a JSON object of `key: number` pairs.
    pub fn from_json_slice(data: &[u8]) -> Result<Self, LbxError> {
        serde_json::from_slice(data).map_err(|err| {
            LbxError::Serde(
                ErrorInfo::new("json-read", err.to_string())
                    .with_hint("parameter tables are flat objects of numbers"),
            )
        })
    }

    /// Decodes a table from a YAML mapping of `key: number` pairs.
    pub fn from_yaml_str(data: &str) -> Result<Self, LbxError> {
        serde_yaml::from_str(data).map_err(|err| {
            LbxError::Serde(
                ErrorInfo::new("yaml-read", err.to_string())
                    .with_hint("parameter tables are flat mappings of numbers"),
            )
        })
    }

    /// Encodes the table as a YAML mapping.
    pub fn to_yaml_string(&self) -> Result<String, LbxError> {
        serde_yaml::to_string(self)
            .map_err(|err| LbxError::Serde(ErrorInfo::new("yaml-write", err.to_string())))
    }
}

impl ParameterSource for ParameterTable {
    fn value(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ParameterTable {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        }
    }
}

impl From<BTreeMap<String, f64>> for ParameterTable {
    fn from(values: BTreeMap<String, f64>) -> Self {
        Self { values }
    }
}
