//! Hash map backed store.

use super::{KvGetter, KvSetter};
use std::collections::HashMap;

/// The default store: an unordered map of unique keys.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MapStore {
    fields: HashMap<String, String>,
}

impl MapStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given fields.
    pub fn from_map(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_map(self) -> HashMap<String, String> {
        self.fields
    }
}

impl KvGetter for MapStore {
    fn get(&self, key: &str) -> String {
        self.fields.get(key).cloned().unwrap_or_default()
    }

    fn list_keys(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }

    fn get_opt(&self, key: &str) -> Option<String> {
        self.fields.get(key).cloned()
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl KvSetter for MapStore {
    fn set(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }
}

impl<K, V> FromIterator<(K, V)> for MapStore
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, String>> for MapStore {
    fn from(fields: HashMap<String, String>) -> Self {
        Self::from_map(fields)
    }
}
