//! Single-pair store.

use super::{KvGetter, KvSetter};

/// A store holding at most one key/value pair.
///
/// Setting any key replaces the held pair entirely. The empty string is a
/// valid key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pair: Option<(String, String)>,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            pair: Some((key.into(), value.into())),
        }
    }

    /// The held key and value, if any were set.
    pub fn pair(&self) -> Option<(&str, &str)> {
        self.pair.as_ref().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl KvGetter for Field {
    fn get(&self, key: &str) -> String {
        self.get_opt(key).unwrap_or_default()
    }

    fn list_keys(&self) -> Vec<String> {
        self.pair.iter().map(|(k, _)| k.clone()).collect()
    }

    fn get_opt(&self, key: &str) -> Option<String> {
        match &self.pair {
            Some((k, v)) if k == key => Some(v.clone()),
            _ => None,
        }
    }
}

impl KvSetter for Field {
    fn set(&mut self, key: &str, value: &str) {
        self.pair = Some((key.to_string(), value.to_string()));
    }
}
