//! Key-value stores holding context fields.
//!
//! A store maps string keys to string values. Two implementations ship with
//! the crate:
//! - [`MapStore`]: the default, any number of fields
//! - [`Field`]: exactly one key/value pair
//!
//! Anything implementing [`KvStore`] can be plugged into a
//! [`Manager`](crate::Manager) through [`ManagerConfig`](crate::ManagerConfig).

mod field;
mod map;
mod shared;

pub use field::Field;
pub use map::MapStore;
pub use shared::StoreRef;

/// Read access to a store.
pub trait KvGetter {
    /// Value for `key`, or the empty string when absent.
    fn get(&self, key: &str) -> String;

    /// All keys currently set, in no particular order.
    fn list_keys(&self) -> Vec<String>;

    /// Value for `key`, distinguishing an absent key from an empty value.
    fn get_opt(&self, key: &str) -> Option<String> {
        if self.list_keys().iter().any(|k| k == key) {
            Some(self.get(key))
        } else {
            None
        }
    }

    /// Key/value pairs in `list_keys` order.
    fn entries(&self) -> Vec<(String, String)> {
        self.list_keys()
            .into_iter()
            .map(|key| {
                let value = self.get(&key);
                (key, value)
            })
            .collect()
    }
}

/// Write access to a store.
pub trait KvSetter {
    /// Insert `value` under `key`, overwriting any previous value.
    fn set(&mut self, key: &str, value: &str);
}

/// A store usable by a [`Manager`](crate::Manager).
pub trait KvStore: KvGetter + KvSetter + Send + Sync {}

impl<T> KvStore for T where T: KvGetter + KvSetter + Send + Sync {}
