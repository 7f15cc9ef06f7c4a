//! Shared handle to a store referenced from context frames.

use super::KvStore;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::sync::Arc;

/// Reference-counted handle to a store.
///
/// Clones point at the same store: a write through one handle is visible
/// through every other, including handles held by older context frames.
#[derive(Clone)]
pub struct StoreRef {
    inner: Arc<RwLock<dyn KvStore>>,
}

impl StoreRef {
    pub fn new<S>(store: S) -> Self
    where
        S: KvStore + 'static,
    {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Value for `key`, or the empty string when absent.
    pub fn get(&self, key: &str) -> String {
        self.inner.read().get(key)
    }

    /// Value for `key`, or `None` when absent.
    pub fn get_opt(&self, key: &str) -> Option<String> {
        self.inner.read().get_opt(key)
    }

    pub fn set(&self, key: &str, value: &str) {
        self.inner.write().set(key, value);
    }

    pub fn list_keys(&self) -> Vec<String> {
        self.inner.read().list_keys()
    }

    pub fn entries(&self) -> Vec<(String, String)> {
        self.inner.read().entries()
    }

    /// Lock the store for several reads at once.
    ///
    /// The lock is not reentrant: while the guard is alive, a write to the
    /// same store from this thread (through any handle, or through
    /// [`Manager::set`](crate::Manager::set) on the same lineage) deadlocks.
    pub fn read(&self) -> RwLockReadGuard<'_, dyn KvStore> {
        self.inner.read()
    }

    /// Lock the store for several writes at once.
    ///
    /// The lock is not reentrant: while the guard is alive, any other access
    /// to the same store from this thread deadlocks.
    pub fn write(&self) -> RwLockWriteGuard<'_, dyn KvStore> {
        self.inner.write()
    }

    /// Whether both handles point at the same store.
    pub fn ptr_eq(&self, other: &StoreRef) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for StoreRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let store = self.inner.read();
        f.debug_map()
            .entries(store.entries().into_iter())
            .finish()
    }
}
