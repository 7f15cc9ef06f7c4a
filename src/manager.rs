//! Manager reading and writing a store through a context slot.

use crate::context::Context;
use crate::error::Result;
use crate::store::{KvStore, MapStore, StoreRef};
use crate::types::SlotKey;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

type StoreFactory = Arc<dyn Fn() -> StoreRef + Send + Sync>;

/// Manager configuration.
#[derive(Clone)]
pub struct ManagerConfig {
    /// Builds the store for a lineage that has none yet.
    store: StoreFactory,
    store_type: &'static str,
}

impl ManagerConfig {
    /// Use `store` as the prototype for new stores.
    ///
    /// Every lineage without a store gets its own clone of the prototype, so
    /// unrelated requests never share fields.
    pub fn with_store<S>(store: S) -> Self
    where
        S: KvStore + Clone + 'static,
    {
        Self {
            store: Arc::new(move || StoreRef::new(store.clone())),
            store_type: std::any::type_name::<S>(),
        }
    }
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self::with_store(MapStore::new())
    }
}

impl fmt::Debug for ManagerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerConfig")
            .field("store", &self.store_type)
            .finish()
    }
}

/// Reads and writes fields stored under one slot of a [`Context`].
#[derive(Clone, Debug)]
pub struct Manager {
    slot: SlotKey,
    config: ManagerConfig,
}

impl Manager {
    /// Create a manager using the default [`MapStore`].
    pub fn new(slot: impl Into<SlotKey>) -> Self {
        Self::with_config(slot, ManagerConfig::default())
    }

    pub fn with_config(slot: impl Into<SlotKey>, config: ManagerConfig) -> Self {
        Self {
            slot: slot.into(),
            config,
        }
    }

    pub fn slot_key(&self) -> &SlotKey {
        &self.slot
    }

    /// The store for this manager's slot, if one was set in the lineage.
    pub fn get(&self, ctx: &Context) -> Result<Option<StoreRef>> {
        match ctx.get::<StoreRef>(&self.slot) {
            Ok(store) => Ok(store.cloned()),
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "slot holds a foreign value");
                Err(e)
            }
        }
    }

    /// Merge `key_values` into the slot's store and return the derived context.
    ///
    /// Pairs are applied in iteration order, so a later pair wins over an
    /// earlier one with the same key. The store is updated in place: frames
    /// of the same lineage that already reference it see the new fields too.
    pub fn set<I, K, V>(&self, ctx: &Context, key_values: I) -> Result<Context>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = match self.get(ctx)? {
            Some(store) => store,
            None => {
                debug!(slot = %self.slot, store = self.config.store_type, "creating store for lineage");
                (self.config.store)()
            }
        };

        // The input may read this same store, so drain it before locking.
        let pairs: Vec<(String, String)> = key_values
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        {
            let mut guard = store.write();
            for (key, value) in &pairs {
                guard.set(key, value);
            }
        }
        trace!(slot = %self.slot, merged = pairs.len(), "merged fields");

        Ok(ctx.with_value(self.slot.clone(), store))
    }

    /// Flattened `[key1, value1, key2, value2, ...]` of the slot's store.
    ///
    /// Pair order follows the store's key listing and is unspecified for
    /// [`MapStore`]. Returns an empty vector when nothing was set.
    pub fn get_keys_and_values(&self, ctx: &Context) -> Result<Vec<String>> {
        let Some(store) = self.get(ctx)? else {
            return Ok(Vec::new());
        };

        let guard = store.read();
        let keys = guard.list_keys();
        let mut keys_and_values = Vec::with_capacity(keys.len() * 2);
        for key in keys {
            let value = guard.get(&key);
            keys_and_values.push(key);
            keys_and_values.push(value);
        }

        Ok(keys_and_values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;
    use crate::store::{KvGetter, KvSetter};
    use parking_lot::Mutex;
    use std::collections::HashMap;

    const SLOT: &str = "test123123123";

    fn sorted(mut values: Vec<String>) -> Vec<String> {
        values.sort();
        values
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    /// Store that ignores writes and always reports the same field.
    #[derive(Clone, Default)]
    struct SentinelStore {
        writes: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl KvGetter for SentinelStore {
        fn get(&self, _key: &str) -> String {
            "sentinel-value".to_string()
        }

        fn list_keys(&self) -> Vec<String> {
            vec!["sentinel-key".to_string()]
        }
    }

    impl KvSetter for SentinelStore {
        fn set(&mut self, key: &str, value: &str) {
            self.writes.lock().push((key.to_string(), value.to_string()));
        }
    }

    #[test]
    fn test_set_single_field() {
        let m = Manager::new(SLOT);
        let ctx = m.set(&Context::background(), [("k", "v")]).unwrap();

        assert_eq!(sorted(m.get_keys_and_values(&ctx).unwrap()), strings(&["k", "v"]));
    }

    #[test]
    fn test_set_multiple_fields() {
        let m = Manager::new(SLOT);
        let ctx = m
            .set(&Context::background(), [("k", "v"), ("k2", "v2")])
            .unwrap();

        assert_eq!(
            sorted(m.get_keys_and_values(&ctx).unwrap()),
            sorted(strings(&["k", "v", "k2", "v2"]))
        );
    }

    #[test]
    fn test_set_no_fields() {
        let m = Manager::new(SLOT);
        let ctx = m
            .set(&Context::background(), HashMap::<String, String>::new())
            .unwrap();

        assert_eq!(m.get_keys_and_values(&ctx).unwrap(), Vec::<String>::new());
        // The slot is still populated with an empty store
        assert!(m.get(&ctx).unwrap().is_some());
    }

    #[test]
    fn test_later_pair_in_same_call_wins() {
        let m = Manager::new(SLOT);
        let ctx = m
            .set(&Context::background(), vec![("k", "v"), ("k", "v2")])
            .unwrap();

        assert_eq!(m.get_keys_and_values(&ctx).unwrap(), strings(&["k", "v2"]));
    }

    #[test]
    fn test_later_call_wins() {
        let m = Manager::new(SLOT);
        let ctx = m.set(&Context::background(), [("k", "v")]).unwrap();
        let ctx = m.set(&ctx, [("k", "v2")]).unwrap();

        let store = m.get(&ctx).unwrap().unwrap();
        assert_eq!(store.get("k"), "v2");
    }

    #[test]
    fn test_merge_across_calls() {
        let m = Manager::new(SLOT);
        let ctx = m.set(&Context::background(), [("k", "v")]).unwrap();
        let ctx = m.set(&ctx, [("k2", "v2")]).unwrap();

        assert_eq!(
            sorted(m.get_keys_and_values(&ctx).unwrap()),
            sorted(strings(&["k", "v", "k2", "v2"]))
        );
    }

    #[test]
    fn test_unset_slot() {
        let m = Manager::new(SLOT);
        let ctx = Context::background();

        assert!(m.get(&ctx).unwrap().is_none());
        assert!(m.get_keys_and_values(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_earlier_frame_observes_later_set() {
        let m = Manager::new(SLOT);
        let first = m.set(&Context::background(), [("k", "v")]).unwrap();
        let second = m.set(&first, [("k2", "v2")]).unwrap();

        let a = m.get(&first).unwrap().unwrap();
        let b = m.get(&second).unwrap().unwrap();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.get("k2"), "v2");
    }

    #[test]
    fn test_set_from_lazy_iterator_over_same_store() {
        let m = Manager::new(SLOT);
        let ctx = m
            .set(&Context::background(), [("a", "1"), ("b", "2")])
            .unwrap();
        let store = m.get(&ctx).unwrap().unwrap();
        let keys = store.list_keys();

        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let copies = keys
                .into_iter()
                .map(move |k| (format!("copy_{}", k), store.get(&k)));
            let ctx = m.set(&ctx, copies).unwrap();
            let _ = tx.send(sorted(m.get_keys_and_values(&ctx).unwrap()));
        });

        let result = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("set did not return");
        assert_eq!(
            result,
            sorted(strings(&["a", "1", "b", "2", "copy_a", "1", "copy_b", "2"]))
        );
    }

    #[test]
    fn test_drop_long_lineage() {
        let m = Manager::new(SLOT);
        let mut ctx = Context::background();
        for i in 0..100_000 {
            ctx = m.set(&ctx, [("counter", i.to_string())]).unwrap();
        }

        assert_eq!(ctx.depth(), 100_000);
        assert_eq!(m.get(&ctx).unwrap().unwrap().get("counter"), "99999");
        drop(ctx);
    }

    #[test]
    fn test_separate_lineages_get_separate_stores() {
        let m = Manager::new(SLOT);
        let root = Context::background();
        let one = m.set(&root, [("k", "one")]).unwrap();
        let two = m.set(&root, [("k", "two")]).unwrap();

        assert_eq!(m.get(&one).unwrap().unwrap().get("k"), "one");
        assert_eq!(m.get(&two).unwrap().unwrap().get("k"), "two");
    }

    #[test]
    fn test_managers_sharing_slot_share_store() {
        let writer = Manager::new(SLOT);
        let reader = Manager::new(SLOT);
        let ctx = writer.set(&Context::background(), [("k", "v")]).unwrap();

        assert_eq!(reader.get_keys_and_values(&ctx).unwrap(), strings(&["k", "v"]));
    }

    #[test]
    fn test_managers_with_distinct_slots_are_isolated() {
        let a = Manager::new("slot-a");
        let b = Manager::new("slot-b");
        let ctx = a.set(&Context::background(), [("k", "a")]).unwrap();
        let ctx = b.set(&ctx, [("k", "b")]).unwrap();

        assert_eq!(a.get_keys_and_values(&ctx).unwrap(), strings(&["k", "a"]));
        assert_eq!(b.get_keys_and_values(&ctx).unwrap(), strings(&["k", "b"]));
    }

    #[test]
    fn test_injected_store_is_used() {
        let store = SentinelStore::default();
        let writes = store.writes.clone();
        let m = Manager::with_config(SLOT, ManagerConfig::with_store(store));

        let ctx = m.set(&Context::background(), [("k", "v")]).unwrap();

        assert_eq!(
            m.get_keys_and_values(&ctx).unwrap(),
            strings(&["sentinel-key", "sentinel-value"])
        );
        assert_eq!(*writes.lock(), vec![("k".to_string(), "v".to_string())]);
    }

    #[test]
    fn test_foreign_value_in_slot() {
        let m = Manager::new(SLOT);
        let ctx = Context::background().with_value(SlotKey::new(SLOT), 17u32);

        assert!(matches!(
            m.get(&ctx),
            Err(FieldError::IncompatibleValue { .. })
        ));
        assert!(matches!(
            m.set(&ctx, [("k", "v")]),
            Err(FieldError::IncompatibleValue { .. })
        ));
        assert!(m.get_keys_and_values(&ctx).is_err());
    }

    #[test]
    fn test_config_debug_names_store_type() {
        let config = ManagerConfig::default();
        assert!(format!("{:?}", config).contains("MapStore"));
    }
}
