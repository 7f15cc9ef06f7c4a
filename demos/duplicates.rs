//! Repeated sets merge into one store; the last value for a key wins.

use fieldctx::{Context, KvGetter, Manager, MapStore};
use std::collections::HashMap;
use tracing::info;

fn main() -> fieldctx::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let fields = Manager::new("my-unique-context-key");

    let first = MapStore::from_map(HashMap::from([
        ("my-key".to_string(), "my-value".to_string()),
        ("my-key2".to_string(), "my-value".to_string()),
    ]));
    let ctx = fields.set(&Context::background(), first.entries())?;

    let second = HashMap::from([("my-key", "my-value2"), ("my-key2", "my-value2")]);
    let ctx = fields.set(&ctx, second)?;

    // Order is unspecified: the default store is a hash map
    let kvs = fields.get_keys_and_values(&ctx)?;
    info!(?kvs, "fields on context"); // my-key=my-value2, my-key2=my-value2

    Ok(())
}
