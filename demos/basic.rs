//! Set a field on a context and read it back.

use fieldctx::{Context, Manager};
use tracing::info;

fn main() -> fieldctx::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    // The slot key should be unique to your application
    let fields = Manager::new("my-unique-context-key");

    let ctx = fields.set(&Context::background(), [("my-key", "my-value")])?;

    let kvs = fields.get_keys_and_values(&ctx)?;
    info!(?kvs, "fields on context"); // ["my-key", "my-value"]

    Ok(())
}
