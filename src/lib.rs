//! # Context Fields
//!
//! Typed key-value fields carried through an immutable, request-scoped
//! propagation context. Stash request metadata in one layer and read it back
//! in logging or tracing middleware without threading it through every
//! function signature.
//!
//! ## Core Concepts
//!
//! - **Context**: Immutable chain of frames keyed by slot keys
//! - **Stores**: String-to-string maps holding the fields
//! - **Manager**: Reads and merges a store under one slot of a context
//!
//! ## Example
//!
//! ```
//! use fieldctx::{Context, Manager, REQUEST_ID_KEY, REQUEST_PATH_KEY};
//!
//! let fields = Manager::new("my-service-fields");
//!
//! let ctx = fields.set(&Context::background(), [
//!     (REQUEST_ID_KEY, "42"),
//!     (REQUEST_PATH_KEY, "/users"),
//! ])?;
//!
//! let store = fields.get(&ctx)?.expect("fields were set");
//! assert_eq!(store.get(REQUEST_ID_KEY), "42");
//! # Ok::<(), fieldctx::FieldError>(())
//! ```

pub mod context;
pub mod error;
pub mod manager;
pub mod store;
pub mod types;

// Re-exports
pub use context::Context;
pub use error::{FieldError, Result};
pub use manager::{Manager, ManagerConfig};
pub use store::{Field, KvGetter, KvSetter, KvStore, MapStore, StoreRef};
pub use types::*;
