//! Core types shared across the crate.

use std::fmt;
use std::sync::Arc;

/// Field name for the request ID.
pub const REQUEST_ID_KEY: &str = "requestID";

/// Field name for the request method.
pub const REQUEST_METHOD_KEY: &str = "requestMethod";

/// Field name for the request path.
pub const REQUEST_PATH_KEY: &str = "requestPath";

/// Identifier of a slot inside a [`Context`](crate::Context).
///
/// A context only accepts `SlotKey`s, never bare strings, so two libraries
/// can only collide by choosing the same slot name on purpose.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotKey(Arc<str>);

impl SlotKey {
    /// Create a slot key. The name should be unique to your application.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        SlotKey(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotKey({:?})", &*self.0)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SlotKey {
    fn from(name: &str) -> Self {
        SlotKey::new(name)
    }
}

impl From<String> for SlotKey {
    fn from(name: String) -> Self {
        SlotKey::new(name)
    }
}
