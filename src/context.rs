//! Immutable propagation context.
//!
//! A [`Context`] is a chain of frames. Each frame associates one
//! [`SlotKey`] with a value and points at its parent; lookups walk from the
//! newest frame toward the root and return the first match. Frames are never
//! modified once created, so a `Context` can be cloned and handed to other
//! layers freely.

use crate::error::{FieldError, Result};
use crate::types::SlotKey;
use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

struct Frame {
    key: SlotKey,
    value: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
    parent: Option<Arc<Frame>>,
}

impl Drop for Frame {
    // Unlink parents iteratively; the default drop recurses once per frame.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(frame) = parent {
            match Arc::try_unwrap(frame) {
                Ok(mut frame) => parent = frame.parent.take(),
                Err(_) => break,
            }
        }
    }
}

/// Request-scoped carrier of values keyed by [`SlotKey`].
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Frame>>,
}

impl Context {
    /// The empty root context.
    pub fn background() -> Self {
        Self { head: None }
    }

    /// Derive a child context associating `key` with `value`.
    ///
    /// A value for the same key in a parent frame is shadowed, not replaced.
    pub fn with_value<T>(&self, key: SlotKey, value: T) -> Context
    where
        T: Any + Send + Sync,
    {
        Context {
            head: Some(Arc::new(Frame {
                key,
                value: Arc::new(value),
                type_name: any::type_name::<T>(),
                parent: self.head.clone(),
            })),
        }
    }

    /// Raw lookup of the newest value stored under `key`.
    pub fn value(&self, key: &SlotKey) -> Option<&(dyn Any + Send + Sync)> {
        self.find(key).map(|frame| frame.value.as_ref())
    }

    /// Typed lookup of the newest value stored under `key`.
    ///
    /// Returns `Ok(None)` when no frame carries `key`, and
    /// [`FieldError::IncompatibleValue`] when the newest value has another type.
    pub fn get<T>(&self, key: &SlotKey) -> Result<Option<&T>>
    where
        T: Any,
    {
        let Some(frame) = self.find(key) else {
            return Ok(None);
        };

        match frame.value.downcast_ref::<T>() {
            Some(value) => Ok(Some(value)),
            None => Err(FieldError::IncompatibleValue {
                slot: key.clone(),
                expected: any::type_name::<T>(),
                found: frame.type_name,
            }),
        }
    }

    /// Whether any frame carries `key`.
    pub fn contains(&self, key: &SlotKey) -> bool {
        self.find(key).is_some()
    }

    /// Number of frames between this context and the root.
    pub fn depth(&self) -> usize {
        self.frames().count()
    }

    fn find(&self, key: &SlotKey) -> Option<&Frame> {
        self.frames().find(|frame| &frame.key == key)
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.head.as_deref(), |&frame| frame.parent.as_deref())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.frames().map(|frame| (&frame.key, frame.type_name)))
            .finish()
    }
}
