//! Error types for context field access.

use crate::types::SlotKey;
use thiserror::Error;

/// Main error type for manager and context operations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The slot holds a value of another type, usually placed there by
    /// unrelated code that picked the same slot key.
    #[error("Incompatible value at slot {slot}: expected {expected}, found {found}")]
    IncompatibleValue {
        slot: SlotKey,
        expected: &'static str,
        found: &'static str,
    },
}

/// Result type for field operations.
pub type Result<T> = std::result::Result<T, FieldError>;
