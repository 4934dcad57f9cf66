//! Error types for flashdeck-core.
//!
//! Scheduling itself never fails; the only errors the core reports are
//! rejected drafts and edits.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised when a deck or card draft is not acceptable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("deck name must not be empty")]
    EmptyDeckName,

    #[error("card front must not be empty")]
    EmptyFront,

    #[error("card back must not be empty")]
    EmptyBack,
}
