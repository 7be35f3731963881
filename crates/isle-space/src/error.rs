//! Errors shared by every isle crate.

use thiserror::Error;

/// Errors that can occur in space, set and union operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument violates the contract of the operation.
    #[error("invalid argument: {0}")]
    Invalid(String),

    /// An internal invariant was broken.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Creates an [`Error::Invalid`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Creates an [`Error::Internal`].
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true for [`Error::Invalid`].
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Result alias used throughout isle.
pub type Result<T> = std::result::Result<T, Error>;
