//! Error types for the courier operations core.
//!
//! This module defines the centralized error type [`CourierError`] and a type alias
//! [`Result`] used by every service and page. All errors are implemented with the
//! `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for courier operations.
///
/// Service calls fail with [`CourierError::NotFound`] when they reference an
/// identifier that is not in the collection. Form steps fail with
/// [`CourierError::Validation`]. The remaining variants cover fixture loading,
/// configuration and I/O problems.
///
/// # Examples
///
/// ```
/// use courier_ops::CourierError;
///
/// let err = CourierError::not_found("Order", "1700000000000");
/// assert_eq!(err.to_string(), "Order not found");
/// ```
#[derive(Debug, Error)]
pub enum CourierError {
    /// An operation referenced an identifier that does not exist.
    ///
    /// `kind` is the record kind (`"Order"`, `"Driver"`, ...). The message
    /// intentionally omits the identifier so it can be shown to users as is.
    #[error("{kind} not found")]
    NotFound {
        /// Record kind, used as the message prefix.
        kind: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// Required input was missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The backing store rejected an operation.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Fixture data could not be read or parsed.
    #[error("Fixture error: {0}")]
    Fixture(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CourierError {
    /// Builds a [`CourierError::NotFound`] for the given record kind and id.
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Returns `true` for [`CourierError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A specialized `Result` type for courier operations.
pub type Result<T> = std::result::Result<T, CourierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_kind_only() {
        let err = CourierError::not_found("Driver", "42");
        assert_eq!(err.to_string(), "Driver not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = CourierError::Validation("Please enter a tracking number".into());
        assert_eq!(err.to_string(), "Please enter a tracking number");
        assert!(!err.is_not_found());
    }
}
