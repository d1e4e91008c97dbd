//! Error kinds raised while validating transaction input.

use thiserror::Error;

/// Result type alias using `EntryError`.
pub type EntryResult<T> = Result<T, EntryError>;

/// Coarse classification of an [`EntryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The runtime shape of an input does not match its documented shape.
    Type,
    /// The input has the right shape but violates a domain constraint.
    Value,
}

/// Validation errors.
///
/// The message always names the offending parameter and, where useful,
/// the offending value or the identity of the record being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Wrong runtime type (e.g. an integer where a string is expected).
    #[error("{0}")]
    Type(String),

    /// Correct type, invalid value (range, set membership, parse failure).
    #[error("{0}")]
    Value(String),
}

impl EntryError {
    /// Creates a type error from any displayable message.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self::Type(message.into())
    }

    /// Creates a value error from any displayable message.
    pub fn value_error(message: impl Into<String>) -> Self {
        Self::Value(message.into())
    }

    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Type(_) => ErrorKind::Type,
            Self::Value(_) => ErrorKind::Value,
        }
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Type(message) | Self::Value(message) => message,
        }
    }

    /// Returns the error code for machine consumers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Type(_) => "TYPE_ERROR",
            Self::Value(_) => "VALUE_ERROR",
        }
    }

    /// Returns true for [`EntryError::Type`].
    #[must_use]
    pub const fn is_type_error(&self) -> bool {
        matches!(self, Self::Type(_))
    }

    /// Returns true for [`EntryError::Value`].
    #[must_use]
    pub const fn is_value_error(&self) -> bool {
        matches!(self, Self::Value(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(EntryError::type_error("x").kind(), ErrorKind::Type);
        assert_eq!(EntryError::value_error("x").kind(), ErrorKind::Value);
        assert!(EntryError::type_error("x").is_type_error());
        assert!(!EntryError::type_error("x").is_value_error());
        assert!(EntryError::value_error("x").is_value_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EntryError::Type(String::new()).error_code(), "TYPE_ERROR");
        assert_eq!(EntryError::Value(String::new()).error_code(), "VALUE_ERROR");
    }

    #[test]
    fn test_error_display_is_bare_message() {
        let err = EntryError::value_error("Parameter 'unique_id' has non-positive value -19");
        assert_eq!(err.to_string(), "Parameter 'unique_id' has non-positive value -19");
        assert_eq!(err.message(), err.to_string());
    }
}
