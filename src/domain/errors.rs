// SPDX-License-Identifier: MIT

//! Error types for the configuration crate.
//!
//! Two error classes exist. [`ConfigError::KeyNotFound`] is expected control
//! flow: callers either check [`has`](crate::service::Configuration::has)
//! first or handle it as a normal miss. [`ConfigError::TypeMismatch`] signals
//! a mistake by the schema author or the configuration author; it is meant to
//! propagate and abort the operation, not to be caught and continued from.
//! All errors use `thiserror`.

use thiserror::Error;

/// The error type for configuration operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested configuration key is not present in the raw snapshot.
    ///
    /// Recoverable: a miss on an optional key is normal control flow.
    #[error("configuration key not found: {key}")]
    KeyNotFound {
        /// The key or dot-path that was not found.
        key: String,
    },

    /// A declared validation rule rejected a value during `load` or `set`.
    ///
    /// This is a programming-error class: the configuration contradicts the
    /// schema's declared types. Tests assert it is raised; production code is
    /// expected to propagate it rather than recover.
    #[error("invalid configuration [{field}] value, expected [{expected}], but got [{actual}]")]
    TypeMismatch {
        /// The rule's dot-path field identifier.
        field: String,
        /// The expected type descriptor.
        expected: String,
        /// The actual type (kind name, or concrete type for instances).
        actual: String,
    },

    /// A source document could not be parsed into a configuration map.
    #[error("failed to parse configuration: {message}")]
    Parse {
        /// The parser's error message.
        message: String,
        /// The underlying parsing error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A configuration map could not be serialized back to a document.
    #[error("failed to serialize configuration: {message}")]
    Serialize {
        /// The serializer's error message.
        message: String,
        /// The underlying serialization error.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_found_message() {
        let error = ConfigError::KeyNotFound {
            key: "a_int".to_string(),
        };
        assert_eq!(error.to_string(), "configuration key not found: a_int");
    }

    #[test]
    fn test_type_mismatch_message() {
        let error = ConfigError::TypeMismatch {
            field: "a_int".to_string(),
            expected: "integer".to_string(),
            actual: "float".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid configuration [a_int] value, expected [integer], but got [float]"
        );
    }

    #[test]
    fn test_parse_message() {
        let error = ConfigError::Parse {
            message: "unexpected end of input".to_string(),
            source: None,
        };
        assert!(error.to_string().starts_with("failed to parse configuration"));
    }

    #[test]
    fn test_serialize_message() {
        let error = ConfigError::Serialize {
            message: "instance value".to_string(),
            source: None,
        };
        assert!(error
            .to_string()
            .starts_with("failed to serialize configuration"));
    }
}
