//! Error types for schema loading and dereferencing
//!
//! Copyright (c) 2025 Hyperdoc Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Error types for loading a hyper-schema and dereferencing its nodes
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// A reference that could not be located in the root document
    #[error("Failed to resolve reference '{reference}': {reason}")]
    ReferenceError { reference: String, reason: String },

    /// A reference that names a document other than the root
    #[error("Reference '{reference}' points outside the root document")]
    ExternalReference { reference: String },

    /// A chain of references that loops back on itself
    #[error("Circular reference detected: {chain}")]
    CircularReference { chain: String },

    /// A node that does not have the shape of a schema
    #[error("Invalid schema at '{location}': {source}")]
    InvalidSchema {
        location: String,
        source: serde_json::Error,
    },

    /// Generic validation errors
    #[error("Validation failed for '{path}': {reason}")]
    ValidationError { path: PathBuf, reason: String },
}

impl From<std::io::Error> for LoaderError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::from("<unknown>"),
            source: error,
        }
    }
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create a reference resolution error
    pub fn reference_error(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ReferenceError {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    /// Create a circular reference error from the visited reference chain
    pub fn circular_reference(chain: &[String]) -> Self {
        Self::CircularReference {
            chain: chain.join(" -> "),
        }
    }

    /// Create an invalid schema error
    pub fn invalid_schema(location: impl Into<String>, error: serde_json::Error) -> Self {
        Self::InvalidSchema {
            location: location.into(),
            source: error,
        }
    }

    /// Create a validation error
    pub fn validation_error(path: PathBuf, reason: String) -> Self {
        Self::ValidationError { path, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let path = PathBuf::from("api.yaml");

        let io_err = LoaderError::io_error(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
        );
        assert!(matches!(io_err, LoaderError::IoError { .. }));

        let circular_err = LoaderError::circular_reference(&[
            "#/definitions/A".to_string(),
            "#/definitions/B".to_string(),
            "#/definitions/A".to_string(),
        ]);
        assert_eq!(
            circular_err.to_string(),
            "Circular reference detected: #/definitions/A -> #/definitions/B -> #/definitions/A"
        );
    }

    #[test]
    fn test_reference_error_message() {
        let err = LoaderError::reference_error("#/definitions/Missing", "Property 'Missing' not found");
        assert_eq!(
            err.to_string(),
            "Failed to resolve reference '#/definitions/Missing': Property 'Missing' not found"
        );
    }
}
