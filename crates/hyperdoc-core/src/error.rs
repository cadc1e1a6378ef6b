//! Error types for the Hyperdoc core library
//!
//! Every failure in resolution, synthesis or building aborts the whole
//! operation; the first error is propagated unchanged.

use hyperdoc_schemas::LoaderError;
use thiserror::Error;

/// Main error type for Hyperdoc operations
#[derive(Error, Debug)]
pub enum Error {
    /// A `$ref` that cannot be located in the root document
    #[error("Failed to resolve schema reference '{reference}': {source}")]
    Resolution {
        reference: String,
        #[source]
        source: LoaderError,
    },

    /// The root-level `href` is not a valid absolute URL
    #[error("Invalid base URL '{href}': {source}")]
    UrlParse {
        href: String,
        #[source]
        source: url::ParseError,
    },

    /// A schema with neither a usable type nor an example
    #[error("No example for schema {schema}")]
    NoExample { schema: String },

    /// A reference revisited on its own resolution path
    #[error("Cyclic schema reference: {chain}")]
    CyclicSchema { chain: String },

    /// JSON serialization of a synthesized example failed
    #[error("JSON error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Template parsing or rendering failed
    #[error("Template error: {message}")]
    Template {
        message: String,
        #[source]
        source: tera::Error,
    },

    /// IO errors while reading templates or writing output
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn resolution(reference: impl Into<String>, source: LoaderError) -> Self {
        Self::Resolution {
            reference: reference.into(),
            source,
        }
    }

    pub(crate) fn cyclic(chain: &[String]) -> Self {
        Self::CyclicSchema {
            chain: chain.join(" -> "),
        }
    }

    pub(crate) fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Tera keeps the useful detail in the source chain, so flatten it into the message
    pub(crate) fn template(context: &str, source: tera::Error) -> Self {
        let mut message = context.to_string();
        let mut cause: Option<&dyn std::error::Error> = Some(&source);
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = err.source();
        }
        Self::Template { message, source }
    }

    pub(crate) fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Whether the error stems from the input schema rather than the environment
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::Resolution { .. }
                | Self::UrlParse { .. }
                | Self::NoExample { .. }
                | Self::CyclicSchema { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::NoExample {
            schema: "#/definitions/Blob".to_string(),
        };
        assert_eq!(err.to_string(), "No example for schema #/definitions/Blob");
        assert!(err.is_schema_error());

        let err = Error::cyclic(&["#/definitions/Node".to_string(), "#/definitions/Node".to_string()]);
        assert_eq!(
            err.to_string(),
            "Cyclic schema reference: #/definitions/Node -> #/definitions/Node"
        );
    }

    #[test]
    fn test_resolution_error_keeps_source() {
        let source = LoaderError::reference_error("#/definitions/Pet", "Property 'Pet' not found");
        let err = Error::resolution("#/definitions/Pet", source);

        assert!(err.to_string().contains("Property 'Pet' not found"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_is_not_a_schema_error() {
        let err = Error::io(
            "write failed",
            std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        );
        assert!(!err.is_schema_error());
    }
}
