//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error(transparent)]
    Parse(#[from] ecsgen_schema::ParseError),

    /// Schema validation error.
    #[error(transparent)]
    Schema(#[from] ecsgen_schema::SchemaError),

    /// Writing generated output failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Generator configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Error message.
        message: String,
    },

    /// Unknown type reference.
    #[error("unknown type '{type_name}' referenced by {site}")]
    UnknownType {
        /// Type name.
        type_name: String,
        /// Referencing site.
        site: String,
    },
}

impl CodegenError {
    /// Creates an IO error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid configuration error with the given message.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = CodegenError::io(
            "/out/foo/mod.rs",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "failed to write /out/foo/mod.rs: denied");
    }

    #[test]
    fn test_schema_error_converts() {
        let err: CodegenError =
            ecsgen_schema::SchemaError::unresolved("a.B", "field 'b' of type 'a.A'").into();
        assert!(matches!(err, CodegenError::Schema(_)));
    }

    #[test]
    fn test_wrapped_errors_print_once() {
        let parse = ecsgen_schema::ParseError::unknown_builtin("int8", "field 'x'");
        let expected = parse.to_string();
        let schema = ecsgen_schema::SchemaError::from(parse);
        let err = CodegenError::from(schema);
        assert_eq!(err.to_string(), expected);
        assert!(std::error::Error::source(&err).is_none());

        let err: CodegenError = ecsgen_schema::ParseError::unknown_builtin("int8", "field 'x'").into();
        assert!(matches!(err, CodegenError::Parse(_)));
        assert_eq!(err.to_string(), expected);
    }
}
