//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`CoverageNavigatorError`], the error type for everything that
//! is *not* an expected response classification. A response that fails validation is
//! never an `Err`: it becomes a [`ValidatedResponse::Failure`] and, further up, a
//! [`ClassifiedError`]. The variants here cover programming errors in schema
//! descriptions and the ambient layer (configuration, CLI input, I/O).
//!
//! # Public API
//! - [`CoverageNavigatorError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, CoverageNavigatorError>`
//!
//! # Error Categories
//! - **Schema defects**: Malformed schema descriptions, unknown built-in schemas
//! - **Input**: Unreadable or non-JSON response bodies, unknown error kinds
//! - **Configuration**: Directory resolution, read, write and parse failures
//!
//! [`ValidatedResponse::Failure`]: crate::core::envelope::ValidatedResponse::Failure
//! [`ClassifiedError`]: crate::core::classification::ClassifiedError

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for coverage-navigator
#[derive(Error, Debug)]
pub enum CoverageNavigatorError {
    // Schema description errors
    #[error("Malformed schema at '{path}': {reason}")]
    MalformedSchema { path: String, reason: String },

    #[error("Unknown schema '{name}'. Built-in schemas: {available}")]
    UnknownSchema { name: String, available: String },

    #[error("Failed to read schema file '{path}': {source}")]
    SchemaReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse schema file '{path}': {source}")]
    SchemaParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Input errors
    #[error("Failed to read response body from {origin}: {source}")]
    InputReadFailed {
        origin: String,
        source: std::io::Error,
    },

    #[error("Response body from {origin} is not valid JSON: {source}")]
    InputParseFailed {
        origin: String,
        source: serde_json::Error,
    },

    #[error("Unknown error kind: '{input}'. Use one of: ParsingError, NotFoundError, OwnerNotActivatedError, Unknown")]
    UnknownErrorKind { input: String },

    #[error("A caller identifier is required for schema '{schema}'. Use --caller <id>")]
    MissingCallerId { schema: String },

    // Configuration errors
    #[error("Could not find configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    ConfigWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // JSON serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using CoverageNavigatorError
pub type Result<T> = std::result::Result<T, CoverageNavigatorError>;

impl CoverageNavigatorError {
    /// Create a malformed schema error for the schema node at `path`
    pub fn malformed_schema(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSchema {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown schema error listing the available built-ins
    pub fn unknown_schema(name: impl Into<String>, available: &[&str]) -> Self {
        Self::UnknownSchema {
            name: name.into(),
            available: available.join(", "),
        }
    }

    /// Create a schema file read error
    pub fn schema_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SchemaReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a schema file parse error
    pub fn schema_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::SchemaParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create an input read error; `origin` names the file or "stdin"
    pub fn input_read_failed(origin: impl Into<String>, source: std::io::Error) -> Self {
        Self::InputReadFailed {
            origin: origin.into(),
            source,
        }
    }

    /// Create an input parse error; `origin` names the file or "stdin"
    pub fn input_parse_failed(origin: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InputParseFailed {
            origin: origin.into(),
            source,
        }
    }

    /// Create an unknown error kind error
    pub fn unknown_error_kind(input: impl Into<String>) -> Self {
        Self::UnknownErrorKind {
            input: input.into(),
        }
    }

    /// Create a missing caller identifier error
    pub fn missing_caller_id(schema: impl Into<String>) -> Self {
        Self::MissingCallerId {
            schema: schema.into(),
        }
    }

    /// Create a config read error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config write error
    pub fn config_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigWriteFailed {
            path: path.into(),
            source,
        }
    }
}
