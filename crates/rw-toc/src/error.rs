//! Error types for table of contents parsing and serialization.

use std::path::PathBuf;

use serde_yaml::Value;

/// Raised when the table of contents data is malformed.
///
/// The message names the offending path, e.g. `'file' key not found: '/intro/'`.
/// Type mismatches found while building toctrees and documents are attached
/// as the [`source`](std::error::Error::source).
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct MalformedError {
    message: String,
    #[source]
    source: Option<ConstructionError>,
}

impl MalformedError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn with_source(message: impl Into<String>, source: ConstructionError) -> Self {
        Self {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Human-readable description including the offending path.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Underlying construction failure, if any.
    #[must_use]
    pub fn construction_error(&self) -> Option<&ConstructionError> {
        self.source.as_ref()
    }
}

/// Failure to build a toctree, document or item from raw values.
///
/// Never returned directly by the parser; always wrapped in [`MalformedError`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConstructionError {
    /// Value has the wrong type for the field.
    #[error("'{field}' must be {expected}, found {found}")]
    WrongType {
        /// Field name (e.g., "maxdepth").
        field: &'static str,
        /// Accepted type(s).
        expected: &'static str,
        /// Type of the value that was given.
        found: &'static str,
    },
    /// Key is not a toctree option.
    #[error("unknown toctree option '{0}'")]
    UnknownOption(String),
    /// A toctree must list at least one item.
    #[error("toctree items cannot be empty")]
    EmptyItems,
}

impl ConstructionError {
    pub(crate) fn wrong_type(field: &'static str, expected: &'static str, value: &Value) -> Self {
        Self::WrongType {
            field,
            expected,
            found: value_kind(value),
        }
    }
}

/// Error returned when a site-map cannot be serialized.
///
/// A parsed site-map never produces these; they indicate a hand-built
/// site-map whose documents reference each other in a cycle.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
    /// Document reached twice while walking the tree.
    #[error("'{0}' in site-map multiple times")]
    Recursion(String),
}

/// Error returned by the file-level helpers.
#[derive(Debug, thiserror::Error)]
pub enum TocError {
    /// Reading the toc file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path of the toc file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// YAML text could not be loaded or dumped.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Structure is not a valid toc.
    #[error("Malformed toc: {0}")]
    Malformed(#[from] MalformedError),
    /// Site-map could not be serialized.
    #[error("{0}")]
    Serialize(#[from] SerializeError),
}

/// Short type name of a YAML value for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
