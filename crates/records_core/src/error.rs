//! Error types for schema loading and record validation.
//!
//! Two very different things live here. [`SchemaError`] is a fault: the
//! caller asked for a schema that cannot be used, and the error propagates.
//! [`ValidationError`] is data: one reason a record does not conform, always
//! returned inside a report and never raised.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Errors raised while loading a schema from a store.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The store has no entry for the requested name
    #[error("Schema '{name}' not found")]
    NotFound {
        /// Requested schema name
        name: String,
    },

    /// The entry exists but is not a well-formed schema document
    #[error("Failed to parse schema '{name}': {reason}")]
    Parse {
        /// Schema name
        name: String,
        /// Description of the problem
        reason: String,
    },

    /// The name cannot address an entry of the store
    #[error("Invalid schema name '{name}': {reason}")]
    InvalidName {
        /// Rejected schema name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Reading the entry failed for a reason other than absence
    #[error("Failed to read schema '{name}': {source}")]
    Io {
        /// Schema name
        name: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl SchemaError {
    /// Creates a new not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates a new parse error.
    pub fn parse(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new invalid-name error.
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new I/O error.
    pub fn io(name: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            name: name.into(),
            source,
        }
    }

    /// Name of the schema the error refers to.
    pub fn schema_name(&self) -> &str {
        match self {
            Self::NotFound { name }
            | Self::Parse { name, .. }
            | Self::InvalidName { name, .. }
            | Self::Io { name, .. } => name,
        }
    }
}

/// Category of a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// A required field is absent
    Required,
    /// A value has the wrong dynamic kind
    Type,
    /// A value's string form violates a named format
    Format,
    /// A value's string form does not match a pattern
    Pattern,
    /// A value is outside its allowed set or range
    Constraint,
    /// The validation pass itself could not complete
    Internal,
}

impl ViolationKind {
    /// Label used when rendering an error.
    pub fn label(&self) -> &'static str {
        match self {
            ViolationKind::Required => "Missing required field",
            ViolationKind::Type => "Type mismatch",
            ViolationKind::Format => "Format error",
            ViolationKind::Pattern => "Pattern mismatch",
            ViolationKind::Constraint => "Constraint violation",
            ViolationKind::Internal => "Unexpected error",
        }
    }
}

/// One path-qualified nonconformance found in a record.
///
/// `path` addresses the offending node with dots for object keys and
/// brackets for array indices (`claims[3].amount`). The empty path is the
/// record root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    kind: ViolationKind,
    path: String,
    message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ViolationKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a missing required field error. `path` includes the field.
    pub fn missing_field(path: impl Into<String>, field: &str) -> Self {
        Self::new(
            ViolationKind::Required,
            path,
            format!("'{field}' is required"),
        )
    }

    /// Creates a new type mismatch error.
    pub fn type_mismatch(path: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(
            ViolationKind::Type,
            path,
            format!("expected {expected}, got {actual}"),
        )
    }

    /// Creates a new format error.
    pub fn format(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Format, path, message)
    }

    /// Creates a new pattern mismatch error.
    pub fn pattern_mismatch(path: impl Into<String>, value: &str, pattern: &str) -> Self {
        Self::new(
            ViolationKind::Pattern,
            path,
            format!("value '{value}' does not match pattern '{pattern}'"),
        )
    }

    /// Creates a new constraint violation error.
    pub fn constraint(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Constraint, path, message)
    }

    /// Creates an error describing a validation pass that could not complete.
    pub fn internal(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationKind::Internal, path, message)
    }

    /// Category of this error.
    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    /// Address of the offending node; empty for the record root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Description of the violation, without the path.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            self.path.as_str()
        };
        write!(f, "{} at {}: {}", self.kind.label(), path, self.message)
    }
}

impl std::error::Error for ValidationError {}
