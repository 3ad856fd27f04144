//! Error types for validation operations.

use records_core::ValidationError;
use thiserror::Error;

/// Conditions that stop a walk over a record before it completes.
///
/// These never reach the caller as `Err`: the engine converts them into a
/// single [`ValidationError`] of kind `Internal`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    /// The record/schema tree is nested deeper than the configured limit
    #[error("maximum nesting depth of {limit} exceeded")]
    MaxDepthExceeded { path: String, limit: usize },
}

impl WalkError {
    /// Converts this condition into the error reported to the caller.
    pub fn into_validation_error(self) -> ValidationError {
        let message = self.to_string();
        match self {
            WalkError::MaxDepthExceeded { path, .. } => ValidationError::internal(path, message),
        }
    }
}

/// Errors in validator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable holds an unusable value
    #[error("Invalid value '{value}' for {variable}: {reason}")]
    InvalidEnv {
        variable: String,
        value: String,
        reason: String,
    },

    /// A configuration field is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use records_core::ViolationKind;

    #[test]
    fn test_depth_error_becomes_internal_validation_error() {
        let err = WalkError::MaxDepthExceeded {
            path: "a.b[0]".to_string(),
            limit: 2,
        }
        .into_validation_error();

        assert_eq!(err.kind(), ViolationKind::Internal);
        assert_eq!(err.path(), "a.b[0]");
        assert_eq!(err.message(), "maximum nesting depth of 2 exceeded");
    }
}
