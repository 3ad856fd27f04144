//! Type checks.

use crate::walk::NodeCheck;
use records_core::{FieldSchema, RecordValue, ValidationError};

/// Checks each visited value against the node's declared `type`.
///
/// Nodes without a `type` accept anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeValidator;

impl TypeValidator {
    /// Creates a new type validator.
    pub fn new() -> Self {
        Self
    }

    /// Returns the mismatch for a single value, if any.
    pub fn check(&self, value: &RecordValue, schema: &FieldSchema, path: &str) -> Option<ValidationError> {
        let kind = schema.kind?;
        if kind.accepts(value) {
            return None;
        }
        Some(ValidationError::type_mismatch(
            path,
            kind.expected_label(),
            value.kind_name(),
        ))
    }
}

impl NodeCheck for TypeValidator {
    fn visit(
        &self,
        value: &RecordValue,
        schema: &FieldSchema,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        errors.extend(self.check(value, schema, path));
    }
}
