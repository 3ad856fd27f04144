//! Value constraints: allowed values and numeric bounds.

use crate::walk::NodeCheck;
use records_core::{FieldSchema, RecordValue, ValidationError};

/// Checks `enum`, `minimum` and `maximum` on each visited value.
///
/// Bounds are inclusive and apply to numbers only; a non-numeric value under
/// a bounded node is left to the type check.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintValidator;

impl ConstraintValidator {
    /// Creates a new constraint validator.
    pub fn new() -> Self {
        Self
    }

    fn validate_allowed_values(
        &self,
        value: &RecordValue,
        allowed: &[RecordValue],
        path: &str,
    ) -> Option<ValidationError> {
        if allowed.iter().any(|candidate| candidate.loosely_equals(value)) {
            return None;
        }

        let listed = allowed
            .iter()
            .map(|candidate| candidate.string_form())
            .collect::<Vec<_>>()
            .join(", ");
        Some(ValidationError::constraint(
            path,
            format!(
                "value '{}' not in allowed values [{}]",
                value.string_form(),
                listed
            ),
        ))
    }

    fn validate_range(
        &self,
        value: &RecordValue,
        schema: &FieldSchema,
        path: &str,
    ) -> Option<ValidationError> {
        let number = value.as_f64()?;

        if let Some(min) = schema.minimum {
            if number < min {
                return Some(ValidationError::constraint(
                    path,
                    format!("value {} is below minimum {}", value.string_form(), min),
                ));
            }
        }
        if let Some(max) = schema.maximum {
            if number > max {
                return Some(ValidationError::constraint(
                    path,
                    format!("value {} is above maximum {}", value.string_form(), max),
                ));
            }
        }
        None
    }
}

impl NodeCheck for ConstraintValidator {
    fn visit(
        &self,
        value: &RecordValue,
        schema: &FieldSchema,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        if !schema.has_constraints() {
            return;
        }
        if let Some(allowed) = &schema.allowed_values {
            errors.extend(self.validate_allowed_values(value, allowed, path));
        }
        errors.extend(self.validate_range(value, schema, path));
    }
}
