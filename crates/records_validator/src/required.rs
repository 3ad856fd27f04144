//! Required-field checks.

use crate::walk::{NodeCheck, child_path};
use records_core::{FieldSchema, RecordValue, ValidationError};

/// Enforces `required` lists.
///
/// As a [`NodeCheck`] it inspects every object node reached by the walk, so
/// nested `required` lists are enforced too. [`missing_fields`](Self::missing_fields)
/// looks at the top level only.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFieldValidator;

impl RequiredFieldValidator {
    /// Creates a new required-field validator.
    pub fn new() -> Self {
        Self
    }

    /// Returns the names from the root `required` list that `record` lacks,
    /// in declared order. A record that is not an object lacks all of them.
    pub fn missing_fields(&self, record: &RecordValue, schema: &FieldSchema) -> Vec<String> {
        match record.as_object() {
            Some(map) => schema
                .required
                .iter()
                .filter(|field| !map.contains_key(field.as_str()))
                .cloned()
                .collect(),
            None => schema.required.clone(),
        }
    }
}

impl NodeCheck for RequiredFieldValidator {
    fn visit(
        &self,
        value: &RecordValue,
        schema: &FieldSchema,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        let Some(map) = value.as_object() else {
            return;
        };

        for field in &schema.required {
            if !map.contains_key(field.as_str()) {
                errors.push(ValidationError::missing_field(child_path(path, field), field));
            }
        }
    }
}
