//! Lock-step traversal of a record and its schema.
//!
//! All checks share this traversal so they agree on which nodes are
//! visited: a record field is visited only when the schema declares it under
//! `properties`, and array elements only when the schema declares `items`.
//! Record fields the schema does not mention are skipped.

use crate::WalkError;
use records_core::{FieldSchema, RecordValue, ValidationError, ValidationReport, ValidationStats};

/// A per-node rule applied during a walk.
pub trait NodeCheck {
    /// Inspects one record node against its schema node, pushing any
    /// violations onto `errors`.
    fn visit(
        &self,
        value: &RecordValue,
        schema: &FieldSchema,
        path: &str,
        errors: &mut Vec<ValidationError>,
    );
}

/// Walks `record` against `root`, applying `check` to every visited node,
/// the root included. Depth counts from 1 at the root.
pub fn walk<C: NodeCheck + ?Sized>(
    record: &RecordValue,
    root: &FieldSchema,
    max_depth: usize,
    check: &C,
) -> Result<ValidationReport, WalkError> {
    let mut walker = Walker {
        check,
        max_depth,
        errors: Vec::new(),
        fields_checked: 0,
    };
    walker.node(record, root, "", 1)?;

    let stats = ValidationStats {
        fields_checked: walker.fields_checked,
        duration_ms: 0,
    };
    Ok(ValidationReport::from_errors(walker.errors).with_stats(stats))
}

struct Walker<'a, C: ?Sized> {
    check: &'a C,
    max_depth: usize,
    errors: Vec<ValidationError>,
    fields_checked: usize,
}

impl<C: NodeCheck + ?Sized> Walker<'_, C> {
    fn node(
        &mut self,
        value: &RecordValue,
        schema: &FieldSchema,
        path: &str,
        depth: usize,
    ) -> Result<(), WalkError> {
        if depth > self.max_depth {
            return Err(WalkError::MaxDepthExceeded {
                path: path.to_string(),
                limit: self.max_depth,
            });
        }
        if depth > 1 {
            self.fields_checked += 1;
        }

        self.check.visit(value, schema, path, &mut self.errors);

        match value {
            RecordValue::Object(map) if schema.has_properties() => {
                for (key, child) in map {
                    let Some(child_schema) = schema.property(key) else {
                        continue;
                    };
                    self.node(child, child_schema, &child_path(path, key), depth + 1)?;
                }
            }
            RecordValue::Array(items) => {
                if let Some(item_schema) = &schema.items {
                    for (index, item) in items.iter().enumerate() {
                        self.node(item, item_schema, &index_path(path, index), depth + 1)?;
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}

/// Extends `parent` with an object key: `insurance` + `policy_number`.
pub fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Extends `parent` with an array index: `claims` + 3 → `claims[3]`.
pub fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use records_core::{FieldSchemaBuilder, SchemaType};
    use serde_json::json;

    /// Records the path of every visited node.
    struct PathRecorder;

    impl NodeCheck for PathRecorder {
        fn visit(
            &self,
            _value: &RecordValue,
            _schema: &FieldSchema,
            path: &str,
            errors: &mut Vec<ValidationError>,
        ) {
            errors.push(ValidationError::internal(path, "visited"));
        }
    }

    fn visited_paths(record: serde_json::Value, schema: &FieldSchema, max_depth: usize) -> Vec<String> {
        walk(&record.into(), schema, max_depth, &PathRecorder)
            .expect("walk should complete")
            .errors
            .iter()
            .map(|e| e.path().to_string())
            .collect()
    }

    fn nested_schema() -> FieldSchema {
        FieldSchemaBuilder::object()
            .property(
                "a",
                FieldSchemaBuilder::object()
                    .property(
                        "b",
                        FieldSchemaBuilder::array(
                            FieldSchemaBuilder::object()
                                .property("c", FieldSchemaBuilder::new(SchemaType::Integer).build())
                                .build(),
                        )
                        .build(),
                    )
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_paths_in_record_order() {
        let record = json!({"a": {"b": [{"c": 1}, {"c": 2}]}, "extra": true});

        assert_eq!(
            visited_paths(record, &nested_schema(), 64),
            vec!["", "a", "a.b", "a.b[0]", "a.b[0].c", "a.b[1]", "a.b[1].c"]
        );
    }

    #[test]
    fn test_undeclared_fields_are_not_visited() {
        let record = json!({"unknown": {"deep": 1}});
        assert_eq!(visited_paths(record, &nested_schema(), 64), vec![""]);
    }

    #[test]
    fn test_no_descent_into_wrong_kind() {
        let record = json!({"a": "not an object"});
        assert_eq!(visited_paths(record, &nested_schema(), 64), vec!["", "a"]);
    }

    #[test]
    fn test_fields_checked_excludes_root() {
        let record: RecordValue = json!({"a": {"b": []}}).into();
        let report = walk(&record, &nested_schema(), 64, &PathRecorder).unwrap();
        assert_eq!(report.stats.fields_checked, 2);
    }

    #[test]
    fn test_depth_limit() {
        let record: RecordValue = json!({"a": {"b": [{"c": 1}]}}).into();

        assert!(walk(&record, &nested_schema(), 5, &PathRecorder).is_ok());
        let err = walk(&record, &nested_schema(), 4, &PathRecorder).unwrap_err();
        assert_eq!(
            err,
            WalkError::MaxDepthExceeded {
                path: "a.b[0].c".to_string(),
                limit: 4
            }
        );
    }

    #[test]
    fn test_path_helpers() {
        assert_eq!(child_path("", "claim_id"), "claim_id");
        assert_eq!(child_path("insurance", "policy_number"), "insurance.policy_number");
        assert_eq!(index_path("claims", 3), "claims[3]");
    }
}
