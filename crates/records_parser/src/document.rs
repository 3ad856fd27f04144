//! Raw schema documents and their compilation into typed schema trees.

use crate::{ParserError, Result};
use indexmap::IndexMap;
use records_core::{FieldSchema, Pattern, RecordValue, SchemaType};
use serde::Deserialize;

/// A schema node exactly as it appears in a document.
///
/// Keys the validator does not use (`$schema`, `additionalProperties`, ...)
/// are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct SchemaDocument {
    #[serde(rename = "type")]
    kind: Option<String>,

    #[serde(default)]
    properties: IndexMap<String, SchemaDocument>,

    #[serde(default)]
    required: Vec<String>,

    items: Option<Box<SchemaDocument>>,

    format: Option<String>,

    pattern: Option<String>,

    #[serde(rename = "enum")]
    allowed_values: Option<Vec<serde_json::Value>>,

    minimum: Option<f64>,

    maximum: Option<f64>,

    title: Option<String>,

    description: Option<String>,
}

impl SchemaDocument {
    /// Compiles the document into a typed tree, rejecting unknown types,
    /// invalid patterns, inverted bounds and nesting beyond `max_depth`.
    pub(crate) fn compile(self, max_depth: usize) -> Result<FieldSchema> {
        self.compile_node("", 1, max_depth)
    }

    fn compile_node(self, location: &str, depth: usize, max_depth: usize) -> Result<FieldSchema> {
        if depth > max_depth {
            return Err(ParserError::MaxDepthExceeded {
                location: display_location(location),
                limit: max_depth,
            });
        }

        let kind = self
            .kind
            .map(|kind| {
                kind.parse::<SchemaType>()
                    .map_err(|reason| ParserError::InvalidType {
                        location: display_location(location),
                        reason,
                    })
            })
            .transpose()?;

        let pattern = self
            .pattern
            .map(|source| {
                Pattern::new(source).map_err(|e| ParserError::InvalidPattern {
                    location: display_location(location),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        if let (Some(min), Some(max)) = (self.minimum, self.maximum) {
            if min > max {
                return Err(ParserError::InvalidBounds {
                    location: display_location(location),
                    minimum: min,
                    maximum: max,
                });
            }
        }

        let mut properties = IndexMap::with_capacity(self.properties.len());
        for (name, child) in self.properties {
            let child_location = join_location(location, &name);
            let compiled = child.compile_node(&child_location, depth + 1, max_depth)?;
            properties.insert(name, compiled);
        }

        let items = match self.items {
            Some(items) => {
                let items_location = format!("{location}[]");
                Some(Box::new(items.compile_node(
                    &items_location,
                    depth + 1,
                    max_depth,
                )?))
            }
            None => None,
        };

        Ok(FieldSchema {
            kind,
            properties,
            required: self.required,
            items,
            format: self.format,
            pattern,
            allowed_values: self
                .allowed_values
                .map(|values| values.into_iter().map(RecordValue::from).collect()),
            minimum: self.minimum,
            maximum: self.maximum,
            title: self.title,
            description: self.description,
        })
    }
}

fn join_location(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

fn display_location(location: &str) -> String {
    if location.is_empty() {
        "<root>".to_string()
    } else {
        location.to_string()
    }
}
