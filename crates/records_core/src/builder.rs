//! Builder pattern for creating schema trees.
//!
//! Schemas usually come from documents in a schema store, but tests and
//! embedding applications can assemble them directly with a fluent API.

use crate::{FieldSchema, Pattern, RecordValue, SchemaType};

/// Builder for creating a `FieldSchema`.
///
/// # Example
///
/// ```rust
/// use records_core::{FieldSchemaBuilder, SchemaType};
///
/// let address = FieldSchemaBuilder::object()
///     .property("city", FieldSchemaBuilder::new(SchemaType::String).build())
///     .property(
///         "zip",
///         FieldSchemaBuilder::new(SchemaType::String)
///             .pattern_str(r"[0-9]{5}$")
///             .expect("valid pattern")
///             .build(),
///     )
///     .required("city")
///     .build();
///
/// assert_eq!(address.required, vec!["city".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct FieldSchemaBuilder {
    schema: FieldSchema,
}

impl FieldSchemaBuilder {
    /// Creates a builder for a node of the given type.
    pub fn new(kind: SchemaType) -> Self {
        Self {
            schema: FieldSchema {
                kind: Some(kind),
                ..Default::default()
            },
        }
    }

    /// Creates a builder for a node without a declared type.
    pub fn untyped() -> Self {
        Self::default()
    }

    /// Creates a builder for an `object` node.
    pub fn object() -> Self {
        Self::new(SchemaType::Object)
    }

    /// Creates a builder for an `array` node with the given item schema.
    pub fn array(items: FieldSchema) -> Self {
        Self::new(SchemaType::Array).items(items)
    }

    /// Adds a nested property.
    pub fn property(mut self, name: impl Into<String>, schema: FieldSchema) -> Self {
        self.schema.properties.insert(name.into(), schema);
        self
    }

    /// Marks a field as required at this level.
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.schema.required.push(name.into());
        self
    }

    /// Marks several fields as required, keeping their order.
    pub fn required_all<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.schema.required.extend(names.into_iter().map(Into::into));
        self
    }

    /// Sets the item schema.
    pub fn items(mut self, items: FieldSchema) -> Self {
        self.schema.items = Some(Box::new(items));
        self
    }

    /// Sets the named format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.schema.format = Some(format.into());
        self
    }

    /// Sets an already compiled pattern.
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.schema.pattern = Some(pattern);
        self
    }

    /// Compiles and sets a pattern.
    pub fn pattern_str(self, pattern: &str) -> Result<Self, regex::Error> {
        Ok(self.pattern(Pattern::new(pattern)?))
    }

    /// Sets the allowed values.
    pub fn allowed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<RecordValue>,
    {
        self.schema.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the inclusive lower bound.
    pub fn minimum(mut self, minimum: f64) -> Self {
        self.schema.minimum = Some(minimum);
        self
    }

    /// Sets the inclusive upper bound.
    pub fn maximum(mut self, maximum: f64) -> Self {
        self.schema.maximum = Some(maximum);
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.schema.title = Some(title.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.schema.description = Some(description.into());
        self
    }

    /// Builds the field schema.
    pub fn build(self) -> FieldSchema {
        self.schema
    }
}
