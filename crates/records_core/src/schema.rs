//! Schema types and structures.
//!
//! A [`Schema`] is a named tree of [`FieldSchema`] nodes, parsed once from a
//! schema document and never mutated afterwards. Each node may declare a
//! type, nested properties, an item schema, a named format, a pattern, and
//! value constraints.

use crate::RecordValue;
use indexmap::IndexMap;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Default limit on schema and record nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// The fixed set of kinds a field schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaType {
    /// Text
    String,
    /// Whole number
    Integer,
    /// Integer or floating point number
    Number,
    /// `true` or `false`
    Boolean,
    /// Sequence of values
    Array,
    /// Key/value mapping
    Object,
}

impl SchemaType {
    /// Returns the schema keyword for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }

    /// Returns the wording used for this type in mismatch messages.
    pub fn expected_label(&self) -> &'static str {
        match self {
            SchemaType::Number => "number (int/float)",
            other => other.as_str(),
        }
    }

    /// Returns true if `value` has the dynamic kind this type requires.
    ///
    /// `number` accepts integers and floats; every other type needs an exact
    /// kind match.
    pub fn accepts(&self, value: &RecordValue) -> bool {
        match self {
            SchemaType::String => matches!(value, RecordValue::String(_)),
            SchemaType::Integer => matches!(value, RecordValue::Integer(_)),
            SchemaType::Number => value.is_number(),
            SchemaType::Boolean => matches!(value, RecordValue::Bool(_)),
            SchemaType::Array => matches!(value, RecordValue::Array(_)),
            SchemaType::Object => matches!(value, RecordValue::Object(_)),
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(SchemaType::String),
            "integer" => Ok(SchemaType::Integer),
            "number" => Ok(SchemaType::Number),
            "boolean" => Ok(SchemaType::Boolean),
            "array" => Ok(SchemaType::Array),
            "object" => Ok(SchemaType::Object),
            other => Err(format!("unsupported type '{other}'")),
        }
    }
}

/// A regular expression compiled once and matched from the start of a string.
///
/// Matching is anchored at the beginning only: `^[A-Z]{3}` accepts `"CLM001"`.
/// Patterns that need a full match carry their own `$`.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&format!("^(?:{source})"))?;
        Ok(Self { source, regex })
    }

    /// Returns the pattern as written in the schema.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if `text` matches from its first character.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// One node of a schema tree.
///
/// The root of a [`Schema`] is a `FieldSchema` too; its `properties` and
/// `required` describe the top-level record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSchema {
    /// Declared type, if any
    pub kind: Option<SchemaType>,

    /// Nested field schemas, in document order
    pub properties: IndexMap<String, FieldSchema>,

    /// Field names that must be present at this level, in declared order
    pub required: Vec<String>,

    /// Schema applied to every element of an array
    pub items: Option<Box<FieldSchema>>,

    /// Named semantic format (`date`, `email`, ...)
    pub format: Option<String>,

    /// Pattern the value's string form must match
    pub pattern: Option<Pattern>,

    /// Allowed values (`enum`)
    pub allowed_values: Option<Vec<RecordValue>>,

    /// Inclusive lower bound for numeric values
    pub minimum: Option<f64>,

    /// Inclusive upper bound for numeric values
    pub maximum: Option<f64>,

    /// Optional short title
    pub title: Option<String>,

    /// Optional human-readable description
    pub description: Option<String>,
}

impl FieldSchema {
    /// Returns true if this node declares nested properties.
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Looks up a nested property schema.
    pub fn property(&self, name: &str) -> Option<&FieldSchema> {
        self.properties.get(name)
    }

    /// Returns true if a record value at this node must be an object.
    pub fn expects_object(&self) -> bool {
        self.kind == Some(SchemaType::Object) || self.has_properties()
    }

    /// Returns true if this node declares an `enum` or numeric bound.
    pub fn has_constraints(&self) -> bool {
        self.allowed_values.is_some() || self.minimum.is_some() || self.maximum.is_some()
    }

    /// Nesting depth of this node: 1 for a leaf.
    pub fn depth(&self) -> usize {
        let nested = self
            .properties
            .values()
            .map(FieldSchema::depth)
            .chain(self.items.iter().map(|items| items.depth()))
            .max()
            .unwrap_or(0);
        nested + 1
    }
}

/// A parsed schema, identified by the name it was loaded under.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    root: FieldSchema,
}

impl Schema {
    /// Creates a schema from its root node.
    pub fn new(name: impl Into<String>, root: FieldSchema) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Name the schema was loaded under (e.g. `claims_data.json`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root node of the schema tree.
    pub fn root(&self) -> &FieldSchema {
        &self.root
    }

    /// Top-level required field names, in declared order.
    pub fn required(&self) -> &[String] {
        &self.root.required
    }

    /// Top-level property schemas.
    pub fn properties(&self) -> &IndexMap<String, FieldSchema> {
        &self.root.properties
    }

    /// Title declared by the schema document, if any.
    pub fn title(&self) -> Option<&str> {
        self.root.title.as_deref()
    }
}
