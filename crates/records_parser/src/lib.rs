//! Parser for schema documents (JSON/YAML/TOML formats).
//!
//! This crate turns the text of a schema document into the strongly-typed
//! [`Schema`] tree, and provides the schema stores documents are read from.
//!
//! # Example
//!
//! ```rust
//! use records_parser::parse_schema;
//!
//! let json = r#"{
//!     "type": "object",
//!     "required": ["claim_id"],
//!     "properties": {
//!         "claim_id": {"type": "string", "pattern": "^CLM[0-9]{3}$"},
//!         "amount": {"type": "number"}
//!     }
//! }"#;
//!
//! let schema = parse_schema("claims_data.json", json).expect("Failed to parse schema");
//! assert_eq!(schema.required(), ["claim_id".to_string()]);
//! ```

mod document;
mod store;

pub use store::*;

use document::SchemaDocument;
use records_core::{DEFAULT_MAX_DEPTH, Schema, SchemaError};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during schema parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// Unsupported document format
    #[error("Unsupported schema format: {0}")]
    UnsupportedFormat(String),

    /// `type` names a kind outside the supported set
    #[error("Invalid type at '{location}': {reason}")]
    InvalidType { location: String, reason: String },

    /// `pattern` is not a valid regular expression
    #[error("Invalid pattern at '{location}': {reason}")]
    InvalidPattern { location: String, reason: String },

    /// `minimum` is greater than `maximum`
    #[error("Invalid bounds at '{location}': minimum {minimum} exceeds maximum {maximum}")]
    InvalidBounds {
        location: String,
        minimum: f64,
        maximum: f64,
    },

    /// The schema tree is nested deeper than allowed
    #[error("Schema nesting at '{location}' exceeds the maximum depth of {limit}")]
    MaxDepthExceeded { location: String, limit: usize },
}

impl ParserError {
    /// Wraps this error as a load-time [`SchemaError::Parse`].
    pub fn into_schema_error(self, name: &str) -> SchemaError {
        SchemaError::parse(name, self.to_string())
    }
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported schema document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// JSON format (.json, or no extension)
    Json,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Detect the document format from a schema name based on its extension.
///
/// # Supported Extensions
///
/// * `.json` or none → `SchemaFormat::Json`
/// * `.yaml`, `.yml` → `SchemaFormat::Yaml`
/// * `.toml` → `SchemaFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(name: &str) -> Result<SchemaFormat> {
    let Some(extension) = Path::new(name).extension().and_then(|ext| ext.to_str()) else {
        return Ok(SchemaFormat::Json);
    };

    match extension.to_lowercase().as_str() {
        "json" => Ok(SchemaFormat::Json),
        "yaml" | "yml" => Ok(SchemaFormat::Yaml),
        "toml" => Ok(SchemaFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a schema document of a known format into its typed root node.
pub fn parse_document(
    content: &str,
    format: SchemaFormat,
    max_depth: usize,
) -> Result<records_core::FieldSchema> {
    let document: SchemaDocument = match format {
        SchemaFormat::Json => serde_json::from_str(content)?,
        SchemaFormat::Yaml => serde_yaml_ng::from_str(content)?,
        SchemaFormat::Toml => {
            toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?
        }
    };
    document.compile(max_depth)
}

/// Parse a schema with automatic format detection and the default depth limit.
///
/// The format is determined by the extension of `name`.
///
/// # Errors
///
/// Every failure is reported as [`SchemaError::Parse`] naming the schema.
pub fn parse_schema(name: &str, content: &str) -> records_core::Result<Schema> {
    parse_schema_with_depth(name, content, DEFAULT_MAX_DEPTH)
}

/// Parse a schema with automatic format detection and an explicit depth limit.
pub fn parse_schema_with_depth(
    name: &str,
    content: &str,
    max_depth: usize,
) -> records_core::Result<Schema> {
    let root = detect_format(name)
        .and_then(|format| parse_document(content, format, max_depth))
        .map_err(|e| e.into_schema_error(name))?;
    Ok(Schema::new(name, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use records_core::{RecordValue, SchemaType};

    const CLAIMS_JSON: &str = r#"{
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Claims Data",
        "type": "object",
        "required": ["claim_id", "amount"],
        "properties": {
            "claim_id": {"type": "string", "pattern": "^CLM[0-9]{3}$"},
            "claim_date": {"type": "string", "format": "date"},
            "amount": {"type": "number"},
            "status": {"type": "string", "enum": ["pending", "approved"]},
            "diagnosis_codes": {"type": "array", "items": {"type": "string"}}
        },
        "additionalProperties": true
    }"#;

    #[test]
    fn test_parse_valid_json() {
        let schema = parse_schema("claims_data.json", CLAIMS_JSON).expect("Failed to parse JSON");

        assert_eq!(schema.name(), "claims_data.json");
        assert_eq!(schema.title(), Some("Claims Data"));
        assert_eq!(schema.required(), ["claim_id".to_string(), "amount".to_string()]);

        let names: Vec<&str> = schema.properties().keys().map(String::as_str).collect();
        assert_eq!(
            names,
            vec!["claim_id", "claim_date", "amount", "status", "diagnosis_codes"]
        );

        let claim_id = &schema.properties()["claim_id"];
        assert_eq!(claim_id.kind, Some(SchemaType::String));
        assert_eq!(
            claim_id.pattern.as_ref().map(|p| p.as_str()),
            Some("^CLM[0-9]{3}$")
        );

        let status = &schema.properties()["status"];
        assert_eq!(
            status.allowed_values,
            Some(vec![RecordValue::from("pending"), RecordValue::from("approved")])
        );

        let codes = &schema.properties()["diagnosis_codes"];
        assert_eq!(
            codes.items.as_ref().and_then(|items| items.kind),
            Some(SchemaType::String)
        );
    }

    #[test]
    fn test_parse_valid_yaml() {
        let yaml = r#"
type: object
required:
  - patient_id
properties:
  patient_id:
    type: string
  address:
    type: object
    required: [city]
    properties:
      city:
        type: string
"#;

        let schema = parse_schema("patient_record.yaml", yaml).expect("Failed to parse YAML");

        assert_eq!(schema.required(), ["patient_id".to_string()]);
        assert_eq!(schema.properties()["address"].required, vec!["city"]);
    }

    #[test]
    fn test_parse_valid_toml() {
        let toml = r#"
type = "object"
required = ["chart_id"]

[properties.chart_id]
type = "string"

[properties.visit_date]
type = "string"
format = "date"
"#;

        let schema = parse_schema("medical_chart.toml", toml).expect("Failed to parse TOML");

        assert_eq!(schema.required(), ["chart_id".to_string()]);
        assert_eq!(
            schema.properties()["visit_date"].format.as_deref(),
            Some("date")
        );
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse_schema("broken.json", "{ not json").unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_non_object_document_is_parse_error() {
        let err = parse_schema("list.json", "[1, 2, 3]").unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }));
    }

    #[test]
    fn test_unknown_type_is_parse_error() {
        let json = r#"{"properties": {"amount": {"type": "money"}}}"#;
        let err = parse_schema("bad_type.json", json).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("amount"), "unexpected message: {message}");
        assert!(message.contains("money"), "unexpected message: {message}");
    }

    #[test]
    fn test_invalid_pattern_is_parse_error() {
        let json = r#"{"properties": {"zip": {"type": "string", "pattern": "[invalid(regex"}}}"#;
        let err = parse_schema("bad_pattern.json", json).unwrap_err();

        assert!(err.to_string().contains("Invalid pattern at 'zip'"));
    }

    #[test]
    fn test_inverted_bounds_is_parse_error() {
        let json = r#"{"properties": {"age": {"type": "integer", "minimum": 120, "maximum": 0}}}"#;
        assert!(parse_schema("bounds.json", json).is_err());
    }

    #[test]
    fn test_depth_limit() {
        let json = r#"{"properties": {"a": {"properties": {"b": {"properties": {"c": {"type": "string"}}}}}}}"#;

        assert!(parse_schema_with_depth("deep.json", json, 4).is_ok());
        let err = parse_schema_with_depth("deep.json", json, 3).unwrap_err();
        assert!(err.to_string().contains("a.b.c"), "unexpected message: {err}");
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format("claims_data.json").unwrap(), SchemaFormat::Json);
        assert_eq!(detect_format("claims_data").unwrap(), SchemaFormat::Json);
        assert_eq!(detect_format("schema.YML").unwrap(), SchemaFormat::Yaml);
        assert_eq!(detect_format("schema.toml").unwrap(), SchemaFormat::Toml);
        assert!(matches!(
            detect_format("schema.xsd"),
            Err(ParserError::UnsupportedFormat(ext)) if ext == "xsd"
        ));
    }
}
