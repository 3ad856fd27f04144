use anyhow::{Context, Result};
use records_core::FieldSchema;
use records_validator::{Validator, ValidatorConfig};
use serde::Serialize;
use tracing::info;

use crate::{OutputFormat, output};

#[derive(Serialize)]
struct SchemaSummary<'a> {
    name: &'a str,
    title: Option<&'a str>,
    description: Option<&'a str>,
    required: &'a [String],
    properties: Vec<PropertySummary<'a>>,
    depth: usize,
}

#[derive(Serialize)]
struct PropertySummary<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    format: Option<&'a str>,
    pattern: Option<&'a str>,
    constrained: bool,
}

impl<'a> PropertySummary<'a> {
    fn new(name: &'a str, field: &'a FieldSchema) -> Self {
        Self {
            name,
            kind: field.kind.map_or("any", |kind| kind.as_str()),
            format: field.format.as_deref(),
            pattern: field.pattern.as_ref().map(|p| p.as_str()),
            constrained: field.has_constraints(),
        }
    }
}

pub fn execute(config: ValidatorConfig, schema_name: &str, format: OutputFormat) -> Result<()> {
    info!("Checking schema: {}", schema_name);

    let validator = Validator::new(config);
    let schema = validator
        .load(schema_name)
        .with_context(|| format!("Failed to load schema '{}'", schema_name))?;

    let summary = SchemaSummary {
        name: schema.name(),
        title: schema.title(),
        description: schema.root().description.as_deref(),
        required: schema.required(),
        properties: schema
            .properties()
            .iter()
            .map(|(name, field)| PropertySummary::new(name, field))
            .collect(),
        depth: schema.root().depth(),
    };

    if format == OutputFormat::Json {
        return output::print_json(&summary);
    }

    output::print_success("Schema is valid");

    println!("\nSchema Summary:");
    println!("  Name:        {}", summary.name);
    println!("  Title:       {}", summary.title.unwrap_or("N/A"));
    println!("  Description: {}", summary.description.unwrap_or("N/A"));
    println!("  Required:    {}", summary.required.join(", "));
    println!("  Properties:  {}", summary.properties.len());
    println!("  Depth:       {}", summary.depth);

    if !summary.properties.is_empty() {
        println!("\nProperties:");
        for property in &summary.properties {
            let mut details = Vec::new();
            if let Some(format) = property.format {
                details.push(format!("format {format}"));
            }
            if let Some(pattern) = property.pattern {
                details.push(format!("pattern {pattern}"));
            }
            if property.constrained {
                details.push("constrained".to_string());
            }
            if details.is_empty() {
                println!("  {:<28} {}", property.name, property.kind);
            } else {
                println!(
                    "  {:<28} {} ({})",
                    property.name,
                    property.kind,
                    details.join(", ")
                );
            }
        }
    }

    Ok(())
}
