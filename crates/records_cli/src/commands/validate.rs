use anyhow::{Context, Result};
use records_core::{RecordValue, ValidationReport};
use records_validator::{Validator, ValidatorConfig};
use serde::Serialize;
use std::fmt::Display;
use std::path::Path;
use tracing::info;

use crate::{CheckKind, OutputFormat, output};

pub fn execute(
    config: ValidatorConfig,
    record_path: &Path,
    schema_name: &str,
    check: CheckKind,
    format: OutputFormat,
) -> Result<()> {
    info!("Validating record: {}", record_path.display());
    info!("Schema: {} (check: {:?})", schema_name, check);

    let content = std::fs::read_to_string(record_path)
        .with_context(|| format!("Failed to read record file: {}", record_path.display()))?;
    let record = RecordValue::from_json_str(&content)
        .with_context(|| format!("Record file is not valid JSON: {}", record_path.display()))?;

    let validator = Validator::new(config);
    validator
        .load(schema_name)
        .with_context(|| format!("Failed to load schema '{}'", schema_name))?;

    let report = match check {
        CheckKind::All => return finish(&validator.validate_data(&record, schema_name), format),
        CheckKind::Required => validator
            .validate_required_fields(&record, schema_name)
            .map(|report| report.map_errors(|field| format!("missing required field '{field}'"))),
        CheckKind::Types => validator.validate_data_types(&record, schema_name),
        CheckKind::Format => validator.validate_format(&record, schema_name),
        CheckKind::Constraints => validator.validate_constraints(&record, schema_name),
    }
    .with_context(|| format!("Failed to run {:?} check", check))?;

    finish(&report, format)
}

/// Prints the report and exits with status 1 if it failed.
fn finish<E: Display + Serialize>(report: &ValidationReport<E>, format: OutputFormat) -> Result<()> {
    output::print_validation_report(report, format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}
