//! Main validation engine.
//!
//! [`Validator`] loads schemas through its cache and runs the individual
//! checks over a record. The full check is the union of the granular ones,
//! run in a fixed order: required fields, types, formats, constraints.

use crate::walk::{NodeCheck, walk};
use crate::{
    ConfigError, ConstraintValidator, FormatRegistry, FormatValidator, RequiredFieldValidator,
    SchemaCache, TypeValidator, ValidatorConfig,
};
use records_core::{
    FieldSchema, RecordValue, Result, Schema, SchemaStore, SchemaType, ValidationError,
    ValidationReport, ValidationStats,
};
use records_parser::DirectoryStore;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Validates records against named schemas.
///
/// # Example
///
/// ```rust
/// use records_core::RecordValue;
/// use records_parser::MemoryStore;
/// use records_validator::{Validator, ValidatorConfig};
///
/// let store = MemoryStore::new().with_schema(
///     "claims_data.json",
///     r#"{"type": "object", "required": ["claim_id"], "properties": {"amount": {"type": "number"}}}"#,
/// );
/// let validator = Validator::with_store(store, ValidatorConfig::default());
///
/// let record = RecordValue::from(serde_json::json!({"amount": "1500"}));
/// let report = validator.validate_data(&record, "claims_data.json");
///
/// assert!(!report.passed);
/// for error in &report.errors {
///     println!("Error: {}", error);
/// }
/// ```
#[derive(Debug)]
pub struct Validator {
    cache: SchemaCache,
    formats: FormatRegistry,
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator reading schemas from `config.schema_dir`.
    pub fn new(config: ValidatorConfig) -> Self {
        let store = DirectoryStore::new(config.schema_dir.clone());
        Self::with_store(store, config)
    }

    /// Creates a validator reading schemas from `store`.
    pub fn with_store(store: impl SchemaStore + 'static, config: ValidatorConfig) -> Self {
        Self {
            cache: SchemaCache::new(store, config.max_depth),
            formats: FormatRegistry::new(),
            config,
        }
    }

    /// Creates a validator configured from the environment.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Ok(Self::new(ValidatorConfig::from_env()?))
    }

    /// Replaces the format registry.
    pub fn with_formats(mut self, formats: FormatRegistry) -> Self {
        self.formats = formats;
        self
    }

    /// Registers a custom format as a regular expression.
    pub fn register_format(&mut self, name: &str, pattern: &str) -> std::result::Result<(), regex::Error> {
        self.formats.register_pattern(name, pattern)
    }

    /// Active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Schema cache.
    pub fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Named formats known to this validator.
    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    /// Loads a schema through the cache.
    pub fn load(&self, name: &str) -> Result<Arc<Schema>> {
        self.cache.load(name)
    }

    /// Runs every check on `record` and collects all violations.
    ///
    /// Never fails: a schema that cannot be loaded is reported as a single
    /// internal error.
    pub fn validate_data(&self, record: &RecordValue, schema_name: &str) -> ValidationReport {
        let start = Instant::now();
        match self.load(schema_name) {
            Ok(schema) => self.validate_schema(record, &schema),
            Err(e) => {
                warn!("Cannot validate against '{}': {}", schema_name, e);
                let error = ValidationError::internal("", e.to_string());
                let stats = ValidationStats {
                    fields_checked: 0,
                    duration_ms: elapsed_ms(start),
                };
                ValidationReport::failure(error).with_stats(stats)
            }
        }
    }

    /// Runs every check on `record` against an already loaded schema.
    pub fn validate_schema(&self, record: &RecordValue, schema: &Schema) -> ValidationReport {
        let start = Instant::now();
        debug!("Validating record against '{}'", schema.name());

        if schema.root().expects_object() && !matches!(record, RecordValue::Object(_)) {
            let error = root_mismatch(record);
            return ValidationReport::failure(error).with_stats(finished(0, start));
        }

        let formats = FormatValidator::new(&self.formats);
        let checks: [&dyn NodeCheck; 4] = [
            &RequiredFieldValidator,
            &TypeValidator,
            &formats,
            &ConstraintValidator,
        ];

        let mut errors = Vec::new();
        let mut fields_checked = 0;
        for check in checks {
            match walk(record, schema.root(), self.config.max_depth, check) {
                Ok(report) => {
                    fields_checked = report.stats.fields_checked;
                    errors.extend(report.errors);
                }
                Err(e) => {
                    warn!("Validation against '{}' stopped: {}", schema.name(), e);
                    return ValidationReport::failure(e.into_validation_error())
                        .with_stats(finished(fields_checked, start));
                }
            }
        }

        debug!(
            "Record checked against '{}': {} errors in {} fields",
            schema.name(),
            errors.len(),
            fields_checked
        );
        ValidationReport::from_errors(errors).with_stats(finished(fields_checked, start))
    }

    /// Reports which of the schema's top-level required fields `record`
    /// lacks, in declared order.
    ///
    /// # Errors
    ///
    /// Fails if the schema cannot be loaded.
    pub fn validate_required_fields(
        &self,
        record: &RecordValue,
        schema_name: &str,
    ) -> Result<ValidationReport<String>> {
        let start = Instant::now();
        let schema = self.load(schema_name)?;

        let missing = RequiredFieldValidator::new().missing_fields(record, schema.root());
        let stats = finished(schema.required().len(), start);
        Ok(ValidationReport::from_errors(missing).with_stats(stats))
    }

    /// Checks declared types over the whole record.
    ///
    /// # Errors
    ///
    /// Fails if the schema cannot be loaded.
    pub fn validate_data_types(
        &self,
        record: &RecordValue,
        schema_name: &str,
    ) -> Result<ValidationReport<String>> {
        let schema = self.load(schema_name)?;
        Ok(self.run_check(record, schema.root(), &TypeValidator))
    }

    /// Checks `pattern` and `format` keywords over the whole record.
    ///
    /// # Errors
    ///
    /// Fails if the schema cannot be loaded.
    pub fn validate_format(
        &self,
        record: &RecordValue,
        schema_name: &str,
    ) -> Result<ValidationReport<String>> {
        let schema = self.load(schema_name)?;
        Ok(self.run_check(record, schema.root(), &FormatValidator::new(&self.formats)))
    }

    /// Checks `enum`, `minimum` and `maximum` over the whole record.
    ///
    /// # Errors
    ///
    /// Fails if the schema cannot be loaded.
    pub fn validate_constraints(
        &self,
        record: &RecordValue,
        schema_name: &str,
    ) -> Result<ValidationReport<String>> {
        let schema = self.load(schema_name)?;
        Ok(self.run_check(record, schema.root(), &ConstraintValidator))
    }

    /// Walks one check and renders its errors as strings.
    fn run_check(
        &self,
        record: &RecordValue,
        root: &FieldSchema,
        check: &dyn NodeCheck,
    ) -> ValidationReport<String> {
        let start = Instant::now();

        if root.expects_object() && !matches!(record, RecordValue::Object(_)) {
            return ValidationReport::failure(root_mismatch(record).to_string())
                .with_stats(finished(0, start));
        }

        let report = match walk(record, root, self.config.max_depth, check) {
            Ok(report) => report,
            Err(e) => {
                warn!("Validation stopped: {}", e);
                ValidationReport::failure(e.into_validation_error())
            }
        };
        let fields_checked = report.stats.fields_checked;
        report
            .map_errors(|e| e.to_string())
            .with_stats(finished(fields_checked, start))
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

fn root_mismatch(record: &RecordValue) -> ValidationError {
    ValidationError::type_mismatch("", SchemaType::Object.expected_label(), record.kind_name())
}

fn finished(fields_checked: usize, start: Instant) -> ValidationStats {
    ValidationStats {
        fields_checked,
        duration_ms: elapsed_ms(start),
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
