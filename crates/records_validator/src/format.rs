//! Named formats and pattern checks.
//!
//! Built-in formats:
//! - `date`: `YYYY-MM-DD` naming a real calendar day
//! - `date-time`: RFC 3339 timestamp
//! - `email`: `local@domain.tld`
//!
//! Further formats can be registered as regular expressions.

use crate::walk::NodeCheck;
use chrono::{DateTime, NaiveDate};
use records_core::{FieldSchema, Pattern, RecordValue, ValidationError};
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

const DATE_SHAPE: &str = r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$";
const EMAIL_SHAPE: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// A compiled rule behind a format name.
#[derive(Debug, Clone)]
pub enum FormatRule {
    /// Calendar date in `YYYY-MM-DD` form
    Date(Regex),
    /// RFC 3339 timestamp
    DateTime,
    /// Email address
    Email(Regex),
    /// User-registered pattern, matched start-anchored like schema patterns
    Custom { name: String, pattern: Pattern },
}

impl FormatRule {
    /// Returns true if `text` satisfies the rule.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            FormatRule::Date(shape) => {
                shape.is_match(text) && NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
            }
            FormatRule::DateTime => DateTime::parse_from_rfc3339(text).is_ok(),
            FormatRule::Email(shape) => shape.is_match(text),
            FormatRule::Custom { pattern, .. } => pattern.is_match(text),
        }
    }

    /// Message for a value that does not satisfy the rule.
    pub fn failure_message(&self, text: &str) -> String {
        match self {
            FormatRule::Date(_) => format!("expected YYYY-MM-DD, got '{text}'"),
            FormatRule::DateTime => format!("expected RFC 3339 date-time, got '{text}'"),
            FormatRule::Email(_) => format!("invalid email format '{text}'"),
            FormatRule::Custom { name, pattern } => {
                format!("value '{text}' is not a valid {name} (pattern '{pattern}')")
            }
        }
    }
}

/// Registry of named formats.
///
/// # Example
///
/// ```rust
/// use records_validator::FormatRegistry;
///
/// let mut formats = FormatRegistry::new();
/// formats.register_pattern("npi", r"[0-9]{10}$").unwrap();
///
/// assert!(formats.get("npi").unwrap().matches("1234567890"));
/// assert!(!formats.get("date").unwrap().matches("2024-15-01"));
/// ```
#[derive(Debug, Clone)]
pub struct FormatRegistry {
    rules: BTreeMap<String, FormatRule>,
}

impl FormatRegistry {
    /// Creates a registry holding the built-in formats.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("date", FormatRule::Date(builtin_regex(DATE_SHAPE)));
        registry.register("date-time", FormatRule::DateTime);
        registry.register("email", FormatRule::Email(builtin_regex(EMAIL_SHAPE)));
        registry
    }

    /// Creates a registry with no formats at all.
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// Adds or replaces a format.
    pub fn register(&mut self, name: impl Into<String>, rule: FormatRule) {
        self.rules.insert(name.into(), rule);
    }

    /// Compiles `pattern` and registers it under `name`.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn register_pattern(&mut self, name: &str, pattern: &str) -> Result<(), regex::Error> {
        let pattern = Pattern::new(pattern)?;
        self.register(
            name,
            FormatRule::Custom {
                name: name.to_string(),
                pattern,
            },
        );
        Ok(())
    }

    /// Looks up a format by name.
    pub fn get(&self, name: &str) -> Option<&FormatRule> {
        self.rules.get(name)
    }

    /// Registered format names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// The built-in expressions are constants known to compile.
fn builtin_regex(source: &str) -> Regex {
    match Regex::new(source) {
        Ok(regex) => regex,
        Err(e) => unreachable!("built-in format expression {source} is invalid: {e}"),
    }
}

/// Checks `pattern` and `format` keywords against each visited value's
/// string form. Null values have the string form `null` and are checked too.
#[derive(Debug, Clone, Copy)]
pub struct FormatValidator<'a> {
    registry: &'a FormatRegistry,
}

impl<'a> FormatValidator<'a> {
    /// Creates a validator resolving format names through `registry`.
    pub fn new(registry: &'a FormatRegistry) -> Self {
        Self { registry }
    }
}

impl NodeCheck for FormatValidator<'_> {
    fn visit(
        &self,
        value: &RecordValue,
        schema: &FieldSchema,
        path: &str,
        errors: &mut Vec<ValidationError>,
    ) {
        if schema.pattern.is_none() && schema.format.is_none() {
            return;
        }
        let text = value.string_form();

        if let Some(pattern) = &schema.pattern {
            if !pattern.is_match(&text) {
                errors.push(ValidationError::pattern_mismatch(path, &text, pattern.as_str()));
            }
        }

        if let Some(format) = &schema.format {
            match self.registry.get(format) {
                Some(rule) if !rule.matches(&text) => {
                    errors.push(ValidationError::format(path, rule.failure_message(&text)));
                }
                Some(_) => {}
                None => debug!("Unknown format '{}' at '{}', skipping", format, path),
            }
        }
    }
}
