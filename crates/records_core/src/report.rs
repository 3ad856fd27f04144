//! Validation report types.
//!
//! Every validation check answers with a [`ValidationReport`]: a verdict plus
//! the complete list of problems found. Non-conformance is an ordinary
//! outcome, so it is represented as data rather than as an `Err`.

use crate::ValidationError;
use serde::Serialize;

/// Report of validation results.
///
/// `E` is the error item: [`ValidationError`] for the full check, plain
/// strings for the granular checks (missing field names or messages).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport<E = ValidationError> {
    /// Whether validation passed overall
    pub passed: bool,

    /// Every problem found, in discovery order
    pub errors: Vec<E>,

    /// Validation statistics
    pub stats: ValidationStats,
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    /// Number of record fields inspected
    pub fields_checked: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

impl<E> ValidationReport<E> {
    /// Creates a new successful validation report.
    pub fn success() -> Self {
        Self {
            passed: true,
            errors: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Creates a report that failed with a single error.
    pub fn failure(error: E) -> Self {
        Self::from_errors(vec![error])
    }

    /// Creates a report whose verdict follows from the error list.
    pub fn from_errors(errors: Vec<E>) -> Self {
        Self {
            passed: errors.is_empty(),
            errors,
            stats: ValidationStats::default(),
        }
    }

    /// Sets the statistics.
    pub fn with_stats(mut self, stats: ValidationStats) -> Self {
        self.stats = stats;
        self
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: E) {
        self.errors.push(error);
        self.passed = false;
    }

    /// Appends all errors of another report, keeping the earlier ones first.
    pub fn merge(&mut self, other: ValidationReport<E>) {
        self.passed &= other.passed;
        self.errors.extend(other.errors);
        self.stats.fields_checked += other.stats.fields_checked;
        self.stats.duration_ms += other.stats.duration_ms;
    }

    /// Converts every error item, preserving verdict and statistics.
    pub fn map_errors<U>(self, f: impl FnMut(E) -> U) -> ValidationReport<U> {
        ValidationReport {
            passed: self.passed,
            errors: self.errors.into_iter().map(f).collect(),
            stats: self.stats,
        }
    }

    /// Splits the report into its verdict and error list.
    pub fn into_parts(self) -> (bool, Vec<E>) {
        (self.passed, self.errors)
    }
}

impl ValidationReport<ValidationError> {
    /// Renders every error as a display string.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl<E> Default for ValidationReport<E> {
    fn default() -> Self {
        Self::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_verdict_follows_errors() {
        assert!(ValidationReport::<String>::from_errors(Vec::new()).passed);
        assert!(!ValidationReport::from_errors(vec!["provider_id".to_string()]).passed);
    }

    #[test]
    fn test_add_error_fails_report() {
        let mut report = ValidationReport::success();
        report.add_error(ValidationError::missing_field("status", "status"));

        assert!(!report.passed);
        assert_eq!(report.messages(), vec!["Missing required field at status: 'status' is required"]);
    }

    #[test]
    fn test_merge_keeps_order_and_verdict() {
        let mut report = ValidationReport::from_errors(vec!["a"]);
        report.merge(ValidationReport::success());
        report.merge(ValidationReport::from_errors(vec!["b"]));

        assert!(!report.passed);
        assert_eq!(report.errors, vec!["a", "b"]);
    }

    #[test]
    fn test_map_errors() {
        let report = ValidationReport::failure(ValidationError::internal("", "boom"))
            .map_errors(|e| e.to_string());

        let (passed, errors) = report.into_parts();
        assert!(!passed);
        assert_eq!(errors, vec!["Unexpected error at <root>: boom"]);
    }
}
