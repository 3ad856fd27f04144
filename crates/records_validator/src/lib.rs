//! Schema-driven record validation.
//!
//! This crate checks records against the schemas parsed by
//! `records_parser`, producing reports that list every violation found.
//!
//! # Validation Types
//!
//! - **Required fields**: every `required` list, at every nesting level
//! - **Types**: declared `type` against the value's kind (`number` accepts
//!   integers and floats)
//! - **Formats**: `pattern` plus the named `date`, `date-time`, `email` and
//!   registered custom formats
//! - **Constraints**: `enum`, `minimum` and `maximum`
//!
//! # Example
//!
//! ```rust
//! use records_core::RecordValue;
//! use records_parser::MemoryStore;
//! use records_validator::{Validator, ValidatorConfig};
//!
//! let store = MemoryStore::new().with_schema(
//!     "claims_data.json",
//!     r#"{"required": ["claim_id", "amount"], "properties": {"amount": {"type": "number"}}}"#,
//! );
//! let validator = Validator::with_store(store, ValidatorConfig::default());
//!
//! let record = RecordValue::from(serde_json::json!({"claim_id": "CLM001"}));
//! let missing = validator.validate_required_fields(&record, "claims_data.json").unwrap();
//! assert_eq!(missing.errors, vec!["amount".to_string()]);
//! ```

mod cache;
mod config;
mod constraints;
mod engine;
mod error;
mod format;
mod required;
mod types;
pub mod walk;

pub use cache::SchemaCache;
pub use config::{
    DEFAULT_SCHEMA_DIR, MAX_DEPTH_ENV, SCHEMA_DIR_ENV, ValidatorConfig, ValidatorConfigBuilder,
};
pub use constraints::ConstraintValidator;
pub use engine::Validator;
pub use error::{ConfigError, WalkError};
pub use format::{FormatRegistry, FormatRule, FormatValidator};
pub use required::RequiredFieldValidator;
pub use types::TypeValidator;
pub use walk::NodeCheck;
