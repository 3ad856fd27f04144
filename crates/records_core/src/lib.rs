//! # Records Core
//!
//! Core data structures and types for the record schema validator.
//!
//! This crate provides the building blocks shared by the parser, the validator
//! and the CLI. A schema declares the shape a record must have: which fields
//! are required, which type each field carries, and which formats or patterns
//! its string form must follow.
//!
//! ## Key Concepts
//!
//! - **Schema**: a named, parsed tree of [`FieldSchema`] nodes
//! - **Record**: the untyped data under test, represented as [`RecordValue`]
//! - **ValidationError**: one path-qualified nonconformance
//! - **SchemaStore**: where schema documents come from
//!
//! ## Example
//!
//! ```rust
//! use records_core::{FieldSchemaBuilder, RecordValue, Schema, SchemaType};
//!
//! let root = FieldSchemaBuilder::object()
//!     .property("claim_id", FieldSchemaBuilder::new(SchemaType::String).build())
//!     .property("amount", FieldSchemaBuilder::new(SchemaType::Number).build())
//!     .required("claim_id")
//!     .build();
//! let schema = Schema::new("claims_data.json", root);
//!
//! let record = RecordValue::from(serde_json::json!({"claim_id": "CLM001", "amount": 1500.0}));
//! assert_eq!(schema.required(), ["claim_id".to_string()]);
//! assert!(record.get("amount").is_some_and(RecordValue::is_number));
//! ```

pub mod builder;
pub mod error;
pub mod report;
pub mod schema;
pub mod store;
pub mod value;

pub use builder::*;
pub use error::*;
pub use report::*;
pub use schema::*;
pub use store::*;
pub use value::*;
