//! Schema store abstraction.
//!
//! A store maps schema names (e.g. `claims_data.json`) to the text of a
//! schema document. Stores are read-only from the validator's point of view;
//! parsing the text is the parser's job.

use crate::Result;

/// Source of schema documents.
///
/// Implementations return [`SchemaError::NotFound`](crate::SchemaError::NotFound)
/// for names they have no entry for.
///
/// # Example
///
/// ```rust
/// use records_core::{Result, SchemaError, SchemaStore};
///
/// struct SingleSchema;
///
/// impl SchemaStore for SingleSchema {
///     fn fetch(&self, name: &str) -> Result<String> {
///         match name {
///             "empty.json" => Ok("{}".to_string()),
///             other => Err(SchemaError::not_found(other)),
///         }
///     }
/// }
///
/// assert!(SingleSchema.fetch("empty.json").is_ok());
/// ```
pub trait SchemaStore: Send + Sync {
    /// Reads the document stored under `name`.
    fn fetch(&self, name: &str) -> Result<String>;

    /// Short description of the store, used in log lines.
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl<S: SchemaStore + ?Sized> SchemaStore for Box<S> {
    fn fetch(&self, name: &str) -> Result<String> {
        (**self).fetch(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: SchemaStore + ?Sized> SchemaStore for std::sync::Arc<S> {
    fn fetch(&self, name: &str) -> Result<String> {
        (**self).fetch(name)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
