//! Schema stores backed by a directory or by memory.

use records_core::{Result, SchemaError, SchemaStore};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// A directory of schema documents, one file per schema name.
///
/// Names are relative file names such as `claims_data.json` or
/// `v2/patient_record.yaml`; names that are absolute or climb out of the
/// directory are rejected.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Creates a store rooted at `root`. The directory is not read until a
    /// schema is fetched.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory schemas are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.trim().is_empty() {
            return Err(SchemaError::invalid_name(name, "name is empty"));
        }

        let relative = Path::new(name);
        for component in relative.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => {
                    return Err(SchemaError::invalid_name(
                        name,
                        "name must not leave the schema directory",
                    ));
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(SchemaError::invalid_name(name, "name must be relative"));
                }
            }
        }

        Ok(self.root.join(relative))
    }
}

impl SchemaStore for DirectoryStore {
    fn fetch(&self, name: &str) -> Result<String> {
        let path = self.resolve(name)?;
        debug!("Reading schema '{}' from {}", name, path.display());

        std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SchemaError::not_found(name),
            _ if path.is_dir() => SchemaError::not_found(name),
            _ => SchemaError::io(name, e),
        })
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

/// An in-memory store mapping schema names to document text.
///
/// # Example
///
/// ```rust
/// use records_core::SchemaStore;
/// use records_parser::MemoryStore;
///
/// let store = MemoryStore::new().with_schema("empty.json", "{}");
/// assert_eq!(store.fetch("empty.json").unwrap(), "{}");
/// assert!(store.fetch("missing.json").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, builder style.
    pub fn with_schema(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    /// Adds or replaces a document.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.documents.insert(name.into(), content.into());
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl SchemaStore for MemoryStore {
    fn fetch(&self, name: &str) -> Result<String> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| SchemaError::not_found(name))
    }

    fn describe(&self) -> String {
        format!("memory store ({} schemas)", self.documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_directory_store_reads_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("claims_data.json"), r#"{"type": "object"}"#).unwrap();

        let store = DirectoryStore::new(dir.path());
        assert_eq!(store.fetch("claims_data.json").unwrap(), r#"{"type": "object"}"#);
    }

    #[test]
    fn test_directory_store_nested_name() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("v2")).unwrap();
        fs::write(dir.path().join("v2").join("chart.json"), "{}").unwrap();

        let store = DirectoryStore::new(dir.path());
        assert_eq!(store.fetch("v2/chart.json").unwrap(), "{}");
    }

    #[test]
    fn test_directory_store_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(dir.path());

        let err = store.fetch("nonexistent.json").unwrap_err();
        assert!(matches!(err, SchemaError::NotFound { name } if name == "nonexistent.json"));
    }

    #[test]
    fn test_directory_store_directory_is_not_a_schema() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        let store = DirectoryStore::new(dir.path());

        assert!(matches!(
            store.fetch("nested").unwrap_err(),
            SchemaError::NotFound { .. }
        ));
    }

    #[test]
    fn test_directory_store_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(dir.path().join("schemas"));

        for name in ["../secrets.json", "a/../../b.json", "/etc/passwd", "", "   "] {
            let err = store.fetch(name).unwrap_err();
            assert!(
                matches!(err, SchemaError::InvalidName { .. }),
                "expected invalid name for {name:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new().with_schema("a.json", "{}");
        store.insert("b.yaml", "type: object");

        assert_eq!(store.len(), 2);
        assert_eq!(store.fetch("b.yaml").unwrap(), "type: object");
        assert!(matches!(
            store.fetch("c.json").unwrap_err(),
            SchemaError::NotFound { .. }
        ));
    }
}
