//! Schema cache.
//!
//! Schemas are read from a [`SchemaStore`] once, parsed, and kept for the
//! lifetime of the cache. There is no eviction.

use records_core::{Result, Schema, SchemaStore};
use records_parser::parse_schema_with_depth;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

/// Parsed schemas keyed by name, in front of a store.
pub struct SchemaCache {
    store: Box<dyn SchemaStore>,
    schemas: RwLock<HashMap<String, Arc<Schema>>>,
    max_depth: usize,
}

impl SchemaCache {
    /// Creates an empty cache over `store`, parsing with the given depth limit.
    pub fn new(store: impl SchemaStore + 'static, max_depth: usize) -> Self {
        Self {
            store: Box::new(store),
            schemas: RwLock::new(HashMap::new()),
            max_depth,
        }
    }

    /// Returns the schema named `name`, reading and parsing it on first use.
    ///
    /// Concurrent first loads of one name parse it once. Failed loads are not
    /// cached, so a later call retries the store.
    ///
    /// A miss holds the write lock while the store is read and the document
    /// parsed, so lookups of other names wait for a slow first load.
    ///
    /// # Errors
    ///
    /// Propagates the store's error (`NotFound`, `InvalidName`, `Io`) or the
    /// parser's `Parse` error.
    pub fn load(&self, name: &str) -> Result<Arc<Schema>> {
        {
            let schemas = self.schemas.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(schema) = schemas.get(name) {
                debug!("Schema cache hit for '{}'", name);
                return Ok(Arc::clone(schema));
            }
        }

        let mut schemas = self.schemas.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(schema) = schemas.get(name) {
            debug!("Schema '{}' was loaded while waiting for the cache lock", name);
            return Ok(Arc::clone(schema));
        }

        debug!("Schema cache miss for '{}', reading from {}", name, self.store.describe());
        let content = self.store.fetch(name)?;
        let schema = Arc::new(parse_schema_with_depth(name, &content, self.max_depth)?);
        info!(
            "Loaded schema '{}' ({} properties, {} required)",
            name,
            schema.properties().len(),
            schema.required().len()
        );

        schemas.insert(name.to_string(), Arc::clone(&schema));
        Ok(schema)
    }

    /// Loads every schema in `names`, stopping at the first failure.
    pub fn preload<I, S>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.load(name.as_ref())?;
        }
        Ok(())
    }

    /// Returns true if `name` has been loaded.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the cached schemas, sorted.
    pub fn cached_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .schemas
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Depth limit applied when parsing.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl std::fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaCache")
            .field("store", &self.store.describe())
            .field("cached", &self.cached_names())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
