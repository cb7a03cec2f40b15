use std::path::Path;

use indexmap::IndexMap;

use crate::{ParameterSet, TreeError, read_schema_name};

/// Builds the default tree of one schema.
pub type DefaultFactory = fn() -> ParameterSet;

/// Schema name to default-tree factory.
///
/// Lets a loader pick the right schema for a saved document before reading it.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    factories: IndexMap<String, DefaultFactory>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: impl Into<String>, factory: DefaultFactory) -> &mut Self {
        self.factories.insert(name.into(), factory);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn make_default(&self, name: &str) -> Option<ParameterSet> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Reads the document at `path` into the default tree of the schema it
    /// names.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(String, ParameterSet), TreeError> {
        let path = path.as_ref();
        let name = read_schema_name(path)?;
        let Some(mut tree) = name.as_deref().and_then(|n| self.make_default(n)) else {
            return Err(TreeError::UnknownSchema { name });
        };
        tree.read_from_file(path)?;
        Ok((name.unwrap_or_default(), tree))
    }
}
