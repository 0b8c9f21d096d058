//! Persistence of definition edits.

use std::{
    fs,
    path::{Path, PathBuf},
};

use custom_spawners_core::DefinitionField;
use custom_spawners_system_registry::{DefinitionSource, SourceError};
use thiserror::Error;

/// Errors raised while reading or writing the definition document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document could not be read, parsed or serialised.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// The document could not be written back.
    #[error("failed to write definition file `{path}`: {source}")]
    Write {
        /// Destination file.
        path: PathBuf,
        /// Underlying io error.
        source: std::io::Error,
    },
    /// The document has no entry for the definition.
    #[error("definition `{0}` is not present in the stored document")]
    MissingEntry(String),
}

/// Durable home of the definition document.
pub trait DefinitionStore {
    /// Reads the current document.
    fn load(&self) -> Result<DefinitionSource, StoreError>;

    /// Persists a single numeric field of one definition.
    fn save_field(&mut self, id: &str, field: DefinitionField, value: u32)
        -> Result<(), StoreError>;
}

/// Store backed by a TOML file on disk.
#[derive(Clone, Debug)]
pub struct TomlFileStore {
    path: PathBuf,
}

impl TomlFileStore {
    /// Creates a store for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File backing the store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DefinitionStore for TomlFileStore {
    fn load(&self) -> Result<DefinitionSource, StoreError> {
        Ok(DefinitionSource::from_path(&self.path)?)
    }

    fn save_field(
        &mut self,
        id: &str,
        field: DefinitionField,
        value: u32,
    ) -> Result<(), StoreError> {
        let mut source = self.load()?;
        if !source.set_field(id, field, value) {
            return Err(StoreError::MissingEntry(id.to_owned()));
        }
        let text = source.to_toml_string()?;
        fs::write(&self.path, text).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), id, field = field.key(), "saved definition field");
        Ok(())
    }
}

/// Store keeping the document in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    source: DefinitionSource,
}

impl MemoryStore {
    /// Wraps an already parsed document.
    #[must_use]
    pub fn new(source: DefinitionSource) -> Self {
        Self { source }
    }
}

impl DefinitionStore for MemoryStore {
    fn load(&self) -> Result<DefinitionSource, StoreError> {
        Ok(self.source.clone())
    }

    fn save_field(
        &mut self,
        id: &str,
        field: DefinitionField,
        value: u32,
    ) -> Result<(), StoreError> {
        if self.source.set_field(id, field, value) {
            Ok(())
        } else {
            Err(StoreError::MissingEntry(id.to_owned()))
        }
    }
}
