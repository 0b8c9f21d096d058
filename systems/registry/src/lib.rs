#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Registry of named spawner definitions loaded from the TOML definition source.
//!
//! Loading never fails as a whole: entries that cannot be parsed are skipped
//! and reported through a [`LoadReport`], while every valid entry is
//! available through case-insensitive lookup.

mod source;

use std::collections::BTreeMap;

use custom_spawners_core::{BoundsError, DefinitionField, SpawnerDefinition};
use thiserror::Error;

pub use source::{DefinitionError, DefinitionSource, SourceError};

/// Errors produced by administrative edits of the registry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No definition is registered under the identifier.
    #[error("unknown spawner definition `{0}`")]
    UnknownDefinition(String),
    /// The edit would invert a min/max pair.
    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// Outcome of loading a definition source.
#[derive(Debug, Default)]
pub struct LoadReport {
    loaded: usize,
    skipped: Vec<DefinitionError>,
    missing_table: bool,
}

impl LoadReport {
    /// Number of definitions that entered the registry.
    #[must_use]
    pub const fn loaded(&self) -> usize {
        self.loaded
    }

    /// Entries that were skipped, with the reason.
    #[must_use]
    pub fn skipped(&self) -> &[DefinitionError] {
        &self.skipped
    }

    /// Reports whether the source had no `spawners` table at all.
    #[must_use]
    pub const fn missing_table(&self) -> bool {
        self.missing_table
    }
}

/// Case-insensitive table of spawner definitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    definitions: BTreeMap<String, SpawnerDefinition>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from the provided source, skipping invalid entries.
    #[must_use]
    pub fn load(source: &DefinitionSource) -> (Self, LoadReport) {
        let mut registry = Self::new();
        let mut report = LoadReport {
            missing_table: !source.has_spawners(),
            ..LoadReport::default()
        };

        if report.missing_table {
            tracing::warn!("definition source has no `spawners` table; registry is empty");
        }

        for entry in source.definitions() {
            match entry {
                Ok(definition) => {
                    let key = definition.id().to_ascii_lowercase();
                    if let Some(previous) = registry.definitions.insert(key, definition) {
                        tracing::warn!(
                            id = previous.id(),
                            "duplicate spawner id differing only by case; later entry wins"
                        );
                    } else {
                        report.loaded += 1;
                    }
                }
                Err(error) => {
                    tracing::warn!(id = error.id(), %error, "skipping spawner definition");
                    report.skipped.push(error);
                }
            }
        }

        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped.len(),
            "loaded spawner definitions"
        );
        (registry, report)
    }

    /// Rebuilds the registry from `source` and replaces the current contents in one step.
    pub fn reload(&mut self, source: &DefinitionSource) -> LoadReport {
        let (fresh, report) = Self::load(source);
        *self = fresh;
        report
    }

    /// Looks up a definition, ignoring ASCII case.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&SpawnerDefinition> {
        self.definitions.get(&id.to_ascii_lowercase())
    }

    /// Rewrites one numeric field of a definition.
    pub fn update_field(
        &mut self,
        id: &str,
        field: DefinitionField,
        value: u32,
    ) -> Result<&SpawnerDefinition, RegistryError> {
        let definition = self
            .definitions
            .get_mut(&id.to_ascii_lowercase())
            .ok_or_else(|| RegistryError::UnknownDefinition(id.to_owned()))?;
        definition.set_field(field, value)?;
        tracing::info!(id = definition.id(), field = field.key(), value, "updated spawner field");
        Ok(&*definition)
    }

    /// Iterates over all definitions in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &SpawnerDefinition> {
        self.definitions.values()
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Reports whether the registry holds no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
