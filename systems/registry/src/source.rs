//! TOML definition document and per-entry parsing.

use std::{fs, path::Path};

use custom_spawners_core::{
    BoundsError, CreatureKind, Cosmetics, DefinitionField, EntityKind, MobTag, SpawnBounds,
    SpawnerDefinition, UnknownCreature,
};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use toml::{Table, Value};

const SPAWNERS_KEY: &str = "spawners";
const DEFAULT_MATERIAL: &str = "SPAWNER";
const DEFAULT_ENTITY_TYPE: &str = "PIG";
const DEFAULT_DELAY: u32 = 200;
const DEFAULT_REQUIRED_PLAYER_RANGE: u32 = 16;
const DEFAULT_MIN_RADIUS: u32 = 0;
const DEFAULT_MIN_AMOUNT: u32 = 1;

/// Failures that prevent the whole document from being read.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file could not be read or written.
    #[error("failed to access definition file: {0}")]
    Io(#[from] std::io::Error),
    /// The document is not valid TOML.
    #[error("failed to parse definition document: {0}")]
    Parse(#[from] toml::de::Error),
    /// The document could not be serialised back to TOML.
    #[error("failed to serialise definition document: {0}")]
    Serialise(#[from] toml::ser::Error),
    /// A settings table exists but does not match the expected shape.
    #[error("invalid `{table}` table: {source}")]
    Settings {
        /// Name of the offending table.
        table: String,
        /// Underlying deserialisation error.
        source: toml::de::Error,
    },
}

/// Reasons a single definition entry was skipped.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The entry is not a table.
    #[error("spawner `{id}` is not a table")]
    NotATable {
        /// Entry identifier.
        id: String,
    },
    /// A field has the wrong type or a negative value.
    #[error("spawner `{id}` is malformed: {source}")]
    Malformed {
        /// Entry identifier.
        id: String,
        /// Underlying deserialisation error.
        source: toml::de::Error,
    },
    /// The entity type is not a known creature.
    #[error("spawner `{id}` has an invalid entity-type: {source}")]
    UnknownEntity {
        /// Entry identifier.
        id: String,
        /// Underlying parse error.
        source: UnknownCreature,
    },
    /// A min/max pair is inverted.
    #[error("spawner `{id}` has an invalid range: {source}")]
    InvalidBounds {
        /// Entry identifier.
        id: String,
        /// Underlying bounds error.
        source: BoundsError,
    },
}

impl DefinitionError {
    /// Identifier of the skipped entry.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::NotATable { id }
            | Self::Malformed { id, .. }
            | Self::UnknownEntity { id, .. }
            | Self::InvalidBounds { id, .. } => id,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawDefinition {
    material: Option<String>,
    display_name: Option<String>,
    #[serde(default)]
    lore: Vec<String>,
    entity_type: Option<String>,
    mythic_mob_type: Option<String>,
    delay: Option<u32>,
    required_player_range: Option<u32>,
    min_radius: Option<u32>,
    max_radius: Option<u32>,
    min_amount: Option<u32>,
    max_amount: Option<u32>,
}

/// Parsed definition document.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DefinitionSource {
    document: Table,
}

impl DefinitionSource {
    /// Parses a document from TOML text.
    pub fn parse(text: &str) -> Result<Self, SourceError> {
        let document = text.parse::<Table>()?;
        Ok(Self { document })
    }

    /// Reads and parses the document at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Serialises the document back to TOML.
    pub fn to_toml_string(&self) -> Result<String, SourceError> {
        Ok(toml::to_string_pretty(&self.document)?)
    }

    /// Deserialises an auxiliary top-level table, falling back to defaults when it is absent.
    pub fn section<T>(&self, table: &str) -> Result<T, SourceError>
    where
        T: DeserializeOwned + Default,
    {
        match self.document.get(table) {
            None => Ok(T::default()),
            Some(value) => value.clone().try_into().map_err(|source| SourceError::Settings {
                table: table.to_owned(),
                source,
            }),
        }
    }

    /// Reports whether the document contains a `spawners` table.
    #[must_use]
    pub fn has_spawners(&self) -> bool {
        matches!(self.document.get(SPAWNERS_KEY), Some(Value::Table(_)))
    }

    /// Parses every entry of the `spawners` table, keeping failures separate.
    pub(crate) fn definitions(&self) -> Vec<Result<SpawnerDefinition, DefinitionError>> {
        let Some(Value::Table(entries)) = self.document.get(SPAWNERS_KEY) else {
            return Vec::new();
        };
        entries
            .iter()
            .map(|(id, value)| parse_definition(id, value))
            .collect()
    }

    /// Writes one numeric field of a definition entry. Returns `false` when the entry is absent.
    ///
    /// Writing a minimum whose maximum is implicit first pins the maximum at the
    /// value it was derived to, so the rewritten entry keeps every other field.
    pub fn set_field(&mut self, id: &str, field: DefinitionField, value: u32) -> bool {
        let Some(Value::Table(entries)) = self.document.get_mut(SPAWNERS_KEY) else {
            return false;
        };
        let Some(Value::Table(entry)) = entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(id))
            .map(|(_, entry)| entry)
        else {
            return false;
        };
        let implicit = match field {
            DefinitionField::MinRadius => Some((DefinitionField::MaxRadius, DEFAULT_MIN_RADIUS)),
            DefinitionField::MinAmount => Some((DefinitionField::MaxAmount, DEFAULT_MIN_AMOUNT)),
            _ => None,
        };
        if let Some((max_field, default)) = implicit {
            if !entry.contains_key(max_field.key()) {
                let derived = entry
                    .get(field.key())
                    .cloned()
                    .unwrap_or_else(|| Value::Integer(i64::from(default)));
                let _ = entry.insert(max_field.key().to_owned(), derived);
            }
        }
        let _ = entry.insert(field.key().to_owned(), Value::Integer(i64::from(value)));
        true
    }
}

fn parse_definition(id: &str, value: &Value) -> Result<SpawnerDefinition, DefinitionError> {
    if !value.is_table() {
        return Err(DefinitionError::NotATable { id: id.to_owned() });
    }
    let raw: RawDefinition = value
        .clone()
        .try_into()
        .map_err(|source| DefinitionError::Malformed {
            id: id.to_owned(),
            source,
        })?;

    let entity = match raw.mythic_mob_type.and_then(MobTag::new) {
        Some(tag) => EntityKind::Custom(tag),
        None => {
            let name = raw.entity_type.as_deref().unwrap_or(DEFAULT_ENTITY_TYPE);
            let kind = name
                .parse::<CreatureKind>()
                .map_err(|source| DefinitionError::UnknownEntity {
                    id: id.to_owned(),
                    source,
                })?;
            EntityKind::Vanilla(kind)
        }
    };

    let min_radius = raw.min_radius.unwrap_or(DEFAULT_MIN_RADIUS);
    let max_radius = raw.max_radius.unwrap_or(min_radius);
    let min_amount = raw.min_amount.unwrap_or(DEFAULT_MIN_AMOUNT);
    let max_amount = raw.max_amount.unwrap_or(min_amount);
    let bounds = SpawnBounds::new(min_radius, max_radius, min_amount, max_amount).map_err(
        |source| DefinitionError::InvalidBounds {
            id: id.to_owned(),
            source,
        },
    )?;

    let cosmetics = Cosmetics {
        material: raw.material.unwrap_or_else(|| DEFAULT_MATERIAL.to_owned()),
        display_name: raw.display_name.unwrap_or_else(|| id.to_owned()),
        lore: raw.lore,
    };

    Ok(SpawnerDefinition::new(
        id,
        entity,
        raw.delay.unwrap_or(DEFAULT_DELAY),
        raw.required_player_range
            .unwrap_or(DEFAULT_REQUIRED_PLAYER_RANGE),
        bounds,
        cosmetics,
    ))
}
