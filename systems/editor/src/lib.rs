#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Administrative edit surface for spawner definitions.
//!
//! An edit names a target (a definition id or a placed block), a field and a
//! raw value. The value is validated, applied to the registry, persisted
//! through a [`DefinitionStore`] and the registry is reloaded from the store.
//! [`EditorSessions`] tracks the per-player open spawner and pending field of
//! the interactive editor.

mod session;
mod store;

use custom_spawners_core::{
    BlockCoord, BlockProbe, DefinitionField, HostWorld, UnknownField,
};
use custom_spawners_system_registry::{Registry, RegistryError};
use thiserror::Error;

pub use session::{EditorSessions, Submission, CANCEL_WORD};
pub use store::{DefinitionStore, MemoryStore, StoreError, TomlFileStore};

/// What an edit applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditTarget {
    /// A definition named directly.
    Definition(String),
    /// The definition of the spawner block at the coordinate.
    Placement(BlockCoord),
}

/// Rejected edits. None of them leave partial state behind.
#[derive(Debug, Error)]
pub enum EditError {
    /// The field name does not match any editable field.
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
    /// The value is not an integer.
    #[error("`{0}` is not a whole number")]
    NotANumber(String),
    /// The value is below zero.
    #[error("value must be zero or greater, got {0}")]
    Negative(i64),
    /// The value does not fit the field.
    #[error("value {0} is too large")]
    TooLarge(i64),
    /// The target does not resolve to a known definition.
    #[error("no spawner definition found for {0}")]
    UnknownTarget(String),
    /// The player has no editor open.
    #[error("no spawner editor is open")]
    NoSession,
    /// The registry refused the edit.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// The edit could not be persisted.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Description of an applied edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    /// Identifier of the edited definition, as written in configuration.
    pub spawner_id: String,
    /// Field that changed.
    pub field: DefinitionField,
    /// Value before the edit.
    pub previous: u32,
    /// Value after the edit.
    pub value: u32,
}

/// Parses a raw user value into a non-negative field value.
pub fn parse_value(raw: &str) -> Result<u32, EditError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| EditError::NotANumber(trimmed.to_owned()))?;
    if value < 0 {
        return Err(EditError::Negative(value));
    }
    u32::try_from(value).map_err(|_| EditError::TooLarge(value))
}

/// Resolves an edit target to the identifier of a loaded definition.
pub fn resolve_target<H>(
    target: &EditTarget,
    registry: &Registry,
    host: &H,
) -> Result<String, EditError>
where
    H: HostWorld + ?Sized,
{
    let id = match target {
        EditTarget::Definition(id) => id.clone(),
        EditTarget::Placement(coord) => match host.probe(coord) {
            BlockProbe::Spawner(data) => data
                .spawner_id
                .clone()
                .ok_or_else(|| EditError::UnknownTarget(format!("unmanaged spawner at {coord}")))?,
            BlockProbe::Missing | BlockProbe::Foreign => {
                return Err(EditError::UnknownTarget(format!("no spawner at {coord}")));
            }
        },
    };
    registry
        .lookup(&id)
        .map(|definition| definition.id().to_owned())
        .ok_or(EditError::UnknownTarget(id))
}

/// Validates, applies, persists and reloads a single field edit.
pub fn apply_edit<S, H>(
    registry: &mut Registry,
    store: &mut S,
    host: &H,
    target: &EditTarget,
    field: &str,
    raw_value: &str,
) -> Result<EditOutcome, EditError>
where
    S: DefinitionStore + ?Sized,
    H: HostWorld + ?Sized,
{
    let field = field.parse::<DefinitionField>()?;
    let value = parse_value(raw_value)?;
    let id = resolve_target(target, registry, host)?;
    commit(registry, store, &id, field, value)
}

/// Same as [`apply_edit`] for a definition id and an already parsed field.
pub fn edit_definition<S>(
    registry: &mut Registry,
    store: &mut S,
    id: &str,
    field: DefinitionField,
    raw_value: &str,
) -> Result<EditOutcome, EditError>
where
    S: DefinitionStore + ?Sized,
{
    let value = parse_value(raw_value)?;
    commit(registry, store, id, field, value)
}

fn commit<S>(
    registry: &mut Registry,
    store: &mut S,
    id: &str,
    field: DefinitionField,
    value: u32,
) -> Result<EditOutcome, EditError>
where
    S: DefinitionStore + ?Sized,
{
    let previous = registry
        .lookup(id)
        .map(|definition| definition.field(field))
        .ok_or_else(|| EditError::UnknownTarget(id.to_owned()))?;
    let spawner_id = registry.update_field(id, field, value)?.id().to_owned();

    if let Err(error) = store.save_field(&spawner_id, field, value) {
        let _ = registry.update_field(&spawner_id, field, previous);
        tracing::warn!(id = %spawner_id, %error, "failed to persist spawner edit");
        return Err(error.into());
    }

    let source = store.load()?;
    let report = registry.reload(&source);
    tracing::info!(
        id = %spawner_id,
        field = field.key(),
        previous,
        value,
        loaded = report.loaded(),
        "spawner definition edited and reloaded"
    );

    Ok(EditOutcome {
        spawner_id,
        field,
        previous,
        value,
    })
}
