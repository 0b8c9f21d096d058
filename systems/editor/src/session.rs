//! Per-player state of the interactive spawner editor.

use std::collections::BTreeMap;

use custom_spawners_core::{BlockCoord, DefinitionField, HostWorld, PlayerId};
use custom_spawners_system_registry::Registry;

use crate::{edit_definition, resolve_target, DefinitionStore, EditError, EditOutcome, EditTarget};

/// Submission that aborts a pending edit.
pub const CANCEL_WORD: &str = "cancel";

#[derive(Clone, Debug, PartialEq, Eq)]
struct Session {
    spawner_id: String,
    pending: Option<DefinitionField>,
}

/// Result of a chat-style submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The pending edit was applied.
    Applied(EditOutcome),
    /// The player cancelled the pending edit.
    Cancelled,
    /// The player had no pending edit; the input is not meant for the editor.
    Ignored,
}

/// Open editors and pending field edits keyed by player.
#[derive(Clone, Debug, Default)]
pub struct EditorSessions {
    sessions: BTreeMap<PlayerId, Session>,
}

impl EditorSessions {
    /// Creates an empty session table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the editor on a definition, replacing any previous session of the player.
    pub fn open(&mut self, player: PlayerId, spawner_id: impl Into<String>) {
        let _ = self.sessions.insert(
            player,
            Session {
                spawner_id: spawner_id.into(),
                pending: None,
            },
        );
    }

    /// Opens the editor on the definition of the spawner block at `coord`.
    pub fn open_at<H>(
        &mut self,
        player: PlayerId,
        coord: &BlockCoord,
        registry: &Registry,
        host: &H,
    ) -> Result<String, EditError>
    where
        H: HostWorld + ?Sized,
    {
        let id = resolve_target(&EditTarget::Placement(coord.clone()), registry, host)?;
        self.open(player, id.clone());
        Ok(id)
    }

    /// Closes the player's editor. Returns `false` when none was open.
    pub fn close(&mut self, player: PlayerId) -> bool {
        self.sessions.remove(&player).is_some()
    }

    /// Definition currently open for the player.
    #[must_use]
    pub fn open_definition(&self, player: PlayerId) -> Option<&str> {
        self.sessions
            .get(&player)
            .map(|session| session.spawner_id.as_str())
    }

    /// Field awaiting a value from the player.
    #[must_use]
    pub fn pending(&self, player: PlayerId) -> Option<DefinitionField> {
        self.sessions.get(&player).and_then(|session| session.pending)
    }

    /// Selects the field the player's next submission will set.
    pub fn begin_edit(&mut self, player: PlayerId, field: DefinitionField) -> Result<(), EditError> {
        let session = self.sessions.get_mut(&player).ok_or(EditError::NoSession)?;
        session.pending = Some(field);
        Ok(())
    }

    /// Consumes the pending edit with the player's input.
    ///
    /// The pending field is cleared whatever the outcome; the editor stays open.
    pub fn submit<S>(
        &mut self,
        player: PlayerId,
        input: &str,
        registry: &mut Registry,
        store: &mut S,
    ) -> Result<Submission, EditError>
    where
        S: DefinitionStore + ?Sized,
    {
        let Some(session) = self.sessions.get_mut(&player) else {
            return Ok(Submission::Ignored);
        };
        let Some(field) = session.pending.take() else {
            return Ok(Submission::Ignored);
        };
        if input.trim().eq_ignore_ascii_case(CANCEL_WORD) {
            return Ok(Submission::Cancelled);
        }
        let outcome = edit_definition(registry, store, &session.spawner_id, field, input)?;
        Ok(Submission::Applied(outcome))
    }

    /// Number of open editors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Reports whether no editor is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
