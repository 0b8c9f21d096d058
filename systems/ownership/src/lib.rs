#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ownership ledger recording which player placed which spawner.
//!
//! The ledger is an external collaborator: the engine only talks to it
//! through [`OwnershipLedger`]. [`MemoryLedger`] is the in-process
//! implementation shipped with the workspace.

mod permission;

use std::collections::BTreeMap;

use custom_spawners_core::{BlockCoord, PlayerId, SpawnParameters};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use permission::{break_decision, Actor, BreakDecision};

/// Errors reported by ledger implementations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The backing store cannot be reached.
    #[error("ownership ledger is unavailable: {0}")]
    Unavailable(String),
}

/// Player identity stored alongside a placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Stable player identity.
    pub id: PlayerId,
    /// Player name at placement time.
    pub name: String,
}

/// Parameters captured when the spawner was placed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementSnapshot {
    /// Kind label, `mm:<tag>` for custom mobs.
    pub entity: Option<String>,
    /// Fire interval in ticks.
    pub delay: i32,
    /// Player range.
    pub required_player_range: i32,
    /// Minimum radius.
    pub min_radius: i32,
    /// Maximum radius.
    pub max_radius: i32,
    /// Minimum amount.
    pub min_amount: i32,
    /// Maximum amount.
    pub max_amount: i32,
}

impl From<&SpawnParameters> for PlacementSnapshot {
    fn from(params: &SpawnParameters) -> Self {
        Self {
            entity: params.entity.as_ref().map(|kind| kind.label()),
            delay: params.delay,
            required_player_range: params.required_player_range,
            min_radius: params.min_radius,
            max_radius: params.max_radius,
            min_amount: params.min_amount,
            max_amount: params.max_amount,
        }
    }
}

/// A single ownership entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipRecord {
    /// Player that placed the spawner.
    pub owner: Owner,
    /// Definition the spawner was created from.
    pub spawner_id: String,
    /// Block occupied by the spawner.
    pub coord: BlockCoord,
    /// Parameters at placement time.
    pub snapshot: PlacementSnapshot,
}

/// Selects the records of one player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OwnerQuery {
    /// Match by stable identity.
    Id(PlayerId),
    /// Match by last known name, ignoring case.
    Name(String),
}

impl OwnerQuery {
    fn matches(&self, owner: &Owner) -> bool {
        match self {
            Self::Id(id) => owner.id == *id,
            Self::Name(name) => owner.name.eq_ignore_ascii_case(name),
        }
    }
}

/// Persistence seam for spawner ownership.
pub trait OwnershipLedger {
    /// Records a placement, replacing any previous record at the coordinate.
    fn add_placement(
        &mut self,
        owner: Owner,
        spawner_id: &str,
        coord: BlockCoord,
        snapshot: PlacementSnapshot,
    ) -> Result<(), LedgerError>;

    /// Removes the record at the coordinate, returning it when present.
    fn remove_placement(&mut self, coord: &BlockCoord)
        -> Result<Option<OwnershipRecord>, LedgerError>;

    /// Owner of the placement at the coordinate.
    fn owner_of(&self, coord: &BlockCoord) -> Result<Option<PlayerId>, LedgerError>;

    /// Every record matching the query, in coordinate order.
    fn placements_of(&self, query: &OwnerQuery) -> Result<Vec<OwnershipRecord>, LedgerError>;
}

/// In-memory ledger keyed by coordinate.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    records: BTreeMap<BlockCoord, OwnershipRecord>,
    offline: bool,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates losing or regaining the backing store.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Reports whether the ledger holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn ensure_online(&self) -> Result<(), LedgerError> {
        if self.offline {
            Err(LedgerError::Unavailable("memory ledger is offline".to_owned()))
        } else {
            Ok(())
        }
    }
}

impl OwnershipLedger for MemoryLedger {
    fn add_placement(
        &mut self,
        owner: Owner,
        spawner_id: &str,
        coord: BlockCoord,
        snapshot: PlacementSnapshot,
    ) -> Result<(), LedgerError> {
        self.ensure_online()?;
        tracing::debug!(%coord, owner = %owner.id, spawner_id, "recording spawner owner");
        let record = OwnershipRecord {
            owner,
            spawner_id: spawner_id.to_owned(),
            coord: coord.clone(),
            snapshot,
        };
        let _ = self.records.insert(coord, record);
        Ok(())
    }

    fn remove_placement(
        &mut self,
        coord: &BlockCoord,
    ) -> Result<Option<OwnershipRecord>, LedgerError> {
        self.ensure_online()?;
        Ok(self.records.remove(coord))
    }

    fn owner_of(&self, coord: &BlockCoord) -> Result<Option<PlayerId>, LedgerError> {
        self.ensure_online()?;
        Ok(self.records.get(coord).map(|record| record.owner.id))
    }

    fn placements_of(&self, query: &OwnerQuery) -> Result<Vec<OwnershipRecord>, LedgerError> {
        self.ensure_online()?;
        Ok(self
            .records
            .values()
            .filter(|record| query.matches(&record.owner))
            .cloned()
            .collect())
    }
}
