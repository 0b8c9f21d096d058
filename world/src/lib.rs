#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative in-process host world used to drive the spawner engine.
//!
//! The world stores blocks, players and every entity it was asked to create.
//! Mutations arrive as [`Command`] values through [`apply`]; systems observe
//! the world exclusively through the [`HostWorld`] trait.

use std::collections::{BTreeMap, BTreeSet};

use glam::DVec3;
use custom_spawners_core::{
    BlockCoord, BlockProbe, Command, EntityKind, Event, HostWorld, MobTag, PlayerId,
    SpawnFailure, SpawnLocation, SpawnerBlockData,
};

/// Block occupying a coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Spawner block with its persisted data.
    Spawner(SpawnerBlockData),
    /// Any other block type.
    Foreign,
}

/// Player tracked by the world.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    name: String,
    world: String,
    position: DVec3,
}

impl PlayerState {
    /// Display name of the player.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// World the player stands in.
    #[must_use]
    pub fn world(&self) -> &str {
        &self.world
    }

    /// Position of the player.
    #[must_use]
    pub const fn position(&self) -> DVec3 {
        self.position
    }
}

/// Entity created on behalf of a spawner.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnedEntity {
    /// Kind that was created.
    pub kind: EntityKind,
    /// Location it was created at.
    pub location: SpawnLocation,
}

/// Availability of the external custom mob provider.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
enum CustomMobProvider {
    #[default]
    Absent,
    Installed(BTreeSet<String>),
}

/// Represents the authoritative host world state.
#[derive(Debug, Default)]
pub struct World {
    blocks: BTreeMap<BlockCoord, Block>,
    players: BTreeMap<PlayerId, PlayerState>,
    spawned: Vec<SpawnedEntity>,
    provider: CustomMobProvider,
    refused: Vec<EntityKind>,
}

impl World {
    /// Creates an empty world without a custom mob provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a custom mob provider that knows the provided tags.
    #[must_use]
    pub fn with_custom_mobs<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provider = CustomMobProvider::Installed(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Makes every future spawn of `kind` fail.
    pub fn refuse_spawns_of(&mut self, kind: EntityKind) {
        if !self.refused.contains(&kind) {
            self.refused.push(kind);
        }
    }

    fn spawn_custom(&self, tag: &MobTag) -> Result<(), SpawnFailure> {
        match &self.provider {
            CustomMobProvider::Absent => Err(SpawnFailure::ProviderUnavailable),
            CustomMobProvider::Installed(known) if known.contains(tag.as_str()) => Ok(()),
            CustomMobProvider::Installed(_) => Err(SpawnFailure::UnknownMob(tag.as_str().to_owned())),
        }
    }
}

impl HostWorld for World {
    fn probe(&self, coord: &BlockCoord) -> BlockProbe<'_> {
        match self.blocks.get(coord) {
            None => BlockProbe::Missing,
            Some(Block::Foreign) => BlockProbe::Foreign,
            Some(Block::Spawner(data)) => BlockProbe::Spawner(data),
        }
    }

    fn player_positions(&self, world: &str) -> Vec<DVec3> {
        self.players
            .values()
            .filter(|player| player.world == world)
            .map(|player| player.position)
            .collect()
    }

    fn spawn_entity(
        &mut self,
        kind: &EntityKind,
        location: &SpawnLocation,
    ) -> Result<(), SpawnFailure> {
        if self.refused.contains(kind) {
            return Err(SpawnFailure::Rejected(format!("{kind} is refused here")));
        }
        if let EntityKind::Custom(tag) = kind {
            self.spawn_custom(tag)?;
        }
        self.spawned.push(SpawnedEntity {
            kind: kind.clone(),
            location: location.clone(),
        });
        Ok(())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceSpawnerBlock { coord, data } => {
            let _ = world.blocks.insert(coord.clone(), Block::Spawner(data));
            out_events.push(Event::BlockChanged { coord });
        }
        Command::PlaceForeignBlock { coord } => {
            let _ = world.blocks.insert(coord.clone(), Block::Foreign);
            out_events.push(Event::BlockChanged { coord });
        }
        Command::ClearBlock { coord } => {
            if world.blocks.remove(&coord).is_some() {
                out_events.push(Event::BlockChanged { coord });
            }
        }
        Command::MovePlayer {
            player,
            name,
            world: world_name,
            position,
        } => {
            let _ = world.players.insert(
                player,
                PlayerState {
                    name,
                    world: world_name,
                    position,
                },
            );
            out_events.push(Event::PlayerMoved { player });
        }
        Command::DisconnectPlayer { player } => {
            if world.players.remove(&player).is_some() {
                out_events.push(Event::PlayerLeft { player });
            }
        }
    }
}

/// Query helpers that expose read-only world state.
pub mod query {
    use super::{Block, PlayerState, SpawnedEntity, World};
    use custom_spawners_core::{BlockCoord, PlayerId, SpawnerBlockData};

    /// Block at the coordinate, if any.
    #[must_use]
    pub fn block<'world>(world: &'world World, coord: &BlockCoord) -> Option<&'world Block> {
        world.blocks.get(coord)
    }

    /// Spawner data stored at the coordinate, if a spawner block is there.
    #[must_use]
    pub fn spawner_data<'world>(
        world: &'world World,
        coord: &BlockCoord,
    ) -> Option<&'world SpawnerBlockData> {
        match world.blocks.get(coord) {
            Some(Block::Spawner(data)) => Some(data),
            _ => None,
        }
    }

    /// Every entity created so far, in creation order.
    #[must_use]
    pub fn spawned_entities(world: &World) -> &[SpawnedEntity] {
        &world.spawned
    }

    /// Looks up a connected player.
    #[must_use]
    pub fn player<'world>(world: &'world World, player: PlayerId) -> Option<&'world PlayerState> {
        world.players.get(&player)
    }

    /// Coordinates of every managed spawner block, in coordinate order.
    #[must_use]
    pub fn managed_spawners(world: &World) -> Vec<BlockCoord> {
        world
            .blocks
            .iter()
            .filter_map(|(coord, block)| match block {
                Block::Spawner(data) if data.is_managed() => Some(coord.clone()),
                _ => None,
            })
            .collect()
    }
}
