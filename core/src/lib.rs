#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the custom spawner engine.
//!
//! This crate defines the vocabulary that connects the host adapter, the
//! simulated world, and the pure systems. Adapters submit [`Command`] values
//! describing desired world mutations, the world executes those commands via
//! its `apply` entry point, and systems report what they did through [`Event`]
//! values. The [`HostWorld`] trait is the seam through which systems observe
//! blocks and players and request entity creation.

mod creature;

use std::{fmt, str::FromStr};

use glam::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use creature::{CreatureKind, UnknownCreature};

/// Interval used when neither a block, a definition nor the caller provides a positive delay.
pub const DEFAULT_DELAY_TICKS: i32 = 200;

/// Player range used by native spawner blocks when nothing else is configured.
pub const DEFAULT_REQUIRED_PLAYER_RANGE: i32 = 16;

/// Integer block position inside a named world.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockCoord {
    world: String,
    x: i32,
    y: i32,
    z: i32,
}

impl BlockCoord {
    /// Creates a new block coordinate.
    #[must_use]
    pub fn new(world: impl Into<String>, x: i32, y: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// Name of the world containing the block.
    #[must_use]
    pub fn world(&self) -> &str {
        &self.world
    }

    /// Block x coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Block y coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Block z coordinate.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Corner of the block in continuous world space.
    #[must_use]
    pub fn corner(&self) -> DVec3 {
        DVec3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }
}

impl fmt::Display for BlockCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.world, self.x, self.y, self.z)
    }
}

/// Stable identity of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Wraps the provided uuid.
    #[must_use]
    pub const fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying uuid of the player.
    #[must_use]
    pub const fn uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Type tag understood by the external custom mob provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MobTag(String);

impl MobTag {
    /// Creates a tag, rejecting blank input.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Option<Self> {
        let tag = tag.into();
        if tag.trim().is_empty() {
            None
        } else {
            Some(Self(tag))
        }
    }

    /// Raw tag string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What a spawner produces.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Creature built into the host game.
    Vanilla(CreatureKind),
    /// Mob provided by the external custom mob plugin.
    Custom(MobTag),
}

impl EntityKind {
    /// Short label used in listings, `mm:<tag>` for custom mobs.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Vanilla(kind) => kind.name().to_owned(),
            Self::Custom(tag) => format!("mm:{}", tag.as_str()),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Numeric definition fields that the administrative surface may rewrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DefinitionField {
    /// Fire interval in ticks.
    Delay,
    /// Distance a player must be within before the countdown runs.
    RequiredPlayerRange,
    /// Lower bound of the spawn radius.
    MinRadius,
    /// Upper bound of the spawn radius.
    MaxRadius,
    /// Lower bound of the spawn amount.
    MinAmount,
    /// Upper bound of the spawn amount.
    MaxAmount,
}

impl DefinitionField {
    /// Every editable field in display order.
    pub const ALL: [DefinitionField; 6] = [
        DefinitionField::Delay,
        DefinitionField::RequiredPlayerRange,
        DefinitionField::MinRadius,
        DefinitionField::MaxRadius,
        DefinitionField::MinAmount,
        DefinitionField::MaxAmount,
    ];

    /// Configuration key of the field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Delay => "delay",
            Self::RequiredPlayerRange => "required-player-range",
            Self::MinRadius => "min-radius",
            Self::MaxRadius => "max-radius",
            Self::MinAmount => "min-amount",
            Self::MaxAmount => "max-amount",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delay => "Delay (ticks)",
            Self::RequiredPlayerRange => "Required Player Range",
            Self::MinRadius => "Min Radius",
            Self::MaxRadius => "Max Radius",
            Self::MinAmount => "Min Amount",
            Self::MaxAmount => "Max Amount",
        }
    }
}

impl fmt::Display for DefinitionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a field name does not match any editable field.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown spawner field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for DefinitionField {
    type Err = UnknownField;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|field| field.key() == normalised)
            .ok_or_else(|| UnknownField(value.to_owned()))
    }
}

/// Violation of the `min <= max` invariant of a bounds pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BoundsError {
    /// The minimum radius exceeds the maximum radius.
    #[error("min-radius {min} exceeds max-radius {max}")]
    InvertedRadius {
        /// Offending minimum.
        min: u32,
        /// Offending maximum.
        max: u32,
    },
    /// The minimum amount exceeds the maximum amount.
    #[error("min-amount {min} exceeds max-amount {max}")]
    InvertedAmount {
        /// Offending minimum.
        min: u32,
        /// Offending maximum.
        max: u32,
    },
}

/// Radius and amount ranges of a definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnBounds {
    min_radius: u32,
    max_radius: u32,
    min_amount: u32,
    max_amount: u32,
}

impl SpawnBounds {
    /// Validates and creates a bounds description.
    pub fn new(
        min_radius: u32,
        max_radius: u32,
        min_amount: u32,
        max_amount: u32,
    ) -> Result<Self, BoundsError> {
        let bounds = Self {
            min_radius,
            max_radius,
            min_amount,
            max_amount,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    fn validate(&self) -> Result<(), BoundsError> {
        if self.min_radius > self.max_radius {
            return Err(BoundsError::InvertedRadius {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if self.min_amount > self.max_amount {
            return Err(BoundsError::InvertedAmount {
                min: self.min_amount,
                max: self.max_amount,
            });
        }
        Ok(())
    }

    /// Smallest spawn radius in blocks.
    #[must_use]
    pub const fn min_radius(&self) -> u32 {
        self.min_radius
    }

    /// Largest spawn radius in blocks.
    #[must_use]
    pub const fn max_radius(&self) -> u32 {
        self.max_radius
    }

    /// Smallest number of entities per firing.
    #[must_use]
    pub const fn min_amount(&self) -> u32 {
        self.min_amount
    }

    /// Largest number of entities per firing.
    #[must_use]
    pub const fn max_amount(&self) -> u32 {
        self.max_amount
    }
}

/// Presentation fields carried through to spawner items, never interpreted by the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cosmetics {
    /// Item material name.
    pub material: String,
    /// Display name, colour codes untouched.
    pub display_name: String,
    /// Lore lines, colour codes untouched.
    pub lore: Vec<String>,
}

/// Named spawner template loaded from configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnerDefinition {
    id: String,
    entity: EntityKind,
    delay: u32,
    required_player_range: u32,
    bounds: SpawnBounds,
    cosmetics: Cosmetics,
}

impl SpawnerDefinition {
    /// Creates a definition from already validated parts.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        entity: EntityKind,
        delay: u32,
        required_player_range: u32,
        bounds: SpawnBounds,
        cosmetics: Cosmetics,
    ) -> Self {
        Self {
            id: id.into(),
            entity,
            delay,
            required_player_range,
            bounds,
            cosmetics,
        }
    }

    /// Identifier as written in configuration.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Entity produced by the spawner.
    #[must_use]
    pub const fn entity(&self) -> &EntityKind {
        &self.entity
    }

    /// Fire interval in ticks.
    #[must_use]
    pub const fn delay(&self) -> u32 {
        self.delay
    }

    /// Distance within which a player must stand for the countdown to run.
    #[must_use]
    pub const fn required_player_range(&self) -> u32 {
        self.required_player_range
    }

    /// Radius and amount ranges.
    #[must_use]
    pub const fn bounds(&self) -> &SpawnBounds {
        &self.bounds
    }

    /// Presentation fields.
    #[must_use]
    pub const fn cosmetics(&self) -> &Cosmetics {
        &self.cosmetics
    }

    /// Current value of an editable field.
    #[must_use]
    pub const fn field(&self, field: DefinitionField) -> u32 {
        match field {
            DefinitionField::Delay => self.delay,
            DefinitionField::RequiredPlayerRange => self.required_player_range,
            DefinitionField::MinRadius => self.bounds.min_radius,
            DefinitionField::MaxRadius => self.bounds.max_radius,
            DefinitionField::MinAmount => self.bounds.min_amount,
            DefinitionField::MaxAmount => self.bounds.max_amount,
        }
    }

    /// Rewrites a single field. The definition is left untouched when the edit would invert a range.
    pub fn set_field(&mut self, field: DefinitionField, value: u32) -> Result<(), BoundsError> {
        let mut bounds = self.bounds;
        match field {
            DefinitionField::Delay => {
                self.delay = value;
                return Ok(());
            }
            DefinitionField::RequiredPlayerRange => {
                self.required_player_range = value;
                return Ok(());
            }
            DefinitionField::MinRadius => bounds.min_radius = value,
            DefinitionField::MaxRadius => bounds.max_radius = value,
            DefinitionField::MinAmount => bounds.min_amount = value,
            DefinitionField::MaxAmount => bounds.max_amount = value,
        }
        bounds.validate()?;
        self.bounds = bounds;
        Ok(())
    }
}

/// Parameters attached directly to a placed block. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnOverrides {
    /// Entity override, typically a custom mob tag.
    pub entity: Option<EntityKind>,
    /// Fire interval override in ticks.
    pub delay: Option<i32>,
    /// Player range override.
    pub required_player_range: Option<i32>,
    /// Minimum radius override.
    pub min_radius: Option<i32>,
    /// Maximum radius override.
    pub max_radius: Option<i32>,
    /// Minimum amount override.
    pub min_amount: Option<i32>,
    /// Maximum amount override.
    pub max_amount: Option<i32>,
}

/// Persisted data of a spawner block in the host world.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnerBlockData {
    /// Definition the block was created from. Blocks without one are not managed.
    pub spawner_id: Option<String>,
    /// Inline parameters copied from the spawner item.
    pub overrides: SpawnOverrides,
}

impl SpawnerBlockData {
    /// Reports whether the block belongs to this plugin.
    #[must_use]
    pub fn is_managed(&self) -> bool {
        self.spawner_id.is_some()
    }
}

/// Last-resort values used when neither the block nor a definition supplies a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineDefaults {
    /// Fallback interval in ticks.
    pub delay: i32,
    /// Fallback player range.
    pub required_player_range: i32,
    /// Fallback minimum radius.
    pub min_radius: i32,
    /// Fallback maximum radius.
    pub max_radius: i32,
    /// Fallback minimum amount.
    pub min_amount: i32,
    /// Fallback maximum amount.
    pub max_amount: i32,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY_TICKS,
            required_player_range: DEFAULT_REQUIRED_PLAYER_RANGE,
            min_radius: 0,
            max_radius: 0,
            min_amount: 1,
            max_amount: 1,
        }
    }
}

/// Fully resolved parameters of a single placement for one pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnParameters {
    /// Entity to produce, absent when nothing in the chain names one.
    pub entity: Option<EntityKind>,
    /// Fire interval in ticks. May be non-positive; callers enforce the floor.
    pub delay: i32,
    /// Player range; non-positive disables the proximity gate.
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

impl SpawnParameters {
    /// Interval to re-arm with, falling back to `floor` when the effective delay is not positive.
    #[must_use]
    pub fn rearm_delay(&self, floor: i32) -> i32 {
        if self.delay > 0 {
            self.delay
        } else {
            floor.max(1)
        }
    }
}

/// Resolves effective parameters: block overrides first, then the definition, then engine defaults.
#[must_use]
pub fn effective_parameters(
    overrides: &SpawnOverrides,
    definition: Option<&SpawnerDefinition>,
    defaults: &EngineDefaults,
) -> SpawnParameters {
    let from_definition = |field: DefinitionField| {
        definition.map(|definition| clamp_to_i32(definition.field(field)))
    };
    let pick = |block: Option<i32>, field: DefinitionField, fallback: i32| {
        block.or_else(|| from_definition(field)).unwrap_or(fallback)
    };

    SpawnParameters {
        entity: overrides
            .entity
            .clone()
            .or_else(|| definition.map(|definition| definition.entity().clone())),
        delay: pick(overrides.delay, DefinitionField::Delay, defaults.delay),
        required_player_range: pick(
            overrides.required_player_range,
            DefinitionField::RequiredPlayerRange,
            defaults.required_player_range,
        ),
        min_radius: pick(
            overrides.min_radius,
            DefinitionField::MinRadius,
            defaults.min_radius,
        ),
        max_radius: pick(
            overrides.max_radius,
            DefinitionField::MaxRadius,
            defaults.max_radius,
        ),
        min_amount: pick(
            overrides.min_amount,
            DefinitionField::MinAmount,
            defaults.min_amount,
        ),
        max_amount: pick(
            overrides.max_amount,
            DefinitionField::MaxAmount,
            defaults.max_amount,
        ),
    }
}

fn clamp_to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Result of looking up a block through the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockProbe<'a> {
    /// Nothing is placed at the coordinate, or its chunk is gone.
    Missing,
    /// A block of some other type occupies the coordinate.
    Foreign,
    /// A spawner block together with its persisted data.
    Spawner(&'a SpawnerBlockData),
}

/// Where a single entity should appear.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnLocation {
    /// World receiving the entity.
    pub world: String,
    /// Continuous position of the entity.
    pub position: DVec3,
}

/// Reasons the host can refuse to create an entity.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpawnFailure {
    /// The custom mob provider is not installed or not enabled.
    #[error("custom mob provider is unavailable")]
    ProviderUnavailable,
    /// The custom mob provider does not know the requested tag.
    #[error("unknown custom mob `{0}`")]
    UnknownMob(String),
    /// The host rejected the spawn for another reason.
    #[error("spawn rejected: {0}")]
    Rejected(String),
}

/// Seam between the engine and the game server hosting it.
pub trait HostWorld {
    /// Inspects the block at the coordinate.
    fn probe(&self, coord: &BlockCoord) -> BlockProbe<'_>;

    /// Positions of the players currently in the named world.
    fn player_positions(&self, world: &str) -> Vec<DVec3>;

    /// Creates one entity of the given kind.
    fn spawn_entity(&mut self, kind: &EntityKind, location: &SpawnLocation) -> Result<(), SpawnFailure>;
}

/// Per-firing or aggregate count of created entities.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTally {
    /// Built-in creatures created.
    pub vanilla: u32,
    /// Custom mobs created.
    pub custom: u32,
    /// Units the host refused.
    pub failed: u32,
}

impl SpawnTally {
    /// Counts a successful spawn of the provided kind.
    pub fn record_success(&mut self, kind: &EntityKind) {
        match kind {
            EntityKind::Vanilla(_) => self.vanilla = self.vanilla.saturating_add(1),
            EntityKind::Custom(_) => self.custom = self.custom.saturating_add(1),
        }
    }

    /// Counts a refused unit.
    pub fn record_failure(&mut self) {
        self.failed = self.failed.saturating_add(1);
    }

    /// Number of entities that were actually created.
    #[must_use]
    pub const fn spawned(&self) -> u32 {
        self.vanilla.saturating_add(self.custom)
    }

    /// Adds another tally into this one.
    pub fn absorb(&mut self, other: SpawnTally) {
        self.vanilla = self.vanilla.saturating_add(other.vanilla);
        self.custom = self.custom.saturating_add(other.custom);
        self.failed = self.failed.saturating_add(other.failed);
    }
}

/// Commands that express all permissible mutations of the simulated world.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Sets a spawner block carrying the provided data.
    PlaceSpawnerBlock {
        /// Target coordinate.
        coord: BlockCoord,
        /// Persisted spawner data.
        data: SpawnerBlockData,
    },
    /// Sets a block of an unrelated type, replacing whatever was there.
    PlaceForeignBlock {
        /// Target coordinate.
        coord: BlockCoord,
    },
    /// Removes the block at the coordinate.
    ClearBlock {
        /// Target coordinate.
        coord: BlockCoord,
    },
    /// Moves a player, adding them to the world if absent.
    MovePlayer {
        /// Player identity.
        player: PlayerId,
        /// Display name of the player.
        name: String,
        /// World the player stands in.
        world: String,
        /// Position of the player.
        position: DVec3,
    },
    /// Removes a player from the world.
    DisconnectPlayer {
        /// Player identity.
        player: PlayerId,
    },
}

/// Events broadcast by the world and by the scheduler.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A block changed at the coordinate.
    BlockChanged {
        /// Coordinate of the change.
        coord: BlockCoord,
    },
    /// A player position changed or the player joined.
    PlayerMoved {
        /// Player identity.
        player: PlayerId,
    },
    /// A player left.
    PlayerLeft {
        /// Player identity.
        player: PlayerId,
    },
    /// A placement entered the index or had its countdown reset.
    PlacementArmed {
        /// Coordinate of the placement.
        coord: BlockCoord,
        /// Ticks until the first firing.
        countdown: i32,
    },
    /// A placement was removed on request.
    PlacementDisarmed {
        /// Coordinate of the placement.
        coord: BlockCoord,
    },
    /// A placement was dropped because its block vanished or changed type.
    PlacementEvicted {
        /// Coordinate of the placement.
        coord: BlockCoord,
    },
    /// A placement fired.
    SpawnerFired {
        /// Coordinate of the placement.
        coord: BlockCoord,
        /// Outcome of the firing.
        tally: SpawnTally,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> SpawnerDefinition {
        SpawnerDefinition::new(
            "zombie_den",
            EntityKind::Vanilla(CreatureKind::Zombie),
            300,
            8,
            SpawnBounds::new(1, 4, 2, 3).expect("valid bounds"),
            Cosmetics::default(),
        )
    }

    #[test]
    fn block_coord_displays_as_canonical_key() {
        let coord = BlockCoord::new("world_nether", -3, 64, 12);
        assert_eq!(coord.to_string(), "world_nether,-3,64,12");
    }

    #[test]
    fn field_names_accept_underscores_and_case() {
        assert_eq!("MIN_RADIUS".parse(), Ok(DefinitionField::MinRadius));
        assert_eq!(
            " required-player-range ".parse(),
            Ok(DefinitionField::RequiredPlayerRange)
        );
        assert!("radius".parse::<DefinitionField>().is_err());
    }

    #[test]
    fn overrides_win_over_definition_and_defaults() {
        let overrides = SpawnOverrides {
            entity: MobTag::new("SkeletalKnight").map(EntityKind::Custom),
            max_radius: Some(9),
            ..SpawnOverrides::default()
        };
        let definition = definition();
        let params = effective_parameters(&overrides, Some(&definition), &EngineDefaults::default());

        assert_eq!(params.entity.map(|kind| kind.label()), Some("mm:SkeletalKnight".to_owned()));
        assert_eq!(params.max_radius, 9);
        assert_eq!(params.min_radius, 1);
        assert_eq!(params.delay, 300);
        assert_eq!(params.required_player_range, 8);
    }

    #[test]
    fn engine_defaults_fill_gaps_without_definition() {
        let params = effective_parameters(&SpawnOverrides::default(), None, &EngineDefaults::default());

        assert_eq!(params.entity, None);
        assert_eq!(params.delay, DEFAULT_DELAY_TICKS);
        assert_eq!(params.required_player_range, DEFAULT_REQUIRED_PLAYER_RANGE);
        assert_eq!((params.min_amount, params.max_amount), (1, 1));
    }

    #[test]
    fn rearm_delay_never_drops_below_one_tick() {
        let mut params = effective_parameters(&SpawnOverrides::default(), None, &EngineDefaults::default());
        params.delay = 0;
        assert_eq!(params.rearm_delay(200), 200);
        assert_eq!(params.rearm_delay(-5), 1);
    }

    #[test]
    fn set_field_rejects_inverted_range_without_mutating() {
        let mut definition = definition();
        let err = definition
            .set_field(DefinitionField::MinRadius, 7)
            .expect_err("min above max");
        assert_eq!(err, BoundsError::InvertedRadius { min: 7, max: 4 });
        assert_eq!(definition.bounds().min_radius(), 1);

        definition
            .set_field(DefinitionField::MinRadius, 3)
            .expect("within range");
        assert_eq!(definition.field(DefinitionField::MinRadius), 3);
    }

    #[test]
    fn tally_separates_kinds() {
        let mut tally = SpawnTally::default();
        tally.record_success(&EntityKind::Vanilla(CreatureKind::Pig));
        tally.record_success(&EntityKind::Custom(MobTag::new("Ghoul").expect("tag")));
        tally.record_failure();
        assert_eq!(tally.spawned(), 2);
        assert_eq!(tally.failed, 1);
    }
}
