//! Built-in creature catalogue.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Creatures the host game can spawn natively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreatureKind {
    /// Pig.
    Pig,
    /// Cow.
    Cow,
    /// Sheep.
    Sheep,
    /// Chicken.
    Chicken,
    /// Rabbit.
    Rabbit,
    /// Wolf.
    Wolf,
    /// Horse.
    Horse,
    /// Villager.
    Villager,
    /// Iron golem.
    IronGolem,
    /// Zombie.
    Zombie,
    /// Husk.
    Husk,
    /// Drowned.
    Drowned,
    /// Zombie villager.
    ZombieVillager,
    /// Skeleton.
    Skeleton,
    /// Stray.
    Stray,
    /// Wither skeleton.
    WitherSkeleton,
    /// Creeper.
    Creeper,
    /// Spider.
    Spider,
    /// Cave spider.
    CaveSpider,
    /// Enderman.
    Enderman,
    /// Witch.
    Witch,
    /// Slime.
    Slime,
    /// Magma cube.
    MagmaCube,
    /// Blaze.
    Blaze,
    /// Ghast.
    Ghast,
    /// Piglin.
    Piglin,
    /// Zombified piglin.
    ZombifiedPiglin,
    /// Silverfish.
    Silverfish,
    /// Guardian.
    Guardian,
    /// Phantom.
    Phantom,
    /// Pillager.
    Pillager,
    /// Vindicator.
    Vindicator,
    /// Evoker.
    Evoker,
    /// Ravager.
    Ravager,
}

const CATALOGUE: [(CreatureKind, &str); 34] = [
    (CreatureKind::Pig, "PIG"),
    (CreatureKind::Cow, "COW"),
    (CreatureKind::Sheep, "SHEEP"),
    (CreatureKind::Chicken, "CHICKEN"),
    (CreatureKind::Rabbit, "RABBIT"),
    (CreatureKind::Wolf, "WOLF"),
    (CreatureKind::Horse, "HORSE"),
    (CreatureKind::Villager, "VILLAGER"),
    (CreatureKind::IronGolem, "IRON_GOLEM"),
    (CreatureKind::Zombie, "ZOMBIE"),
    (CreatureKind::Husk, "HUSK"),
    (CreatureKind::Drowned, "DROWNED"),
    (CreatureKind::ZombieVillager, "ZOMBIE_VILLAGER"),
    (CreatureKind::Skeleton, "SKELETON"),
    (CreatureKind::Stray, "STRAY"),
    (CreatureKind::WitherSkeleton, "WITHER_SKELETON"),
    (CreatureKind::Creeper, "CREEPER"),
    (CreatureKind::Spider, "SPIDER"),
    (CreatureKind::CaveSpider, "CAVE_SPIDER"),
    (CreatureKind::Enderman, "ENDERMAN"),
    (CreatureKind::Witch, "WITCH"),
    (CreatureKind::Slime, "SLIME"),
    (CreatureKind::MagmaCube, "MAGMA_CUBE"),
    (CreatureKind::Blaze, "BLAZE"),
    (CreatureKind::Ghast, "GHAST"),
    (CreatureKind::Piglin, "PIGLIN"),
    (CreatureKind::ZombifiedPiglin, "ZOMBIFIED_PIGLIN"),
    (CreatureKind::Silverfish, "SILVERFISH"),
    (CreatureKind::Guardian, "GUARDIAN"),
    (CreatureKind::Phantom, "PHANTOM"),
    (CreatureKind::Pillager, "PILLAGER"),
    (CreatureKind::Vindicator, "VINDICATOR"),
    (CreatureKind::Evoker, "EVOKER"),
    (CreatureKind::Ravager, "RAVAGER"),
];

impl CreatureKind {
    /// Upper snake case name used by the host and by configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        CATALOGUE
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("UNKNOWN", |(_, name)| *name)
    }

    /// Iterates over every known creature.
    pub fn all() -> impl Iterator<Item = CreatureKind> {
        CATALOGUE.iter().map(|(kind, _)| *kind)
    }
}

impl fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a creature name is not part of the catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown entity type `{0}`")]
pub struct UnknownCreature(pub String);

impl FromStr for CreatureKind {
    type Err = UnknownCreature;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        CATALOGUE
            .iter()
            .find(|(_, name)| *name == normalised)
            .map(|(kind, _)| *kind)
            .ok_or_else(|| UnknownCreature(value.to_owned()))
    }
}
