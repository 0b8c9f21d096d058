use custom_spawners_core::{
    EntityKind, SpawnOverrides, SpawnerBlockData, SpawnerDefinition,
};

/// Spawner item handed to players; placing it transfers `block` into the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnerItem {
    /// Item material.
    pub material: String,
    /// Display name, colour codes untouched.
    pub display_name: String,
    /// Lore lines.
    pub lore: Vec<String>,
    /// Data copied into the placed block.
    pub block: SpawnerBlockData,
}

impl SpawnerItem {
    /// Definition the item was created from.
    #[must_use]
    pub fn spawner_id(&self) -> Option<&str> {
        self.block.spawner_id.as_deref()
    }
}

/// Builds the item for a definition, baking its radius and amount into the block data.
///
/// Delay and player range stay unset so placed blocks follow the live definition.
#[must_use]
pub fn create_item(definition: &SpawnerDefinition) -> SpawnerItem {
    let bounds = definition.bounds();
    let overrides = SpawnOverrides {
        entity: match definition.entity() {
            EntityKind::Custom(tag) => Some(EntityKind::Custom(tag.clone())),
            EntityKind::Vanilla(_) => None,
        },
        delay: None,
        required_player_range: None,
        min_radius: Some(saturate(bounds.min_radius())),
        max_radius: Some(saturate(bounds.max_radius())),
        min_amount: Some(saturate(bounds.min_amount())),
        max_amount: Some(saturate(bounds.max_amount())),
    };
    let cosmetics = definition.cosmetics();
    SpawnerItem {
        material: cosmetics.material.clone(),
        display_name: cosmetics.display_name.clone(),
        lore: cosmetics.lore.clone(),
        block: SpawnerBlockData {
            spawner_id: Some(definition.id().to_owned()),
            overrides,
        },
    }
}

fn saturate(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
