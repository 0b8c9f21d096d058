#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the spawner engine against a simulated world.

use std::{collections::BTreeMap, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use custom_spawners_core::{BlockCoord, Command, EntityKind, Event, PlayerId};
use custom_spawners_plugin::SpawnerPlugin;
use custom_spawners_system_editor::{DefinitionStore, TomlFileStore};
use custom_spawners_system_ownership::{MemoryLedger, Owner};
use custom_spawners_world::{self as world, query, World};
use glam::DVec3;
use tracing::Level;
use uuid::Uuid;

const SIMULATION_WORLD: &str = "world";
const SPAWNER_SPACING: i32 = 4;
const SPAWNER_HEIGHT: i32 = 64;

/// Simulates custom spawners placed side by side next to a single player.
#[derive(Debug, Parser)]
#[command(name = "custom-spawners", version, about)]
struct Cli {
    /// Definition document to load.
    #[arg(short, long, default_value = "config/spawners.toml")]
    config: PathBuf,
    /// Host ticks to simulate.
    #[arg(short, long, default_value_t = 1200)]
    ticks: u32,
    /// Overrides the seed from the settings table.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulates a server without the custom mob provider.
    #[arg(long)]
    no_mob_provider: bool,
    /// Logs every eviction and firing.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the custom spawners command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let seed = cli.seed;
    let store = TomlFileStore::new(&cli.config);
    let mut plugin = SpawnerPlugin::enable_with(store, MemoryLedger::new(), |settings| {
        if seed.is_some() {
            settings.seed = seed;
        }
    })
    .with_context(|| format!("failed to enable spawners from {}", cli.config.display()))?;

    let listings = plugin.list_definitions();
    if listings.is_empty() {
        bail!("{} defines no usable spawners", cli.config.display());
    }

    let mut host = build_world(&plugin, cli.no_mob_provider);
    let player = Owner {
        id: PlayerId::new(Uuid::from_u128(1)),
        name: "Steve".to_owned(),
    };
    let mut events = Vec::new();
    world::apply(
        &mut host,
        Command::MovePlayer {
            player: player.id,
            name: player.name.clone(),
            world: SIMULATION_WORLD.to_owned(),
            position: DVec3::new(0.0, f64::from(SPAWNER_HEIGHT), 2.0),
        },
        &mut events,
    );

    let mut placed = BTreeMap::new();
    for (slot, listing) in (0_i32..).zip(&listings) {
        let Some(item) = plugin.create_item(&listing.id) else {
            continue;
        };
        let coord = BlockCoord::new(
            SIMULATION_WORLD,
            slot * SPAWNER_SPACING,
            SPAWNER_HEIGHT,
            0,
        );
        let mut commands = Vec::new();
        if plugin
            .on_block_place(&player, &coord, &item, &mut commands)
            .is_some()
        {
            for command in commands {
                world::apply(&mut host, command, &mut events);
            }
            let _ = placed.insert(coord, listing.id.clone());
        }
    }
    tracing::info!(spawners = placed.len(), ticks = cli.ticks, "simulation started");

    events.clear();
    let mut passes = 0_u32;
    for _ in 0..cli.ticks {
        if plugin.on_host_tick(&mut host, &mut events).is_some() {
            passes += 1;
        }
    }

    let mut firings: BTreeMap<&BlockCoord, u32> = BTreeMap::new();
    for event in &events {
        if let Event::SpawnerFired { coord, .. } = event {
            *firings.entry(coord).or_default() += 1;
        }
    }

    println!("{passes} passes over {} host ticks", cli.ticks);
    for (coord, id) in &placed {
        let fired = firings.get(coord).copied().unwrap_or_default();
        println!("  {id:<20} at {:<20} fired {fired} time(s)", coord.to_string());
    }
    let counters = plugin.take_counters();
    println!(
        "spawned {} vanilla and {} custom mobs, {} failed",
        counters.vanilla(),
        counters.custom(),
        counters.failed()
    );
    println!("{} entities in the world", query::spawned_entities(&host).len());

    plugin.disable();
    Ok(())
}

fn build_world<L, S>(plugin: &SpawnerPlugin<L, S>, without_provider: bool) -> World
where
    L: custom_spawners_system_ownership::OwnershipLedger,
    S: DefinitionStore,
{
    if without_provider {
        return World::new();
    }
    let tags: Vec<String> = plugin
        .registry()
        .iter()
        .filter_map(|definition| match definition.entity() {
            EntityKind::Custom(tag) => Some(tag.as_str().to_owned()),
            EntityKind::Vanilla(_) => None,
        })
        .collect();
    World::new().with_custom_mobs(tags)
}
