use custom_spawners_core::{
    BlockCoord, Command, CreatureKind, EntityKind, Event, PlayerId, SpawnOverrides,
    SpawnerBlockData,
};
use custom_spawners_system_registry::{DefinitionSource, Registry};
use custom_spawners_system_scheduler::{Config, Scheduler};
use custom_spawners_world::{self as world, query, World};
use glam::DVec3;
use uuid::Uuid;

fn origin() -> BlockCoord {
    BlockCoord::new("world", 0, 64, 0)
}

fn place(world: &mut World, coord: &BlockCoord, overrides: SpawnOverrides) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::PlaceSpawnerBlock {
            coord: coord.clone(),
            data: SpawnerBlockData {
                spawner_id: Some("inline".to_owned()),
                overrides,
            },
        },
        &mut events,
    );
}

fn move_player(world: &mut World, position: DVec3) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::MovePlayer {
            player: PlayerId::new(Uuid::from_u128(7)),
            name: "Alex".to_owned(),
            world: "world".to_owned(),
            position,
        },
        &mut events,
    );
}

fn pig_overrides(delay: i32, range: i32, amount: i32) -> SpawnOverrides {
    SpawnOverrides {
        entity: Some(EntityKind::Vanilla(CreatureKind::Pig)),
        delay: Some(delay),
        required_player_range: Some(range),
        min_radius: Some(0),
        max_radius: Some(0),
        min_amount: Some(amount),
        max_amount: Some(amount),
    }
}

fn running(config: Config) -> Scheduler {
    let mut scheduler = Scheduler::new(config);
    scheduler.start();
    scheduler
}

#[test]
fn fires_exactly_once_per_interval_with_centred_units() {
    let mut world = World::new();
    place(&mut world, &origin(), pig_overrides(200, 16, 2));
    move_player(&mut world, DVec3::new(3.0, 64.0, 0.0));

    let registry = Registry::new();
    let mut scheduler = running(Config::new(20, 1));
    let _ = scheduler.register(origin(), 200);

    let mut events = Vec::new();
    let mut fired = 0;
    for _ in 0..200 {
        if let Some(report) = scheduler.on_host_tick(&registry, &mut world, &mut events) {
            fired += report.fired;
        }
    }

    assert_eq!(fired, 1);
    let spawned = query::spawned_entities(&world);
    assert_eq!(spawned.len(), 2);
    for entity in spawned {
        assert_eq!(entity.location.position, DVec3::new(0.5, 64.0, 0.5));
    }
    assert_eq!(scheduler.countdown(&origin()), Some(200));
}

#[test]
fn countdown_holds_while_no_player_is_in_range() {
    let mut world = World::new();
    place(&mut world, &origin(), pig_overrides(100, 5, 1));
    move_player(&mut world, DVec3::new(6.0, 64.0, 0.0));

    let registry = Registry::new();
    let mut scheduler = running(Config::new(20, 1));
    let _ = scheduler.register(origin(), 100);
    let mut events = Vec::new();

    for _ in 0..10 {
        let _ = scheduler.run_pass(&registry, &mut world, &mut events);
    }
    assert_eq!(scheduler.countdown(&origin()), Some(100));

    move_player(&mut world, DVec3::new(5.0, 64.0, 0.0));
    let _ = scheduler.run_pass(&registry, &mut world, &mut events);
    assert_eq!(scheduler.countdown(&origin()), Some(80));
}

#[test]
fn players_in_other_worlds_do_not_count() {
    let mut world = World::new();
    place(&mut world, &origin(), pig_overrides(100, 5, 1));
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::MovePlayer {
            player: PlayerId::new(Uuid::from_u128(9)),
            name: "Sam".to_owned(),
            world: "world_nether".to_owned(),
            position: DVec3::new(0.0, 64.0, 0.0),
        },
        &mut events,
    );

    let mut scheduler = running(Config::new(20, 1));
    let _ = scheduler.register(origin(), 100);
    let _ = scheduler.run_pass(&Registry::new(), &mut world, &mut events);
    assert_eq!(scheduler.countdown(&origin()), Some(100));
}

#[test]
fn non_positive_range_disables_the_proximity_gate() {
    let mut world = World::new();
    place(&mut world, &origin(), pig_overrides(40, 0, 1));

    let mut scheduler = running(Config::new(20, 1));
    let _ = scheduler.register(origin(), 40);
    let mut events = Vec::new();
    let _ = scheduler.run_pass(&Registry::new(), &mut world, &mut events);
    let report = scheduler.run_pass(&Registry::new(), &mut world, &mut events);

    assert_eq!(report.fired, 1);
    assert_eq!(query::spawned_entities(&world).len(), 1);
}

#[test]
fn vanished_blocks_are_evicted() {
    let mut world = World::new();
    let stone = BlockCoord::new("world", 4, 64, 4);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::PlaceForeignBlock {
            coord: stone.clone(),
        },
        &mut events,
    );

    let mut scheduler = running(Config::new(20, 1));
    let _ = scheduler.register(origin(), 100);
    let _ = scheduler.register(stone.clone(), 100);
    events.clear();

    let report = scheduler.run_pass(&Registry::new(), &mut world, &mut events);

    assert_eq!(report.evicted, 2);
    assert!(scheduler.placements().is_empty());
    assert_eq!(
        events,
        vec![
            Event::PlacementEvicted { coord: origin() },
            Event::PlacementEvicted { coord: stone },
        ]
    );
}

#[test]
fn failed_units_still_reset_the_countdown() {
    let mut world = World::new();
    world.refuse_spawns_of(EntityKind::Vanilla(CreatureKind::Pig));
    place(&mut world, &origin(), pig_overrides(60, 0, 3));

    let mut scheduler = running(Config::new(20, 1));
    let _ = scheduler.register(origin(), 20);
    let mut events = Vec::new();
    let report = scheduler.run_pass(&Registry::new(), &mut world, &mut events);

    assert_eq!(report.fired, 1);
    assert_eq!(report.tally.failed, 3);
    assert_eq!(scheduler.countdown(&origin()), Some(60));
    assert_eq!(scheduler.counters().failed(), 3);
}

#[test]
fn a_refused_placement_leaves_its_neighbours_alone() {
    let mut world = World::new();
    world.refuse_spawns_of(EntityKind::Vanilla(CreatureKind::Pig));
    let pigs = BlockCoord::new("world", 0, 64, 0);
    let cows = BlockCoord::new("world", 2, 64, 0);
    place(&mut world, &pigs, pig_overrides(60, 0, 2));
    place(
        &mut world,
        &cows,
        SpawnOverrides {
            entity: Some(EntityKind::Vanilla(CreatureKind::Cow)),
            ..pig_overrides(90, 0, 2)
        },
    );

    let mut scheduler = running(Config::new(20, 1));
    let _ = scheduler.register(pigs.clone(), 20);
    let _ = scheduler.register(cows.clone(), 20);
    let mut events = Vec::new();
    let report = scheduler.run_pass(&Registry::new(), &mut world, &mut events);

    assert_eq!(report.fired, 2);
    assert_eq!((report.tally.failed, report.tally.vanilla), (2, 2));
    assert_eq!(scheduler.countdown(&pigs), Some(60));
    assert_eq!(scheduler.countdown(&cows), Some(90));
    assert!(query::spawned_entities(&world)
        .iter()
        .all(|entity| entity.kind == EntityKind::Vanilla(CreatureKind::Cow)));
}

#[test]
fn missing_entity_kind_fires_nothing_but_resets() {
    let mut world = World::new();
    let overrides = SpawnOverrides {
        entity: None,
        ..pig_overrides(80, 0, 1)
    };
    place(&mut world, &origin(), overrides);

    let mut scheduler = running(Config::new(20, 1));
    let _ = scheduler.register(origin(), 20);
    let mut events = Vec::new();
    let _ = scheduler.run_pass(&Registry::new(), &mut world, &mut events);

    assert!(query::spawned_entities(&world).is_empty());
    assert_eq!(scheduler.countdown(&origin()), Some(80));
}

#[test]
fn definitions_supply_parameters_the_block_leaves_unset() {
    let source = DefinitionSource::parse(
        "[spawners.cow_field]\nentity-type = \"COW\"\ndelay = 40\nrequired-player-range = 0\nmin-amount = 2\n",
    )
    .expect("valid document");
    let (registry, _) = Registry::load(&source);

    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::PlaceSpawnerBlock {
            coord: origin(),
            data: SpawnerBlockData {
                spawner_id: Some("COW_FIELD".to_owned()),
                overrides: SpawnOverrides::default(),
            },
        },
        &mut events,
    );

    let mut scheduler = running(Config::new(20, 1));
    let _ = scheduler.register(origin(), 20);
    let report = scheduler.run_pass(&registry, &mut world, &mut events);

    assert_eq!(report.tally.vanilla, 2);
    assert!(query::spawned_entities(&world)
        .iter()
        .all(|entity| entity.kind == EntityKind::Vanilla(CreatureKind::Cow)));
    assert_eq!(scheduler.countdown(&origin()), Some(40));
}

#[test]
fn spawn_budget_defers_placements_that_do_not_fit() {
    let mut world = World::new();
    let first = BlockCoord::new("world", 0, 64, 0);
    let second = BlockCoord::new("world", 1, 64, 0);
    place(&mut world, &first, pig_overrides(100, 0, 3));
    place(&mut world, &second, pig_overrides(100, 0, 3));

    let mut scheduler = running(Config::new(20, 1).with_spawn_budget(4));
    let _ = scheduler.register(first.clone(), 20);
    let _ = scheduler.register(second.clone(), 20);
    let mut events = Vec::new();

    let report = scheduler.run_pass(&Registry::new(), &mut world, &mut events);
    assert_eq!((report.fired, report.deferred), (1, 1));
    assert_eq!(scheduler.countdown(&first), Some(100));
    assert_eq!(scheduler.countdown(&second), Some(0));

    let report = scheduler.run_pass(&Registry::new(), &mut world, &mut events);
    assert_eq!(report.fired, 1);
    assert_eq!(scheduler.countdown(&second), Some(100));
    assert_eq!(query::spawned_entities(&world).len(), 6);
}

#[test]
fn oversized_firing_still_proceeds_when_first_in_pass() {
    let mut world = World::new();
    place(&mut world, &origin(), pig_overrides(100, 0, 5));

    let mut scheduler = running(Config::new(20, 1).with_spawn_budget(2));
    let _ = scheduler.register(origin(), 20);
    let mut events = Vec::new();
    let report = scheduler.run_pass(&Registry::new(), &mut world, &mut events);

    assert_eq!(report.fired, 1);
    assert_eq!(report.tally.vanilla, 5);
}

#[test]
fn entityless_firings_do_not_use_up_the_oversize_exemption() {
    let mut world = World::new();
    let empty = BlockCoord::new("world", 0, 64, 0);
    let crowd = BlockCoord::new("world", 1, 64, 0);
    place(
        &mut world,
        &empty,
        SpawnOverrides {
            entity: None,
            ..pig_overrides(100, 0, 1)
        },
    );
    place(&mut world, &crowd, pig_overrides(100, 0, 5));

    let mut scheduler = running(Config::new(20, 1).with_spawn_budget(2));
    let _ = scheduler.register(empty.clone(), 20);
    let _ = scheduler.register(crowd.clone(), 20);
    let mut events = Vec::new();
    let report = scheduler.run_pass(&Registry::new(), &mut world, &mut events);

    assert_eq!((report.fired, report.deferred), (2, 0));
    assert_eq!(report.tally.vanilla, 5);
    assert_eq!(scheduler.countdown(&crowd), Some(100));
}

#[test]
fn queued_requests_are_applied_before_the_pass() {
    let mut world = World::new();
    place(&mut world, &origin(), pig_overrides(100, 0, 1));

    let mut scheduler = running(Config::new(20, 1));
    let sender = scheduler.sender();
    assert!(sender.register(origin(), 30));
    let mut events = Vec::new();
    let _ = scheduler.run_pass(&Registry::new(), &mut world, &mut events);

    assert_eq!(scheduler.countdown(&origin()), Some(10));
    assert_eq!(
        events.first(),
        Some(&Event::PlacementArmed {
            coord: origin(),
            countdown: 30,
        })
    );
}

#[test]
fn stop_is_idempotent_and_clears_state() {
    let mut world = World::new();
    place(&mut world, &origin(), pig_overrides(20, 0, 1));

    let mut scheduler = running(Config::new(1, 1));
    let _ = scheduler.register(origin(), 20);
    let _ = scheduler.sender().register(BlockCoord::new("world", 9, 9, 9), 20);

    scheduler.stop();
    scheduler.stop();
    assert!(!scheduler.is_running());
    assert!(scheduler.placements().is_empty());

    let mut events = Vec::new();
    assert!(scheduler
        .on_host_tick(&Registry::new(), &mut world, &mut events)
        .is_none());

    scheduler.start();
    let _ = scheduler.run_pass(&Registry::new(), &mut world, &mut events);
    assert!(scheduler.placements().is_empty(), "discarded requests must not resurface");
    assert!(query::spawned_entities(&world).is_empty());
}

#[test]
fn counters_reset_when_taken() {
    let mut world = World::new();
    place(&mut world, &origin(), pig_overrides(20, 0, 2));

    let mut scheduler = running(Config::new(20, 1));
    scheduler.record_placement();
    let _ = scheduler.register(origin(), 20);
    let mut events = Vec::new();
    let _ = scheduler.run_pass(&Registry::new(), &mut world, &mut events);

    let taken = scheduler.take_counters();
    assert_eq!((taken.placements(), taken.vanilla()), (1, 2));
    assert_eq!(scheduler.counters().vanilla(), 0);
}
