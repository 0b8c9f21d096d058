use custom_spawners_core::{
    effective_parameters, BlockCoord, CreatureKind, EngineDefaults, EntityKind, MobTag,
    SpawnOverrides, SpawnParameters,
};
use custom_spawners_system_resolver::{dispatch, resolve, CENTRE_OFFSET};
use custom_spawners_world::{query, World};
use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn params(min_radius: i32, max_radius: i32, min_amount: i32, max_amount: i32) -> SpawnParameters {
    let overrides = SpawnOverrides {
        min_radius: Some(min_radius),
        max_radius: Some(max_radius),
        min_amount: Some(min_amount),
        max_amount: Some(max_amount),
        ..SpawnOverrides::default()
    };
    effective_parameters(&overrides, None, &EngineDefaults::default())
}

fn zombie() -> EntityKind {
    EntityKind::Vanilla(CreatureKind::Zombie)
}

#[test]
fn amount_stays_within_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xfeed);
    let params = params(0, 0, 2, 5);
    let mut seen = [false; 6];
    for _ in 0..500 {
        let amount = resolve(&params, &zombie(), &mut rng).amount();
        assert!((2..=5).contains(&amount), "amount {amount} out of bounds");
        seen[amount] = true;
    }
    assert!(seen[2] && seen[5], "both ends of the range should occur");
}

#[test]
fn inverted_amount_range_produces_the_minimum() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let plan = resolve(&params(0, 0, 4, 1), &zombie(), &mut rng);
    assert_eq!(plan.amount(), 4);
}

#[test]
fn zero_radius_places_every_unit_at_the_centre() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let plan = resolve(&params(0, 0, 3, 3), &zombie(), &mut rng);
    assert_eq!(plan.offsets, vec![CENTRE_OFFSET; 3]);
}

#[test]
fn offsets_stay_within_the_maximum_radius() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let params = params(1, 6, 1, 1);
    for _ in 0..2_000 {
        let plan = resolve(&params, &zombie(), &mut rng);
        let (x, z) = plan.offsets[0];
        let distance = (x - 0.5).hypot(z - 0.5);
        assert!(distance <= 6.0 + 1e-9, "distance {distance} exceeds radius");
    }
}

#[test]
fn squared_distance_is_uniform_over_the_disc() {
    const SAMPLES: usize = 20_000;
    const BINS: usize = 10;
    let radius = 8.0;
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let params = params(8, 8, 1, 1);
    let mut histogram = [0usize; BINS];

    for _ in 0..SAMPLES {
        let (x, z) = resolve(&params, &zombie(), &mut rng).offsets[0];
        let normalised = ((x - 0.5).powi(2) + (z - 0.5).powi(2)) / (radius * radius);
        let bin = ((normalised * BINS as f64) as usize).min(BINS - 1);
        histogram[bin] += 1;
    }

    let expected = SAMPLES / BINS;
    for (bin, count) in histogram.iter().enumerate() {
        let deviation = count.abs_diff(expected);
        assert!(
            deviation < expected / 10,
            "bin {bin} holds {count}, expected about {expected}"
        );
    }
}

#[test]
fn dispatch_places_units_relative_to_the_block_corner() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut world = World::new();
    let origin = BlockCoord::new("world", 10, 64, -3);
    let plan = resolve(&params(0, 0, 2, 2), &zombie(), &mut rng);

    let tally = dispatch(&plan, &origin, &mut world);

    assert_eq!(tally.vanilla, 2);
    let spawned = query::spawned_entities(&world);
    assert_eq!(spawned.len(), 2);
    for entity in spawned {
        assert_eq!(entity.location.world, "world");
        assert_eq!(entity.location.position, DVec3::new(10.5, 64.0, -2.5));
    }
}

#[test]
fn failing_units_do_not_stop_the_rest() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let ghoul = EntityKind::Custom(MobTag::new("Ghoul").expect("tag"));
    let mut world = World::new();
    let plan = resolve(&params(0, 0, 3, 3), &ghoul, &mut rng);

    let tally = dispatch(&plan, &BlockCoord::new("world", 0, 0, 0), &mut world);

    assert_eq!(tally.failed, 3);
    assert_eq!(tally.spawned(), 0);

    let mut haunted = World::new().with_custom_mobs(["Ghoul"]);
    let tally = dispatch(&plan, &BlockCoord::new("world", 0, 0, 0), &mut haunted);
    assert_eq!(tally.custom, 3);
}
