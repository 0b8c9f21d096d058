#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawn resolver turning fired placement parameters into entity creation requests.
//!
//! [`resolve`] is pure given the random source: it picks the number of units
//! and a horizontal offset for each one. [`dispatch`] forwards the plan to the
//! host one unit at a time and never lets a failing unit stop the rest.

use std::f64::consts::TAU;

use custom_spawners_core::{
    BlockCoord, EntityKind, HostWorld, SpawnLocation, SpawnParameters, SpawnTally,
};
use glam::DVec3;
use rand::Rng;

/// Horizontal offset of the block centre relative to its corner.
pub const CENTRE_OFFSET: (f64, f64) = (0.5, 0.5);

/// Units to create for one firing.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnPlan {
    /// Kind produced by every unit.
    pub kind: EntityKind,
    /// Horizontal `(x, z)` offsets from the block corner, one per unit.
    pub offsets: Vec<(f64, f64)>,
}

impl SpawnPlan {
    /// Number of units in the plan.
    #[must_use]
    pub fn amount(&self) -> usize {
        self.offsets.len()
    }
}

/// Computes how many units to create and where.
pub fn resolve<R>(params: &SpawnParameters, kind: &EntityKind, rng: &mut R) -> SpawnPlan
where
    R: Rng + ?Sized,
{
    let amount = resolve_amount(params, rng);
    let offsets = (0..amount).map(|_| resolve_offset(params, rng)).collect();
    SpawnPlan {
        kind: kind.clone(),
        offsets,
    }
}

/// Number of units for one firing, never below one.
pub fn resolve_amount<R>(params: &SpawnParameters, rng: &mut R) -> u32
where
    R: Rng + ?Sized,
{
    let min = params.min_amount.max(1);
    let max = params.max_amount.max(min);
    let amount = if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    };
    u32::try_from(amount).unwrap_or(1)
}

/// Offset of a single unit, uniform over the disc of the drawn radius.
pub fn resolve_offset<R>(params: &SpawnParameters, rng: &mut R) -> (f64, f64)
where
    R: Rng + ?Sized,
{
    if params.max_radius <= 0 {
        return CENTRE_OFFSET;
    }
    let max = params.max_radius;
    let min = params.min_radius.clamp(0, max);
    let radius = if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    };

    let angle = rng.gen_range(0.0..TAU);
    let distance = rng.gen::<f64>().sqrt() * f64::from(radius);
    (
        CENTRE_OFFSET.0 + angle.cos() * distance,
        CENTRE_OFFSET.1 + angle.sin() * distance,
    )
}

/// Requests one entity per planned unit from the host.
pub fn dispatch<H>(plan: &SpawnPlan, origin: &BlockCoord, host: &mut H) -> SpawnTally
where
    H: HostWorld + ?Sized,
{
    let corner = origin.corner();
    let mut tally = SpawnTally::default();
    for &(dx, dz) in &plan.offsets {
        let location = SpawnLocation {
            world: origin.world().to_owned(),
            position: corner + DVec3::new(dx, 0.0, dz),
        };
        match host.spawn_entity(&plan.kind, &location) {
            Ok(()) => tally.record_success(&plan.kind),
            Err(error) => {
                tracing::warn!(%origin, kind = %plan.kind, %error, "failed to spawn unit");
                tally.record_failure();
            }
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use custom_spawners_core::{EngineDefaults, SpawnOverrides};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn params() -> SpawnParameters {
        custom_spawners_core::effective_parameters(
            &SpawnOverrides::default(),
            None,
            &EngineDefaults::default(),
        )
    }

    #[test]
    fn non_positive_amounts_clamp_to_one() {
        let mut params = params();
        params.min_amount = -4;
        params.max_amount = 0;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(resolve_amount(&params, &mut rng), 1);
    }

    #[test]
    fn inverted_radius_uses_the_maximum() {
        let mut params = params();
        params.min_radius = 9;
        params.max_radius = 2;
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let (x, z) = resolve_offset(&params, &mut rng);
            let distance = (x - 0.5).hypot(z - 0.5);
            assert!(distance <= 2.0 + 1e-9, "offset escaped radius: {distance}");
        }
    }
}
