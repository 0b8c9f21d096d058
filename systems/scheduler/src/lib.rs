#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick scheduler that drives every registered spawner placement.
//!
//! The host calls [`Scheduler::on_host_tick`] once per game tick. Every
//! `tick_interval` ticks the scheduler runs one pass over the placement index
//! in coordinate order: it evicts placements whose block vanished, gates the
//! countdown on player proximity, and fires due placements through the spawn
//! resolver before re-arming them.

mod counters;

use custom_spawners_core::{
    effective_parameters, BlockCoord, BlockProbe, EngineDefaults, Event, HostWorld,
    SpawnParameters, SpawnTally, SpawnerBlockData, DEFAULT_DELAY_TICKS,
};
use custom_spawners_system_placement::{PlacementInbox, PlacementIndex, PlacementSender};
use custom_spawners_system_registry::Registry;
use custom_spawners_system_resolver as resolver;
use glam::DVec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use counters::SpawnCounters;

/// Host ticks per pass when nothing else is configured.
pub const DEFAULT_TICK_INTERVAL: u32 = 20;

/// Configuration parameters required to construct the scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    tick_interval: u32,
    default_delay: i32,
    max_spawns_per_pass: u32,
    rng_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL, 0)
    }
}

impl Config {
    /// Creates a configuration with the provided pass cadence and seed.
    #[must_use]
    pub const fn new(tick_interval: u32, rng_seed: u64) -> Self {
        Self {
            tick_interval: if tick_interval == 0 { 1 } else { tick_interval },
            default_delay: DEFAULT_DELAY_TICKS,
            max_spawns_per_pass: 0,
            rng_seed,
        }
    }

    /// Replaces the fallback delay used for non-positive intervals.
    #[must_use]
    pub const fn with_default_delay(mut self, default_delay: i32) -> Self {
        self.default_delay = if default_delay > 0 {
            default_delay
        } else {
            DEFAULT_DELAY_TICKS
        };
        self
    }

    /// Caps the number of entities created per pass. Zero disables the cap.
    #[must_use]
    pub const fn with_spawn_budget(mut self, max_spawns_per_pass: u32) -> Self {
        self.max_spawns_per_pass = max_spawns_per_pass;
        self
    }

    /// Host ticks between two passes.
    #[must_use]
    pub const fn tick_interval(&self) -> u32 {
        self.tick_interval
    }

    /// Fallback delay in ticks.
    #[must_use]
    pub const fn default_delay(&self) -> i32 {
        self.default_delay
    }

    /// Entity cap per pass, zero when unlimited.
    #[must_use]
    pub const fn max_spawns_per_pass(&self) -> u32 {
        self.max_spawns_per_pass
    }

    /// Seed of the spawn random source.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// Summary of a single pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Placements that fired.
    pub fired: usize,
    /// Placements dropped because their block vanished.
    pub evicted: usize,
    /// Due placements postponed by the spawn budget.
    pub deferred: usize,
    /// Entities created and refused during the pass.
    pub tally: SpawnTally,
}

/// Periodic driver owning the placement index.
#[derive(Debug)]
pub struct Scheduler {
    config: Config,
    defaults: EngineDefaults,
    index: PlacementIndex,
    inbox: PlacementInbox,
    rng: ChaCha8Rng,
    running: bool,
    ticks_since_pass: u32,
    counters: SpawnCounters,
}

impl Scheduler {
    /// Creates a stopped scheduler using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            defaults: EngineDefaults {
                delay: config.default_delay,
                ..EngineDefaults::default()
            },
            index: PlacementIndex::new(config.default_delay),
            inbox: PlacementInbox::new(),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            running: false,
            ticks_since_pass: 0,
            counters: SpawnCounters::default(),
        }
    }

    /// Configuration the scheduler was built with.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Last-resort parameters applied when neither block nor definition provides a value.
    #[must_use]
    pub const fn engine_defaults(&self) -> &EngineDefaults {
        &self.defaults
    }

    /// Arms the driver. Starting a running scheduler has no effect.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.ticks_since_pass = 0;
        tracing::info!(
            tick_interval = self.config.tick_interval,
            "spawner scheduler started"
        );
    }

    /// Halts future passes and forgets every placement and queued request.
    pub fn stop(&mut self) {
        let discarded = self.inbox.discard();
        let forgotten = self.index.len();
        self.index.clear();
        self.ticks_since_pass = 0;
        if self.running {
            self.running = false;
            tracing::info!(forgotten, discarded, "spawner scheduler stopped");
        }
    }

    /// Reports whether passes are currently running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Returns a handle that queues placement requests from any thread.
    #[must_use]
    pub fn sender(&self) -> PlacementSender {
        self.inbox.sender()
    }

    /// Registers a placement from the tick context.
    pub fn register(&mut self, coord: BlockCoord, countdown: i32) -> i32 {
        self.index.register(coord, countdown)
    }

    /// Removes a placement from the tick context.
    pub fn unregister(&mut self, coord: &BlockCoord) -> bool {
        self.index.unregister(coord)
    }

    /// Reports whether a placement exists at the coordinate.
    #[must_use]
    pub fn is_registered(&self, coord: &BlockCoord) -> bool {
        self.index.is_registered(coord)
    }

    /// Remaining ticks of a placement.
    #[must_use]
    pub fn countdown(&self, coord: &BlockCoord) -> Option<i32> {
        self.index.countdown(coord)
    }

    /// Read-only view of the placement index.
    #[must_use]
    pub const fn placements(&self) -> &PlacementIndex {
        &self.index
    }

    /// Counts a spawner block placement.
    pub fn record_placement(&mut self) {
        self.counters.record_placement();
    }

    /// Current counter values.
    #[must_use]
    pub const fn counters(&self) -> &SpawnCounters {
        &self.counters
    }

    /// Returns the counters and resets them.
    pub fn take_counters(&mut self) -> SpawnCounters {
        self.counters.take()
    }

    /// Advances the driver by one host tick, running a pass when the interval elapses.
    ///
    /// Returns the report of the pass if one ran.
    pub fn on_host_tick<H>(
        &mut self,
        registry: &Registry,
        host: &mut H,
        out_events: &mut Vec<Event>,
    ) -> Option<PassReport>
    where
        H: HostWorld + ?Sized,
    {
        if !self.running {
            return None;
        }
        self.ticks_since_pass += 1;
        if self.ticks_since_pass < self.config.tick_interval {
            return None;
        }
        self.ticks_since_pass = 0;
        Some(self.run_pass(registry, host, out_events))
    }

    /// Evaluates every placement once. A stopped scheduler does nothing.
    pub fn run_pass<H>(
        &mut self,
        registry: &Registry,
        host: &mut H,
        out_events: &mut Vec<Event>,
    ) -> PassReport
    where
        H: HostWorld + ?Sized,
    {
        let mut report = PassReport::default();
        if !self.running {
            return report;
        }

        let _ = self.inbox.drain_into(&mut self.index, out_events);

        let decrement = i32::try_from(self.config.tick_interval).unwrap_or(i32::MAX);
        for coord in self.index.coords() {
            let Some(data) = spawner_data(host, &coord) else {
                let _ = self.index.unregister(&coord);
                tracing::debug!(%coord, "evicting placement whose spawner block is gone");
                out_events.push(Event::PlacementEvicted { coord });
                report.evicted += 1;
                continue;
            };

            let definition = data
                .spawner_id
                .as_deref()
                .and_then(|id| registry.lookup(id));
            let params = effective_parameters(&data.overrides, definition, &self.defaults);

            if !player_in_range(host, &coord, params.required_player_range) {
                continue;
            }

            let remaining = self
                .index
                .countdown(&coord)
                .unwrap_or(self.config.default_delay)
                .saturating_sub(decrement);
            if remaining > 0 {
                let _ = self.index.store_countdown(&coord, remaining);
                continue;
            }

            match self.fire(&coord, &params, host, &report) {
                Firing::Deferred => {
                    let _ = self.index.store_countdown(&coord, 0);
                    report.deferred += 1;
                    continue;
                }
                Firing::Fired(tally) => {
                    report.fired += 1;
                    report.tally.absorb(tally);
                    self.counters.absorb(tally);
                    out_events.push(Event::SpawnerFired {
                        coord: coord.clone(),
                        tally,
                    });
                }
            }

            let rearm = params.rearm_delay(self.config.default_delay);
            let _ = self.index.store_countdown(&coord, rearm);
        }

        report
    }

    fn fire<H>(
        &mut self,
        coord: &BlockCoord,
        params: &SpawnParameters,
        host: &mut H,
        report: &PassReport,
    ) -> Firing
    where
        H: HostWorld + ?Sized,
    {
        let Some(kind) = params.entity.as_ref() else {
            tracing::warn!(%coord, "spawner has no entity type; skipping firing");
            return Firing::Fired(SpawnTally::default());
        };

        let plan = resolver::resolve(params, kind, &mut self.rng);
        if !self.fits_budget(report, plan.amount()) {
            tracing::debug!(%coord, amount = plan.amount(), "spawn budget exhausted; deferring");
            return Firing::Deferred;
        }

        let tally = resolver::dispatch(&plan, coord, host);
        tracing::debug!(%coord, kind = %kind, spawned = tally.spawned(), "spawner fired");
        Firing::Fired(tally)
    }

    fn fits_budget(&self, report: &PassReport, amount: usize) -> bool {
        let budget = self.config.max_spawns_per_pass;
        let spent = report.tally.spawned().saturating_add(report.tally.failed);
        if budget == 0 || spent == 0 {
            return true;
        }
        let amount = u32::try_from(amount).unwrap_or(u32::MAX);
        spent.saturating_add(amount) <= budget
    }
}

enum Firing {
    Fired(SpawnTally),
    Deferred,
}

fn spawner_data<H>(host: &H, coord: &BlockCoord) -> Option<SpawnerBlockData>
where
    H: HostWorld + ?Sized,
{
    match host.probe(coord) {
        BlockProbe::Spawner(data) => Some(data.clone()),
        BlockProbe::Missing | BlockProbe::Foreign => None,
    }
}

/// Reports whether any player in the placement's world stands within `range` of the block.
///
/// A non-positive range disables the gate.
fn player_in_range<H>(host: &H, coord: &BlockCoord, range: i32) -> bool
where
    H: HostWorld + ?Sized,
{
    if range <= 0 {
        return true;
    }
    let origin: DVec3 = coord.corner();
    let limit = f64::from(range) * f64::from(range);
    host.player_positions(coord.world())
        .into_iter()
        .any(|position| position.distance_squared(origin) <= limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_tick_interval_is_raised_to_one() {
        assert_eq!(Config::new(0, 1).tick_interval(), 1);
    }

    #[test]
    fn stopped_scheduler_ignores_passes() {
        struct Empty;
        impl HostWorld for Empty {
            fn probe(&self, _: &BlockCoord) -> BlockProbe<'_> {
                BlockProbe::Missing
            }
            fn player_positions(&self, _: &str) -> Vec<DVec3> {
                Vec::new()
            }
            fn spawn_entity(
                &mut self,
                _: &custom_spawners_core::EntityKind,
                _: &custom_spawners_core::SpawnLocation,
            ) -> Result<(), custom_spawners_core::SpawnFailure> {
                Ok(())
            }
        }

        let mut scheduler = Scheduler::new(Config::default());
        let _ = scheduler.register(BlockCoord::new("world", 0, 0, 0), 10);
        let mut events = Vec::new();
        let report = scheduler.run_pass(&Registry::new(), &mut Empty, &mut events);
        assert_eq!(report, PassReport::default());
        assert!(events.is_empty());
        assert!(scheduler.is_registered(&BlockCoord::new("world", 0, 0, 0)));
    }
}
