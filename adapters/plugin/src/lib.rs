#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Host glue wiring the spawner systems to game-server events.
//!
//! [`SpawnerPlugin`] owns the registry, the scheduler, the ownership ledger,
//! the definition store and the editor sessions. Host event handlers translate
//! block placement, breakage and native spawner activations into calls on
//! those systems and report block mutations as [`Command`] values for the
//! host to apply.

mod item;
mod settings;

use anyhow::{Context, Result};
use custom_spawners_core::{
    effective_parameters, BlockCoord, BlockProbe, Command, Event, HostWorld, PlayerId,
    SpawnParameters, SpawnerBlockData,
};
use custom_spawners_system_editor::{
    apply_edit, DefinitionStore, EditError, EditOutcome, EditTarget, EditorSessions, Submission,
};
use custom_spawners_system_ownership::{
    break_decision, Actor, BreakDecision, Owner, OwnerQuery, OwnershipLedger, OwnershipRecord,
    PlacementSnapshot,
};
use custom_spawners_system_placement::PlacementSender;
use custom_spawners_system_registry::{LoadReport, Registry};
use custom_spawners_system_scheduler::{PassReport, Scheduler, SpawnCounters};

pub use item::{create_item, SpawnerItem};
pub use settings::{Settings, SETTINGS_TABLE};

/// Outcome of a block break handled by the plugin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BreakOutcome {
    /// The block is not a managed spawner; the host proceeds normally.
    Ignored,
    /// The player may not break this spawner; the host must cancel the break.
    Denied,
    /// The spawner was removed. The item is returned when its definition still exists.
    Removed {
        /// Item handed back to the player.
        recovered: Option<SpawnerItem>,
    },
}

/// Outcome of a native spawner activation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeSpawn {
    /// Not a managed spawner; the native spawn proceeds.
    PassThrough,
    /// The native spawn must be cancelled.
    Cancelled {
        /// The placement was missing from the index and has been re-armed.
        rearmed: bool,
    },
}

/// One row of the definition listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefinitionListing {
    /// Definition identifier.
    pub id: String,
    /// Creature name or `mm:<tag>`.
    pub kind: String,
    /// Display name of the spawner item.
    pub display_name: String,
}

/// The spawner plugin as seen by the host.
#[derive(Debug)]
pub struct SpawnerPlugin<L, S> {
    settings: Settings,
    registry: Registry,
    scheduler: Scheduler,
    ledger: L,
    store: S,
    sessions: EditorSessions,
}

impl<L, S> SpawnerPlugin<L, S>
where
    L: OwnershipLedger,
    S: DefinitionStore,
{
    /// Loads definitions and settings from `store` and starts the scheduler.
    pub fn enable(store: S, ledger: L) -> Result<Self> {
        Self::enable_with(store, ledger, |_| {})
    }

    /// Same as [`SpawnerPlugin::enable`], letting the caller adjust the settings read from the store.
    pub fn enable_with<F>(store: S, ledger: L, adjust: F) -> Result<Self>
    where
        F: FnOnce(&mut Settings),
    {
        let source = store
            .load()
            .context("failed to read spawner definitions")?;
        let mut settings: Settings = source
            .section(SETTINGS_TABLE)
            .context("failed to read spawner settings")?;
        adjust(&mut settings);
        let (registry, report) = Registry::load(&source);

        let mut scheduler = Scheduler::new(settings.scheduler_config());
        scheduler.start();

        tracing::info!(
            definitions = report.loaded(),
            skipped = report.skipped().len(),
            tick_interval = settings.tick_interval,
            "custom spawners enabled"
        );

        Ok(Self {
            settings,
            registry,
            scheduler,
            ledger,
            store,
            sessions: EditorSessions::new(),
        })
    }

    /// Stops the scheduler and closes every editor. Calling it twice is harmless.
    pub fn disable(&mut self) {
        self.scheduler.stop();
        self.sessions = EditorSessions::new();
        tracing::info!("custom spawners disabled");
    }

    /// Re-reads the definitions. The current registry is kept if the store cannot be read.
    pub fn reload(&mut self) -> Result<LoadReport> {
        let source = self
            .store
            .load()
            .context("failed to reload spawner definitions")?;
        let report = self.registry.reload(&source);
        tracing::info!(definitions = report.loaded(), "spawner definitions reloaded");
        Ok(report)
    }

    /// Settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Loaded definitions.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Scheduler driving the placements.
    #[must_use]
    pub const fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Ownership ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the ledger.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Handle for queueing placement changes from other threads.
    #[must_use]
    pub fn placement_sender(&self) -> PlacementSender {
        self.scheduler.sender()
    }

    /// Creates the item of a definition, if it exists.
    #[must_use]
    pub fn create_item(&self, spawner_id: &str) -> Option<SpawnerItem> {
        self.registry.lookup(spawner_id).map(create_item)
    }

    /// Handles a spawner item being placed at `coord`.
    ///
    /// Returns the initial countdown, or `None` when the item is not a managed spawner.
    pub fn on_block_place(
        &mut self,
        placer: &Owner,
        coord: &BlockCoord,
        item: &SpawnerItem,
        out_commands: &mut Vec<Command>,
    ) -> Option<i32> {
        let spawner_id = item.spawner_id()?.to_owned();
        out_commands.push(Command::PlaceSpawnerBlock {
            coord: coord.clone(),
            data: item.block.clone(),
        });

        let params = self.parameters_of(&item.block);
        let delay = params.rearm_delay(self.scheduler.config().default_delay());
        let countdown = self.scheduler.register(coord.clone(), delay);
        self.scheduler.record_placement();

        if let Err(error) = self.ledger.add_placement(
            placer.clone(),
            &spawner_id,
            coord.clone(),
            PlacementSnapshot::from(&params),
        ) {
            tracing::warn!(%coord, %error, "failed to record spawner owner");
        }

        tracing::debug!(%coord, %spawner_id, countdown, "spawner placed");
        Some(countdown)
    }

    /// Handles a player breaking the block at `coord`.
    pub fn on_block_break<H>(
        &mut self,
        actor: &Actor,
        coord: &BlockCoord,
        host: &H,
        out_commands: &mut Vec<Command>,
    ) -> BreakOutcome
    where
        H: HostWorld + ?Sized,
    {
        let Some(spawner_id) = managed_spawner(host, coord).and_then(|data| data.spawner_id)
        else {
            return BreakOutcome::Ignored;
        };

        let owner = self.ledger.owner_of(coord).unwrap_or_else(|error| {
            tracing::warn!(%coord, %error, "failed to look up spawner owner");
            None
        });
        if break_decision(actor, owner) == BreakDecision::Denied {
            tracing::debug!(%coord, player = %actor.id, "spawner break denied");
            return BreakOutcome::Denied;
        }

        let _ = self.scheduler.unregister(coord);
        if let Err(error) = self.ledger.remove_placement(coord) {
            tracing::warn!(%coord, %error, "failed to remove spawner owner record");
        }
        out_commands.push(Command::ClearBlock {
            coord: coord.clone(),
        });

        BreakOutcome::Removed {
            recovered: self.create_item(&spawner_id),
        }
    }

    /// Handles the host's native spawner firing at `coord`.
    pub fn on_native_spawn<H>(&mut self, coord: &BlockCoord, host: &H) -> NativeSpawn
    where
        H: HostWorld + ?Sized,
    {
        let Some(data) = managed_spawner(host, coord) else {
            return NativeSpawn::PassThrough;
        };
        if self.scheduler.is_registered(coord) {
            return NativeSpawn::Cancelled { rearmed: false };
        }
        let params = self.parameters_of(&data);
        let delay = params.rearm_delay(self.scheduler.config().default_delay());
        let countdown = self.scheduler.register(coord.clone(), delay);
        tracing::debug!(%coord, countdown, "re-armed managed spawner");
        NativeSpawn::Cancelled { rearmed: true }
    }

    /// Advances the scheduler by one host tick.
    pub fn on_host_tick<H>(&mut self, host: &mut H, out_events: &mut Vec<Event>) -> Option<PassReport>
    where
        H: HostWorld + ?Sized,
    {
        self.scheduler.on_host_tick(&self.registry, host, out_events)
    }

    /// Runs a scheduler pass immediately.
    pub fn run_pass<H>(&mut self, host: &mut H, out_events: &mut Vec<Event>) -> PassReport
    where
        H: HostWorld + ?Sized,
    {
        self.scheduler.run_pass(&self.registry, host, out_events)
    }

    /// Applies an administrative edit, persists it and reloads the registry.
    pub fn edit<H>(
        &mut self,
        target: &EditTarget,
        field: &str,
        raw_value: &str,
        host: &H,
    ) -> Result<EditOutcome, EditError>
    where
        H: HostWorld + ?Sized,
    {
        apply_edit(&mut self.registry, &mut self.store, host, target, field, raw_value)
    }

    /// Opens the editor of the spawner at `coord` for an administrator.
    pub fn open_editor<H>(
        &mut self,
        player: PlayerId,
        coord: &BlockCoord,
        host: &H,
    ) -> Result<String, EditError>
    where
        H: HostWorld + ?Sized,
    {
        self.sessions.open_at(player, coord, &self.registry, host)
    }

    /// Editor sessions, for selecting the field to edit.
    pub fn sessions_mut(&mut self) -> &mut EditorSessions {
        &mut self.sessions
    }

    /// Feeds a chat submission to the player's pending edit.
    pub fn submit_edit(&mut self, player: PlayerId, input: &str) -> Result<Submission, EditError> {
        self.sessions
            .submit(player, input, &mut self.registry, &mut self.store)
    }

    /// Every definition with its kind label, in identifier order.
    #[must_use]
    pub fn list_definitions(&self) -> Vec<DefinitionListing> {
        self.registry
            .iter()
            .map(|definition| DefinitionListing {
                id: definition.id().to_owned(),
                kind: definition.entity().label(),
                display_name: definition.cosmetics().display_name.clone(),
            })
            .collect()
    }

    /// Spawners recorded for a player.
    pub fn list_placements(&self, query: &OwnerQuery) -> Result<Vec<OwnershipRecord>> {
        self.ledger
            .placements_of(query)
            .with_context(|| format!("failed to list spawners for {query:?}"))
    }

    /// Returns the spawn counters accumulated since the last call and resets them.
    pub fn take_counters(&mut self) -> SpawnCounters {
        self.scheduler.take_counters()
    }

    fn parameters_of(&self, data: &SpawnerBlockData) -> SpawnParameters {
        let definition = data
            .spawner_id
            .as_deref()
            .and_then(|id| self.registry.lookup(id));
        effective_parameters(&data.overrides, definition, self.scheduler.engine_defaults())
    }
}

fn managed_spawner<H>(host: &H, coord: &BlockCoord) -> Option<SpawnerBlockData>
where
    H: HostWorld + ?Sized,
{
    match host.probe(coord) {
        BlockProbe::Spawner(data) if data.is_managed() => Some(data.clone()),
        BlockProbe::Spawner(_) | BlockProbe::Missing | BlockProbe::Foreign => None,
    }
}
