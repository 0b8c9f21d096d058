use custom_spawners_core::SpawnTally;

/// Running totals reported to periodic metric collectors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnCounters {
    placements: u64,
    vanilla: u64,
    custom: u64,
    failed: u64,
}

impl SpawnCounters {
    /// Spawner blocks placed since the last reset.
    #[must_use]
    pub const fn placements(&self) -> u64 {
        self.placements
    }

    /// Built-in creatures spawned since the last reset.
    #[must_use]
    pub const fn vanilla(&self) -> u64 {
        self.vanilla
    }

    /// Custom mobs spawned since the last reset.
    #[must_use]
    pub const fn custom(&self) -> u64 {
        self.custom
    }

    /// Units the host refused since the last reset.
    #[must_use]
    pub const fn failed(&self) -> u64 {
        self.failed
    }

    pub(crate) fn record_placement(&mut self) {
        self.placements = self.placements.saturating_add(1);
    }

    pub(crate) fn absorb(&mut self, tally: SpawnTally) {
        self.vanilla = self.vanilla.saturating_add(u64::from(tally.vanilla));
        self.custom = self.custom.saturating_add(u64::from(tally.custom));
        self.failed = self.failed.saturating_add(u64::from(tally.failed));
    }

    /// Returns the current totals and resets them to zero.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}
