use custom_spawners_core::DEFAULT_DELAY_TICKS;
use custom_spawners_system_scheduler::{Config, DEFAULT_TICK_INTERVAL};
use rand::{rngs::OsRng, RngCore};
use serde::Deserialize;

/// Name of the settings table in the definition document.
pub const SETTINGS_TABLE: &str = "settings";

const DEFAULT_MAX_SPAWNS_PER_PASS: u32 = 4;

/// Engine tuning read from the `[settings]` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
    /// Host ticks per scheduler pass.
    pub tick_interval: u32,
    /// Fallback interval in ticks.
    pub default_delay: i32,
    /// Entity cap per pass, zero when unlimited.
    pub max_spawns_per_pass: u32,
    /// Seed of the spawn random source. An entropy seed is drawn when absent.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            default_delay: DEFAULT_DELAY_TICKS,
            max_spawns_per_pass: DEFAULT_MAX_SPAWNS_PER_PASS,
            seed: None,
        }
    }
}

impl Settings {
    /// Builds the scheduler configuration described by these settings.
    #[must_use]
    pub fn scheduler_config(&self) -> Config {
        let seed = self.seed.unwrap_or_else(|| OsRng.next_u64());
        Config::new(self.tick_interval, seed)
            .with_default_delay(self.default_delay)
            .with_spawn_budget(self.max_spawns_per_pass)
    }
}
