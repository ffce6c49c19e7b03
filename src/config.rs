//! Runner configuration from `STACKFALL_*` environment variables.
//!
//! Unset or unparsable values fall back to the defaults.

use crate::types::TICK_MS;

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seed for the engine RNG (shape bag and spawn column)
    pub seed: u32,
    /// Wall-clock length of one engine tick
    pub tick_ms: u32,
    /// Print the board as text instead of drawing the terminal UI
    pub headless: bool,
    /// Headless runs stop after this many ticks; 0 runs until game over
    pub max_ticks: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 1,
            tick_ms: TICK_MS,
            headless: false,
            max_ticks: 0,
        }
    }
}

impl Config {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("STACKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);
        let tick_ms = lookup("STACKFALL_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.tick_ms);
        let headless = lookup("STACKFALL_HEADLESS")
            .map(|v| {
                let v = v.trim();
                v == "1" || v.eq_ignore_ascii_case("true")
            })
            .unwrap_or(defaults.headless);
        let max_ticks = lookup("STACKFALL_MAX_TICKS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_ticks);

        Self {
            seed,
            tick_ms,
            headless,
            max_ticks,
        }
    }
}
