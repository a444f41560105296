use clap::Parser;
use rand::{thread_rng, Rng, SeedableRng};
use rand_wyrand::WyRand;
use serde::{Deserialize, Serialize};

use crate::{Dungeon, Result, Walker};

/// Config for a dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Side length of the square grid
    pub size: usize,
    /// Seed of the walk
    /// -> None means a fresh one is drawn for every walker
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 10,
            seed: None,
        }
    }
}

impl Config {
    /// Seed to use, drawing a fresh one if none was configured
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(|| thread_rng().gen())
    }

    /// Build a walker seeded as configured
    pub fn walker(&self) -> Walker<WyRand> {
        let seed = self.seed_or_random();
        log::debug!("Seeding walker with {seed}");
        Walker::new(WyRand::seed_from_u64(seed))
    }

    /// Generate a single dungeon with this config
    pub fn generate(&self) -> Result<Dungeon> {
        self.walker().generate(self.size)
    }
}

/// Partial config for a dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Parser, Default)]
pub struct PartialConfig {
    /// Side length of the square grid
    #[clap(short, long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    /// Seed of the walk
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}
impl PartialConfig {
    pub fn merge(self, other: PartialConfig) -> Self {
        Self {
            size: other.size.or(self.size),
            seed: other.seed.or(self.seed),
        }
    }
    pub fn or_defaults(self) -> Config {
        let default = Config::default();
        Config {
            size: self.size.unwrap_or(default.size),
            seed: self.seed.or(default.seed),
        }
    }
}
