//! Host configuration: command-line flags and environment.
//!
//! ```text
//! blockfall [--mode normal|time-attack] [--seed N]
//! ```
//!
//! `BLOCKFALL_SEED` supplies a seed when `--seed` is absent; otherwise the
//! seed is derived from the wall clock.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};

use crate::types::GameMode;

/// Environment variable read when no `--seed` is given
pub const SEED_ENV: &str = "BLOCKFALL_SEED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HostConfig {
    pub mode: GameMode,
    pub seed: Option<u32>,
}

impl HostConfig {
    /// Explicit seed, then `BLOCKFALL_SEED`, then the clock
    pub fn resolve_seed(&self) -> u32 {
        self.seed
            .or_else(|| env::var(SEED_ENV).ok().and_then(|v| v.parse::<u32>().ok()))
            .unwrap_or_else(clock_seed)
    }
}

/// Parse arguments (program name excluded)
pub fn parse_args(args: &[String]) -> Result<HostConfig> {
    let mut config = HostConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --mode"))?;
                config.mode = GameMode::from_str(v)
                    .ok_or_else(|| anyhow!("invalid --mode value: {} (normal|time-attack)", v))?;
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
