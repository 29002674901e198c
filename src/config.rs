//! Runtime settings of the auction.
//!
//! Defaults match a console auction: one tick per second, ten quiet ticks
//! to close, with the last three announced.

use anyhow::{Context, Result};
use std::str::FromStr;
use std::time::Duration;

/// Ticks a winning bid resets the countdown to.
pub const DEFAULT_COUNTDOWN_TICKS: u32 = 10;

/// Countdown updates are emitted at or below this many remaining ticks.
pub const DEFAULT_ANNOUNCE_BELOW: u32 = 3;

/// Wall-clock length of one tick.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

pub const TICK_MS_ENV: &str = "GAVEL_TICK_MS";
pub const COUNTDOWN_TICKS_ENV: &str = "GAVEL_COUNTDOWN_TICKS";
pub const ANNOUNCE_BELOW_ENV: &str = "GAVEL_ANNOUNCE_BELOW";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub tick: Duration,
    pub countdown_ticks: u32,
    pub announce_below: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            countdown_ticks: DEFAULT_COUNTDOWN_TICKS,
            announce_below: DEFAULT_ANNOUNCE_BELOW,
        }
    }
}

impl Config {
    /// Defaults, overridden by any of the `GAVEL_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = parse_var::<u64, _>(&lookup, TICK_MS_ENV)? {
            config.tick = Duration::from_millis(ms);
        }
        if let Some(ticks) = parse_var(&lookup, COUNTDOWN_TICKS_ENV)? {
            config.countdown_ticks = ticks;
        }
        if let Some(below) = parse_var(&lookup, ANNOUNCE_BELOW_ENV)? {
            config.announce_below = below;
        }

        anyhow::ensure!(
            config.countdown_ticks > 0,
            "{} must be at least 1",
            COUNTDOWN_TICKS_ENV
        );

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .with_context(|| format!("invalid value for {key}: {value:?}"))
        })
        .transpose()
}
