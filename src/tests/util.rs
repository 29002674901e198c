use crate::{
    config::Config,
    event::Event,
    event_log::{Offset, Reader, WithOffset},
};
use anyhow::{bail, Result};
use std::time::{Duration, Instant};

pub const TIMEOUT: Duration = Duration::from_secs(10);

/// Every tick announced, so tests can follow the countdown in the log
pub fn verbose_config() -> Config {
    Config {
        tick: Duration::from_millis(1),
        countdown_ticks: 10,
        announce_below: 10,
    }
}

/// Read `reader` from `offset` until `expected` shows up
///
/// Leaves `offset` just past the last event read.
pub fn wait_for_event(reader: &dyn Reader, offset: &mut Offset, expected: &Event) -> Result<()> {
    let deadline = Instant::now() + TIMEOUT;
    loop {
        let now = Instant::now();
        if deadline <= now {
            bail!("timed out waiting for {:?}", expected);
        }

        let WithOffset { offset: next, data } =
            reader.read(*offset, usize::MAX, Some(deadline - now))?;
        *offset = next;
        if data.iter().any(|e| &e.details == expected) {
            return Ok(());
        }
    }
}
