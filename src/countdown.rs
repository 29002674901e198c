//! Countdown process
//!
//! One OS thread per started item. It waits for one tick without holding
//! the item lock, then advances the item's clock in a single critical
//! section, and exits on its own once the item is closed. There is no
//! external cancellation: a bid arriving at any time simply resets the
//! clock that the next advance sees.
use crate::auction::{Outcome, TickOutcome};
use crate::item::SharedItem;
use anyhow::{bail, format_err, Result};
use parking_lot::Mutex;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of countdown time units
pub trait Ticker {
    /// Block until the next tick is due
    fn wait(&self) -> Result<()>;
}

pub type SharedTicker = Arc<dyn Ticker + Send + Sync + 'static>;

/// Wall-clock ticker
#[derive(Clone, Debug)]
pub struct IntervalTicker {
    period: Duration,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn new_shared(period: Duration) -> SharedTicker {
        Arc::new(Self::new(period))
    }
}

impl Ticker for IntervalTicker {
    fn wait(&self) -> Result<()> {
        thread::sleep(self.period);
        Ok(())
    }
}

/// Fake ticker releasing one wait per tick sent through its `TickSender`.
///
/// Useful for unit-tests. Waits fail once the sender is dropped and all
/// sent ticks are consumed.
pub struct ManualTicker {
    ticks: Mutex<mpsc::Receiver<()>>,
}

#[derive(Clone)]
pub struct TickSender(mpsc::Sender<()>);

impl TickSender {
    /// Release `n` more ticks; `false` if no ticker is listening anymore
    pub fn send(&self, n: u32) -> bool {
        (0..n).all(|_| self.0.send(()).is_ok())
    }
}

impl ManualTicker {
    pub fn new_shared() -> (TickSender, SharedTicker) {
        let (tx, rx) = mpsc::channel();
        (
            TickSender(tx),
            Arc::new(Self {
                ticks: Mutex::new(rx),
            }),
        )
    }
}

impl Ticker for ManualTicker {
    fn wait(&self) -> Result<()> {
        self.ticks
            .lock()
            .recv()
            .map_err(|_e| format_err!("tick source disconnected"))
    }
}

/// Runs the countdown of `item` until it closes
///
/// The caller is responsible for having claimed the item with
/// `AuctionItem::mark_started`.
pub fn run(item: &SharedItem, ticker: &dyn Ticker) -> Result<Outcome> {
    loop {
        ticker.wait()?;

        match item.advance() {
            TickOutcome::Running { remaining } => {
                debug!(item = %item.name(), remaining, "tick");
            }
            TickOutcome::Closed(outcome) => return Ok(outcome),
            // Only a tick from outside this countdown can close the item
            // under our feet; the outcome is already recorded.
            TickOutcome::Inactive => {
                return item
                    .outcome()
                    .ok_or_else(|| format_err!("inactive item without an outcome"))
            }
        }
    }
}

/// Start the countdown of `item` on its own thread
pub fn spawn(item: SharedItem, ticker: SharedTicker) -> std::io::Result<CountdownHandle> {
    let thread = thread::Builder::new()
        .name(format!("countdown-{}", item.name()))
        .spawn(move || {
            match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                run(&item, &*ticker)
            })) {
                Err(_e) => bail!("countdown of {} panicked", item.name()),
                Ok(Err(e)) => {
                    warn!(item = %item.name(), error = %e, "countdown stopped");
                    Err(e)
                }
                Ok(Ok(outcome)) => Ok(outcome),
            }
        })?;

    Ok(CountdownHandle { thread })
}

/// Handle to a running countdown
///
/// Dropping it detaches the thread; the countdown still runs to closure.
pub struct CountdownHandle {
    thread: thread::JoinHandle<Result<Outcome>>,
}

impl CountdownHandle {
    /// Wait for the countdown to finish and return the item's outcome
    pub fn join(self) -> Result<Outcome> {
        self.thread
            .join()
            .map_err(|e| format_err!("join failed: {:?}", e))?
    }
}
