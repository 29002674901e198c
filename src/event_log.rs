mod in_memory;

pub use self::in_memory::*;

use crate::auction::Outcome;
use crate::event::Event;
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub type Offset = u64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEvent {
    pub offset: Offset,
    pub details: Event,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithOffset<T> {
    pub offset: Offset,
    pub data: T,
}

/// Sink for auction notifications
///
/// Called from inside an item's critical section, so implementations
/// must be quick and must never call back into the item.
pub trait Writer {
    fn write(&self, event: Event);
}

pub trait Reader {
    /// Read up to `limit` events starting at `offset`
    ///
    /// If nothing is available yet, block for at most `timeout`
    /// (forever if `None`) waiting for new events.
    fn read(
        &self,
        offset: Offset,
        limit: usize,
        timeout: Option<Duration>,
    ) -> Result<WithOffset<Vec<LogEvent>>>;

    fn get_start_offset(&self) -> Result<Offset>;
}

pub type SharedWriter = Arc<dyn Writer + Send + Sync + 'static>;
pub type SharedReader = Arc<dyn Reader + Send + Sync + 'static>;

/// Renders every event as a log line
#[derive(Clone, Debug, Default)]
pub struct TracingWriter;

impl TracingWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn new_shared() -> SharedWriter {
        Arc::new(Self::new())
    }
}

impl Writer for TracingWriter {
    fn write(&self, event: Event) {
        match event {
            Event::ItemAdded { item, starting_bid } => {
                info!(%item, starting_bid, "item added")
            }
            Event::AuctionStarted { item } => info!(%item, "auction started"),
            Event::BidAccepted {
                item,
                bidder,
                amount,
            } => info!(%item, %bidder, amount, "new highest bid"),
            Event::BidRejected {
                item,
                bidder,
                amount,
                reason,
            } => info!(%item, %bidder, amount, %reason, "bid rejected"),
            Event::Countdown { item, remaining } => {
                info!(%item, remaining, "countdown")
            }
            Event::Closed { item, outcome } => match outcome {
                Outcome::Sold { bidder, price } => {
                    info!(%item, %bidder, price, "auction closed, item sold")
                }
                Outcome::NoSale => info!(%item, "auction closed, no bids were placed"),
            },
        }
    }
}
