//! A single lot under auction
//!
//! All mutable state sits in one `AuctionState` behind one mutex. Bids
//! and ticks each take the lock exactly once for their whole
//! read-modify-write, so for one item every operation is linearized and
//! no mixed state is ever observable. Items share no locks with each other.
use crate::{
    auction::*,
    config::Config,
    event::Event,
    event_log,
};
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

pub type SharedItem = Arc<AuctionItem>;

pub struct AuctionItem {
    name: ItemId,
    starting_bid: Amount,
    config: Config,
    state: Mutex<AuctionState>,
    /// Signalled once, when the item closes
    closed: Condvar,
    event_writer: event_log::SharedWriter,
}

impl AuctionItem {
    pub fn new(
        name: impl Into<ItemId>,
        starting_bid: Amount,
        config: Config,
        event_writer: event_log::SharedWriter,
    ) -> Self {
        Self {
            name: name.into(),
            starting_bid,
            config,
            state: Mutex::new(AuctionState::new(starting_bid, config.countdown_ticks)),
            closed: Condvar::new(),
            event_writer,
        }
    }

    pub fn new_shared(
        name: impl Into<ItemId>,
        starting_bid: Amount,
        config: Config,
        event_writer: event_log::SharedWriter,
    ) -> SharedItem {
        Arc::new(Self::new(name, starting_bid, config, event_writer))
    }

    pub fn name(&self) -> ItemIdRef<'_> {
        &self.name
    }

    pub fn starting_bid(&self) -> Amount {
        self.starting_bid
    }

    fn lock(&self) -> MutexGuard<'_, AuctionState> {
        self.state.lock()
    }

    /// Place a bid; `true` if it became the highest bid
    pub fn place_bid(&self, bidder: BidderIdRef, amount: Amount) -> bool {
        self.try_place_bid(bidder, amount).is_ok()
    }

    /// Like [`Self::place_bid`], but tells why a bid was rejected
    pub fn try_place_bid(&self, bidder: BidderIdRef, amount: Amount) -> Result<(), BidRejection> {
        let mut state = self.lock();

        let res = state.handle_bid(
            Bid {
                bidder: bidder.to_owned(),
                price: amount,
            },
            self.config.countdown_ticks,
        );

        // Written under the lock so the log order for this item matches
        // the order in which the lock serialized the operations.
        self.event_writer.write(match res {
            Ok(()) => Event::BidAccepted {
                item: self.name.clone(),
                bidder: bidder.to_owned(),
                amount,
            },
            Err(reason) => Event::BidRejected {
                item: self.name.clone(),
                bidder: bidder.to_owned(),
                amount,
                reason,
            },
        });

        res
    }

    /// Advance the clock by one tick; `true` only for the tick that closed the item
    pub fn tick(&self) -> bool {
        matches!(self.advance(), TickOutcome::Closed(_))
    }

    /// Advance the clock by one tick and report what happened
    pub fn advance(&self) -> TickOutcome {
        let mut state = self.lock();

        let res = state.handle_tick();
        match &res {
            TickOutcome::Inactive => {}
            TickOutcome::Running { remaining } => {
                if *remaining <= self.config.announce_below {
                    self.event_writer.write(Event::Countdown {
                        item: self.name.clone(),
                        remaining: *remaining,
                    });
                }
            }
            TickOutcome::Closed(outcome) => {
                debug!(item = %self.name, ?outcome, "finalized");
                self.event_writer.write(Event::Closed {
                    item: self.name.clone(),
                    outcome: outcome.clone(),
                });
                self.closed.notify_all();
            }
        }
        res
    }

    /// Claim the right to run this item's countdown
    ///
    /// Succeeds exactly once per item, and never for a closed item. The
    /// start is logged under the lock, ahead of anything the countdown logs.
    pub fn mark_started(&self) -> Result<(), AuctionError> {
        let mut state = self.lock();
        state.handle_start().map_err(|rejection| match rejection {
            StartRejection::Started => AuctionError::AlreadyStarted(self.name.clone()),
            StartRejection::Closed => AuctionError::AlreadyClosed(self.name.clone()),
        })?;

        self.event_writer.write(Event::AuctionStarted {
            item: self.name.clone(),
        });
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_active()
    }

    pub fn current_bid(&self) -> Amount {
        self.lock().current_bid()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.lock().outcome().cloned()
    }

    pub fn snapshot(&self) -> ItemSnapshot {
        let state = self.lock();
        ItemSnapshot {
            name: self.name.clone(),
            starting_bid: self.starting_bid,
            current_bid: state.current_bid(),
            highest_bidder: state.highest_bidder().map(ToOwned::to_owned),
            active: state.is_active(),
            started: state.is_started(),
            remaining_ticks: state.remaining_ticks(),
        }
    }

    /// Block until the item closes and return its outcome
    ///
    /// Returns `None` if `timeout` elapses first. A timeout too large to
    /// express as a deadline waits without one.
    pub fn wait_closed(&self, timeout: Option<Duration>) -> Option<Outcome> {
        let deadline = timeout.and_then(|timeout| Instant::now().checked_add(timeout));
        let mut state = self.lock();

        loop {
            if let Some(outcome) = state.outcome() {
                return Some(outcome.clone());
            }
            match deadline {
                Some(deadline) => {
                    if self.closed.wait_until(&mut state, deadline).timed_out() {
                        return state.outcome().cloned();
                    }
                }
                None => self.closed.wait(&mut state),
            }
        }
    }
}
