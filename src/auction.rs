use thiserror::Error;

pub type ItemId = String;
pub type ItemIdRef<'s> = &'s str;
pub type BidderId = String;
pub type BidderIdRef<'s> = &'s str;
pub type Amount = u64;

#[derive(Error, Debug)]
pub enum AuctionError {
    #[error("unknown item: {0}")]
    NotFound(ItemId),
    #[error("auction already started: {0}")]
    AlreadyStarted(ItemId),
    #[error("auction already closed: {0}")]
    AlreadyClosed(ItemId),
    #[error("duplicate item: {0}")]
    DuplicateItem(ItemId),
    #[error("failed to spawn countdown")]
    Spawn(#[from] std::io::Error),
}

/// Why a bid was not accepted
///
/// Rejections are an ordinary outcome of bidding, not a fault.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BidRejection {
    #[error("auction already closed")]
    AuctionClosed,
    #[error("bid of {offered} does not exceed current bid of {current}")]
    TooLow { current: Amount, offered: Amount },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bid {
    pub bidder: BidderId,
    pub price: Amount,
}

/// Permanent result of a closed auction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Sold { bidder: BidderId, price: Amount },
    NoSale,
}

/// Result of advancing the clock by one tick
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Item was already closed, nothing changed
    Inactive,
    Running { remaining: u32 },
    /// This tick closed the item
    Closed(Outcome),
}

/// Mutable state of one item
///
/// Pure data with no locking; `AuctionItem` keeps it behind a mutex and
/// every method here is one read-modify-write of the critical section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuctionState {
    starting_bid: Amount,
    highest_bid: Option<Bid>,
    remaining_ticks: u32,
    started: bool,
    outcome: Option<Outcome>,
}

impl AuctionState {
    pub fn new(starting_bid: Amount, countdown_ticks: u32) -> Self {
        Self {
            starting_bid,
            highest_bid: None,
            remaining_ticks: countdown_ticks,
            started: false,
            outcome: None,
        }
    }

    pub fn current_bid(&self) -> Amount {
        self.highest_bid
            .as_ref()
            .map(|bid| bid.price)
            .unwrap_or(self.starting_bid)
    }

    pub fn highest_bidder(&self) -> Option<BidderIdRef<'_>> {
        self.highest_bid.as_ref().map(|bid| bid.bidder.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    fn ensure_valid_bid(&self, price: Amount) -> Result<(), BidRejection> {
        use BidRejection::*;

        if !self.is_active() {
            return Err(AuctionClosed);
        }
        let current = self.current_bid();
        if price <= current {
            return Err(TooLow {
                current,
                offered: price,
            });
        }
        Ok(())
    }

    /// Accept `bid` if it strictly exceeds the current bid
    ///
    /// On acceptance the countdown is reset to `countdown_ticks`.
    pub fn handle_bid(&mut self, bid: Bid, countdown_ticks: u32) -> Result<(), BidRejection> {
        self.ensure_valid_bid(bid.price)?;
        self.highest_bid = Some(bid);
        self.remaining_ticks = countdown_ticks;
        Ok(())
    }

    pub fn handle_tick(&mut self) -> TickOutcome {
        if !self.is_active() {
            return TickOutcome::Inactive;
        }

        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks == 0 {
            TickOutcome::Closed(self.finalize())
        } else {
            TickOutcome::Running {
                remaining: self.remaining_ticks,
            }
        }
    }

    /// Record the winning bid; caller guarantees the item is still active
    fn finalize(&mut self) -> Outcome {
        let outcome = match &self.highest_bid {
            Some(bid) => Outcome::Sold {
                bidder: bid.bidder.clone(),
                price: bid.price,
            },
            None => Outcome::NoSale,
        };
        self.outcome = Some(outcome.clone());
        outcome
    }

    /// Flip the started flag, once
    pub fn handle_start(&mut self) -> Result<(), StartRejection> {
        if !self.is_active() {
            return Err(StartRejection::Closed);
        }
        if self.started {
            return Err(StartRejection::Started);
        }
        self.started = true;
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StartRejection {
    Started,
    Closed,
}

/// Point-in-time copy of an item's mutable fields, read under one lock
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub name: ItemId,
    pub starting_bid: Amount,
    pub current_bid: Amount,
    pub highest_bidder: Option<BidderId>,
    pub active: bool,
    pub started: bool,
    pub remaining_ticks: u32,
}
