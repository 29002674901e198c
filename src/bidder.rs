//! Computer bidder
//!
//! An automated competitor. It goes through the registry like any other
//! caller and has no special access to item state.
use crate::{
    auction::{Amount, BidderId, ItemIdRef},
    registry::AuctionRegistry,
};
use anyhow::Result;
use rand::Rng;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Decides how much to bid given the current highest bid
pub trait BidStrategy {
    fn next_bid(&self, current: Amount) -> Amount;
}

pub type OwnedBidStrategy = Box<dyn BidStrategy + Send + Sync>;

/// Raise the current bid by a uniformly random amount in `min..=max`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomRaise {
    pub min: Amount,
    pub max: Amount,
}

impl Default for RandomRaise {
    fn default() -> Self {
        Self { min: 10, max: 100 }
    }
}

impl BidStrategy for RandomRaise {
    fn next_bid(&self, current: Amount) -> Amount {
        let low = current.saturating_add(self.min);
        let high = current.saturating_add(self.max).max(low);
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Always raise by the same amount
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedRaise(pub Amount);

impl BidStrategy for FixedRaise {
    fn next_bid(&self, current: Amount) -> Amount {
        current.saturating_add(self.0)
    }
}

pub struct ComputerBidder {
    id: BidderId,
    strategy: OwnedBidStrategy,
    delay: Duration,
}

impl ComputerBidder {
    pub fn new(id: impl Into<BidderId>, strategy: OwnedBidStrategy, delay: Duration) -> Self {
        Self {
            id: id.into(),
            strategy,
            delay,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Answer the latest bid on `item`
    ///
    /// Returns `None` if the item was already closed when it was time to
    /// bid, otherwise whether the counter-bid was accepted. The item may
    /// still close between reading the price and bidding, in which case
    /// the bid is simply rejected.
    pub fn respond(&self, registry: &AuctionRegistry, item: ItemIdRef) -> Result<Option<bool>> {
        let target = registry.item(item)?;
        if !target.is_active() {
            return Ok(None);
        }

        thread::sleep(self.delay);

        let snapshot = target.snapshot();
        if !snapshot.active {
            return Ok(None);
        }

        let amount = self.strategy.next_bid(snapshot.current_bid);
        debug!(bidder = %self.id, %item, amount, "computer bid");
        Ok(Some(registry.place_bid(item, &self.id, amount)?))
    }
}
