use crate::auction::*;

/// Notifications for whoever presents the auction (console, UI, tests)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    ItemAdded {
        item: ItemId,
        starting_bid: Amount,
    },
    AuctionStarted {
        item: ItemId,
    },
    BidAccepted {
        item: ItemId,
        bidder: BidderId,
        amount: Amount,
    },
    BidRejected {
        item: ItemId,
        bidder: BidderId,
        amount: Amount,
        reason: BidRejection,
    },
    /// Only emitted close to closure, see `Config::announce_below`
    Countdown {
        item: ItemId,
        remaining: u32,
    },
    Closed {
        item: ItemId,
        outcome: Outcome,
    },
}

impl Event {
    pub fn item(&self) -> ItemIdRef<'_> {
        match self {
            Event::ItemAdded { item, .. }
            | Event::AuctionStarted { item }
            | Event::BidAccepted { item, .. }
            | Event::BidRejected { item, .. }
            | Event::Countdown { item, .. }
            | Event::Closed { item, .. } => item,
        }
    }
}
