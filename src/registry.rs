//! Auction registry
//!
//! Items are added through `&mut self` before the registry is shared, so
//! lookups afterwards are plain reads and need no lock. The only shared
//! mutable piece is the list of countdown handles.
use crate::{
    auction::*,
    config::Config,
    countdown::{self, CountdownHandle, IntervalTicker, SharedTicker},
    event::Event,
    event_log,
    item::{AuctionItem, SharedItem},
};
use anyhow::Result;
use parking_lot::Mutex;
use tracing::debug;

pub struct AuctionRegistry {
    config: Config,
    items: Vec<SharedItem>,
    event_writer: event_log::SharedWriter,
    ticker: SharedTicker,
    countdowns: Mutex<Vec<(ItemId, CountdownHandle)>>,
}

impl AuctionRegistry {
    pub fn new(config: Config, event_writer: event_log::SharedWriter) -> Self {
        Self::with_ticker(
            config,
            event_writer,
            IntervalTicker::new_shared(config.tick),
        )
    }

    /// Registry whose countdowns are all driven by `ticker`
    pub fn with_ticker(
        config: Config,
        event_writer: event_log::SharedWriter,
        ticker: SharedTicker,
    ) -> Self {
        Self {
            config,
            items: Vec::new(),
            event_writer,
            ticker,
            countdowns: Mutex::new(Vec::new()),
        }
    }

    pub fn items(&self) -> &[SharedItem] {
        &self.items
    }

    pub fn item(&self, name: ItemIdRef) -> Result<&SharedItem, AuctionError> {
        self.items
            .iter()
            .find(|item| item.name() == name)
            .ok_or_else(|| AuctionError::NotFound(name.to_owned()))
    }

    /// Add a new, active item
    ///
    /// Names are unique; adding a second item with the same name fails.
    pub fn add_item(
        &mut self,
        name: impl Into<ItemId>,
        starting_bid: Amount,
    ) -> Result<SharedItem, AuctionError> {
        let name = name.into();
        if self.item(&name).is_ok() {
            return Err(AuctionError::DuplicateItem(name));
        }

        let item = AuctionItem::new_shared(
            name.clone(),
            starting_bid,
            self.config,
            self.event_writer.clone(),
        );
        self.items.push(item.clone());
        self.event_writer.write(Event::ItemAdded {
            item: name,
            starting_bid,
        });
        Ok(item)
    }

    /// Launch the countdown of `name` and return the item for bidding
    ///
    /// `AuctionStarted` is logged by `mark_started`, before the countdown
    /// thread exists.
    pub fn start_auction(&self, name: ItemIdRef) -> Result<SharedItem, AuctionError> {
        let item = self.item(name)?;
        item.mark_started()?;

        let handle = countdown::spawn(item.clone(), self.ticker.clone())?;
        debug!(item = %name, "countdown spawned");
        self.countdowns.lock().push((name.to_owned(), handle));

        Ok(item.clone())
    }

    /// Bid on `name`; `Ok(false)` is an ordinary rejection
    pub fn place_bid(
        &self,
        name: ItemIdRef,
        bidder: BidderIdRef,
        amount: Amount,
    ) -> Result<bool, AuctionError> {
        Ok(self.item(name)?.place_bid(bidder, amount))
    }

    /// Wait for every launched countdown and collect the outcomes
    ///
    /// Handles are taken out of the registry, so a second call only sees
    /// countdowns started in between.
    pub fn join_countdowns(&self) -> Result<Vec<(ItemId, Outcome)>> {
        let handles = std::mem::take(&mut *self.countdowns.lock());
        handles
            .into_iter()
            .map(|(name, handle)| handle.join().map(|outcome| (name, outcome)))
            .collect()
    }
}
