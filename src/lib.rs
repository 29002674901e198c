//! Timed open-outcry auctions
//!
//! Each item closes on its own once a fixed number of ticks pass without
//! a winning bid. Bids and the countdown run concurrently and meet only
//! at the item's lock.

pub mod auction;
pub mod bidder;
pub mod config;
pub mod countdown;
pub mod event;
pub mod event_log;
pub mod item;
pub mod registry;

pub use self::{
    auction::{Amount, AuctionError, BidRejection, BidderId, ItemId, ItemSnapshot, Outcome},
    config::Config,
    item::{AuctionItem, SharedItem},
    registry::AuctionRegistry,
};

#[cfg(test)]
mod tests;
