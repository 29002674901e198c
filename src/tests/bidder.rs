use super::util::verbose_config;
use crate::{
    bidder::{BidStrategy, ComputerBidder, FixedRaise, RandomRaise},
    event_log::InMemoryLog,
    registry::AuctionRegistry,
};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

fn new_registry() -> Result<AuctionRegistry> {
    let mut registry = AuctionRegistry::new(verbose_config(), Arc::new(InMemoryLog::new()));
    registry.add_item("Vase", 100)?;
    Ok(registry)
}

#[test]
fn random_raise_stays_in_range() {
    let strategy = RandomRaise::default();
    for _ in 0..1_000 {
        let bid = strategy.next_bid(150);
        assert!((160..=250).contains(&bid), "{bid}");
    }
    assert_eq!(RandomRaise { min: 5, max: 5 }.next_bid(10), 15);
}

#[test]
fn computer_outbids_the_current_price() -> Result<()> {
    let registry = new_registry()?;
    let computer = ComputerBidder::new("Computer", Box::new(FixedRaise(25)), Duration::ZERO);

    assert!(registry.place_bid("Vase", "User", 150)?);
    assert_eq!(computer.respond(&registry, "Vase")?, Some(true));

    let snapshot = registry.item("Vase")?.snapshot();
    assert_eq!(snapshot.current_bid, 175);
    assert_eq!(snapshot.highest_bidder.as_deref(), Some(computer.id()));
    Ok(())
}

#[test]
fn computer_stays_quiet_on_closed_items() -> Result<()> {
    let registry = new_registry()?;
    let computer = ComputerBidder::new("Computer", Box::new(FixedRaise(25)), Duration::ZERO);
    let item = registry.item("Vase")?;
    for _ in 0..10 {
        item.tick();
    }

    assert_eq!(computer.respond(&registry, "Vase")?, None);
    assert!(computer.respond(&registry, "Lamp").is_err());
    assert_eq!(item.current_bid(), 100);
    Ok(())
}
