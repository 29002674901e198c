use anyhow::{Context, Result};
use gavel::{
    bidder::{ComputerBidder, RandomRaise},
    event_log, AuctionRegistry, Config,
};
use std::io::{self, BufRead, Write};
use std::time::Duration;
use tracing::{info, Level};

const ITEM: &str = "Vintage Vase";
const STARTING_BID: u64 = 100;
const USER: &str = "User";
/// Bids exchanged before the user gets a final one
const MAX_BIDS: usize = 2;

fn prompt(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    text: &str,
) -> Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    lines.next().transpose().context("failed to read stdin")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    ctrlc::set_handler(|| {
        eprintln!("Stopping the auction...");
        std::process::exit(130);
    })?;

    let config = Config::from_env()?;
    let mut registry = AuctionRegistry::new(config, event_log::TracingWriter::new_shared());
    registry.add_item(ITEM, STARTING_BID)?;

    let item = registry.start_auction(ITEM)?;
    let computer = ComputerBidder::new(
        "Computer",
        Box::new(RandomRaise::default()),
        Duration::from_secs(1),
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut bid_count = 0;

    while item.is_active() && bid_count < MAX_BIDS {
        let line = match prompt(
            &mut lines,
            "Enter your bid amount (or 'exit' to stop bidding): ",
        )? {
            Some(line) => line,
            None => break,
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            break;
        }
        match line.parse() {
            Ok(amount) => {
                if registry.place_bid(ITEM, USER, amount)? {
                    bid_count += 1;
                    computer.respond(&registry, ITEM)?;
                    bid_count += 1;
                }
            }
            Err(_) => println!("Please enter a valid number."),
        }
    }

    if item.is_active() && bid_count == MAX_BIDS {
        if let Some(line) = prompt(
            &mut lines,
            "Enter your final bid amount (or 'exit' to stop bidding): ",
        )? {
            if let Ok(amount) = line.trim().parse() {
                registry.place_bid(ITEM, USER, amount)?;
            }
        }
    }

    let outcome = item.wait_closed(None);
    info!(item = ITEM, ?outcome, "waiting for countdowns to finish");
    registry.join_countdowns()?;

    Ok(())
}
