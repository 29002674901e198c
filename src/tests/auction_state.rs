use crate::auction::*;

fn bid(bidder: &str, price: Amount) -> Bid {
    Bid {
        bidder: bidder.to_owned(),
        price,
    }
}

#[test]
fn vase_is_sold_to_the_last_highest_bidder() {
    let mut state = AuctionState::new(100, 10);

    assert_eq!(state.handle_bid(bid("A", 150), 10), Ok(()));
    assert_eq!(state.current_bid(), 150);
    assert_eq!(
        state.handle_bid(bid("B", 120), 10),
        Err(BidRejection::TooLow {
            current: 150,
            offered: 120
        })
    );
    assert_eq!(state.current_bid(), 150);
    assert_eq!(state.highest_bidder(), Some("A"));
    assert_eq!(state.handle_bid(bid("B", 200), 10), Ok(()));
    assert_eq!(state.highest_bidder(), Some("B"));

    for remaining in (1..10).rev() {
        assert_eq!(state.handle_tick(), TickOutcome::Running { remaining });
    }
    let sold = Outcome::Sold {
        bidder: "B".to_owned(),
        price: 200,
    };
    assert_eq!(state.handle_tick(), TickOutcome::Closed(sold.clone()));
    assert_eq!(state.outcome(), Some(&sold));
    assert!(!state.is_active());
}

#[test]
fn no_bids_means_no_sale() {
    let mut state = AuctionState::new(100, 10);

    let last = (0..10).map(|_| state.handle_tick()).last();

    assert_eq!(last, Some(TickOutcome::Closed(Outcome::NoSale)));
    assert_eq!(state.current_bid(), 100);
    assert_eq!(state.highest_bidder(), None);
}

#[test]
fn accepted_bid_resets_countdown() {
    let mut state = AuctionState::new(100, 10);
    for _ in 0..7 {
        state.handle_tick();
    }
    assert_eq!(state.remaining_ticks(), 3);

    state.handle_bid(bid("A", 101), 10).expect("accepted");
    assert_eq!(state.remaining_ticks(), 10);

    state.handle_tick();
    state
        .handle_bid(bid("B", 101), 10)
        .expect_err("equal bid is rejected");
    assert_eq!(state.remaining_ticks(), 9);
}

#[test]
fn bids_not_above_current_are_rejected() {
    let mut state = AuctionState::new(100, 10);

    assert!(state.handle_bid(bid("A", 0), 10).is_err());
    assert!(state.handle_bid(bid("A", 100), 10).is_err());
    assert_eq!(state.current_bid(), 100);
    assert_eq!(state.highest_bidder(), None);
}

#[test]
fn closed_state_is_final() {
    let mut state = AuctionState::new(100, 1);
    assert_eq!(state.handle_tick(), TickOutcome::Closed(Outcome::NoSale));

    assert_eq!(
        state.handle_bid(bid("A", 1_000), 1),
        Err(BidRejection::AuctionClosed)
    );
    assert_eq!(state.handle_tick(), TickOutcome::Inactive);
    assert_eq!(state.handle_tick(), TickOutcome::Inactive);
    assert_eq!(state.outcome(), Some(&Outcome::NoSale));
    assert_eq!(state.current_bid(), 100);
}

#[test]
fn start_is_claimed_once() {
    let mut state = AuctionState::new(100, 2);

    assert_eq!(state.handle_start(), Ok(()));
    assert_eq!(state.handle_start(), Err(StartRejection::Started));

    let mut closed = AuctionState::new(100, 1);
    closed.handle_tick();
    assert_eq!(closed.handle_start(), Err(StartRejection::Closed));
}
