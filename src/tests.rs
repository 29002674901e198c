mod auction_state;
mod bidder;
mod event_log;
mod util;
