//! Order book infrastructure module
//!
//! Contains price levels, the two book sides, daily volume tracking and the
//! per-product [`OrderBook`].

pub mod price_level;
pub mod bid_book;
pub mod ask_book;
pub mod daily;
pub mod order_book;

pub use price_level::PriceLevel;
pub use bid_book::BidBook;
pub use ask_book::AskBook;
pub use daily::DailyVolume;
pub use order_book::OrderBook;

use thiserror::Error;
use types::ids::MarketId;
use types::numeric::Price;

use crate::matching::MatchError;

/// Side of the book a taker consumes from
pub(crate) trait BookSide {
    /// Best price level, or `None` when the side is empty
    fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)>;

    /// Drop the level at `price` if it no longer holds orders
    fn prune_level(&mut self, price: Price);
}

/// Order book errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    #[error("order book {symbol} is closed")]
    Closed { symbol: MarketId },

    #[error("order for {actual} routed to the {expected} book")]
    MarketMismatch { expected: MarketId, actual: MarketId },

    #[error("matching aborted: {0}")]
    Match(#[from] MatchError),
}
