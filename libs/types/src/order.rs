//! Order types
//!
//! An [`Order`] is the mutable matching state of one order. Side and type are
//! plain enum fields; matching behavior switches on them in the engine.

use crate::ids::{AccountId, MarketId, OrderId};
use crate::numeric::{Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order type
///
/// Only limit orders carry a price. Market orders never rest in a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum OrderType {
    Limit { price: Price },
    Market,
}

/// Status reported to order-status subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Resting in the book, untouched
    Open,
    /// Resting in the book with a reduced amount
    PartiallyFilled,
    /// Completely matched (terminal)
    Filled,
    /// Removed without a full fill (terminal)
    Canceled,
}

/// Matching state of a single order
///
/// `amount` is the remaining base quantity, except for market buys where it
/// holds the remaining quote funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub account_id: AccountId,
    pub symbol: MarketId,
    pub side: Side,
    pub order_type: OrderType,
    pub amount: Quantity,
    pub created_at: i64, // Unix nanos
}

impl Order {
    /// Create a limit order for `amount` base units at `price`
    pub fn limit(
        order_id: OrderId,
        account_id: AccountId,
        symbol: MarketId,
        side: Side,
        price: Price,
        amount: Quantity,
        timestamp: i64,
    ) -> Self {
        Self {
            order_id,
            account_id,
            symbol,
            side,
            order_type: OrderType::Limit { price },
            amount,
            created_at: timestamp,
        }
    }

    /// Create a market order
    ///
    /// For a buy, `amount` is the quote funds to spend. For a sell it is the
    /// base quantity to sell.
    pub fn market(
        order_id: OrderId,
        account_id: AccountId,
        symbol: MarketId,
        side: Side,
        amount: Quantity,
        timestamp: i64,
    ) -> Self {
        Self {
            order_id,
            account_id,
            symbol,
            side,
            order_type: OrderType::Market,
            amount,
            created_at: timestamp,
        }
    }

    /// Limit price, `None` for market orders
    pub fn price(&self) -> Option<Price> {
        match self.order_type {
            OrderType::Limit { price } => Some(price),
            OrderType::Market => None,
        }
    }

    pub fn is_market(&self) -> bool {
        matches!(self.order_type, OrderType::Market)
    }

    pub fn is_market_buy(&self) -> bool {
        self.side == Side::Buy && self.is_market()
    }

    /// Nothing left to match
    pub fn is_filled(&self) -> bool {
        self.amount.is_zero()
    }

    /// Balance still reserved by this order
    ///
    /// Base units for sells, quote units for buys.
    pub fn unfilled(&self) -> Decimal {
        match (self.side, self.order_type) {
            (Side::Buy, OrderType::Limit { price }) => self.amount * price,
            (Side::Buy, OrderType::Market) | (Side::Sell, _) => self.amount.as_decimal(),
        }
    }
}
