//! Event log emitted by the order book
//!
//! Every observable state transition produces one [`Log`]. Logs carry owned
//! snapshots of the orders involved, never references into the live book,
//! and are numbered per book so that a consumer can replay them in order.

use serde::{Deserialize, Serialize};
use types::ids::{MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::Order;

/// Which side of a trade the logged order took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Party {
    /// The order being placed
    Taker,
    /// A resting order
    Maker,
}

/// Transition recorded by a log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LogType {
    /// The order now rests in the book
    OrderOpened { party: Party, order: Order },

    /// One matching step between the taker and one maker; `price` is the
    /// maker's price and `amount` the traded base quantity. Both snapshots
    /// are taken after the step.
    OrderMatched {
        taker: Order,
        maker: Order,
        price: Price,
        amount: Quantity,
    },

    /// The order was fully filled
    OrderCompleted { party: Party, order: Order },

    /// The order was removed before being filled
    OrderCancelled { party: Party, order: Order },
}

/// Immutable record of one order book transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    /// Per-book sequence, strictly increasing
    pub sequence: u64,
    pub symbol: MarketId,
    /// Unix nanos supplied by the caller
    pub timestamp: i64,
    #[serde(flatten)]
    pub log_type: LogType,
}

impl Log {
    /// Party the log concerns
    ///
    /// `None` for match logs, which concern both the taker and the maker.
    pub fn party(&self) -> Option<Party> {
        match &self.log_type {
            LogType::OrderOpened { party, .. }
            | LogType::OrderCompleted { party, .. }
            | LogType::OrderCancelled { party, .. } => Some(*party),
            LogType::OrderMatched { .. } => None,
        }
    }

    /// Snapshot of the order the log is about
    pub fn order(&self) -> &Order {
        match &self.log_type {
            LogType::OrderOpened { order, .. }
            | LogType::OrderCompleted { order, .. }
            | LogType::OrderCancelled { order, .. } => order,
            LogType::OrderMatched { taker, .. } => taker,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order().order_id
    }

    /// Maker id of a match log
    pub fn counter_order_id(&self) -> Option<OrderId> {
        match &self.log_type {
            LogType::OrderMatched { maker, .. } => Some(maker.order_id),
            _ => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self.log_type, LogType::OrderMatched { .. })
    }

    /// Short label for structured logging
    pub fn label(&self) -> &'static str {
        match self.log_type {
            LogType::OrderOpened { .. } => "OrderOpened",
            LogType::OrderMatched { .. } => "OrderMatched",
            LogType::OrderCompleted { .. } => "OrderCompleted",
            LogType::OrderCancelled { .. } => "OrderCancelled",
        }
    }
}
