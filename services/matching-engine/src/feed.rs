//! Downstream publication of order book logs
//!
//! The book reports its transitions as [`Log`] records. Consumers that only
//! care about trades and order status use [`project`] to turn a batch of logs
//! into [`MarketUpdate`]s. [`LogSink`] is the seam the engine publishes
//! through.

use serde::{Deserialize, Serialize};
use types::ids::{AccountId, MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{OrderStatus, Side};

use crate::events::{Log, LogType};

/// Trade or order status change derived from logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarketUpdate {
    Trade {
        symbol: MarketId,
        sequence: u64,
        taker_order_id: OrderId,
        maker_order_id: OrderId,
        taker_account_id: AccountId,
        maker_account_id: AccountId,
        /// Side of the taker
        side: Side,
        price: Price,
        amount: Quantity,
        timestamp: i64,
    },
    OrderStatus {
        symbol: MarketId,
        sequence: u64,
        order_id: OrderId,
        account_id: AccountId,
        status: OrderStatus,
        /// Amount left on the order after the transition
        remaining: Quantity,
    },
}

impl MarketUpdate {
    pub fn sequence(&self) -> u64 {
        match self {
            MarketUpdate::Trade { sequence, .. } | MarketUpdate::OrderStatus { sequence, .. } => *sequence,
        }
    }
}

fn status_update(log: &Log, status: OrderStatus) -> MarketUpdate {
    let order = log.order();
    MarketUpdate::OrderStatus {
        symbol: log.symbol.clone(),
        sequence: log.sequence,
        order_id: order.order_id,
        account_id: order.account_id,
        status,
        remaining: order.amount,
    }
}

/// Project logs into market updates, preserving order
///
/// A match yields a trade, followed by a partial fill status for the maker
/// when it still rests. Taker partial fills are not reported on their own;
/// the taker's final state arrives as an opened, completed or cancelled log.
pub fn project(logs: &[Log]) -> Vec<MarketUpdate> {
    let mut updates = Vec::with_capacity(logs.len());

    for log in logs {
        match &log.log_type {
            LogType::OrderMatched { taker, maker, price, amount } => {
                updates.push(MarketUpdate::Trade {
                    symbol: log.symbol.clone(),
                    sequence: log.sequence,
                    taker_order_id: taker.order_id,
                    maker_order_id: maker.order_id,
                    taker_account_id: taker.account_id,
                    maker_account_id: maker.account_id,
                    side: taker.side,
                    price: *price,
                    amount: *amount,
                    timestamp: log.timestamp,
                });
                if !maker.is_filled() {
                    updates.push(MarketUpdate::OrderStatus {
                        symbol: log.symbol.clone(),
                        sequence: log.sequence,
                        order_id: maker.order_id,
                        account_id: maker.account_id,
                        status: OrderStatus::PartiallyFilled,
                        remaining: maker.amount,
                    });
                }
            }
            LogType::OrderOpened { .. } => updates.push(status_update(log, OrderStatus::Open)),
            LogType::OrderCompleted { .. } => updates.push(status_update(log, OrderStatus::Filled)),
            LogType::OrderCancelled { .. } => updates.push(status_update(log, OrderStatus::Canceled)),
        }
    }

    updates
}

/// Destination for logs produced by the engine
pub trait LogSink {
    fn publish(&mut self, logs: &[Log]);
}

impl LogSink for Vec<Log> {
    fn publish(&mut self, logs: &[Log]) {
        self.extend_from_slice(logs);
    }
}

/// Sink that keeps the projected market updates
#[derive(Debug, Default)]
pub struct FeedProjector {
    updates: Vec<MarketUpdate>,
}

impl FeedProjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> &[MarketUpdate] {
        &self.updates
    }

    /// Take the buffered updates, leaving the projector empty
    pub fn drain(&mut self) -> Vec<MarketUpdate> {
        std::mem::take(&mut self.updates)
    }
}

impl LogSink for FeedProjector {
    fn publish(&mut self, logs: &[Log]) {
        self.updates.extend(project(logs));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::OrderBook;
    use std::str::FromStr;
    use types::order::Order;

    fn limit(id: u64, side: Side, price: u64, amount: &str) -> Order {
        Order::limit(
            OrderId::new(id),
            AccountId::new(),
            MarketId::new("HOT/WETH"),
            side,
            Price::from_u64(price),
            Quantity::from_str(amount).unwrap(),
            1708123456789000000,
        )
    }

    #[test]
    fn test_project_partial_fill() {
        let mut book = OrderBook::new(MarketId::new("HOT/WETH"));
        let mut logs = book.place_order(limit(1, Side::Buy, 5, "100")).unwrap();
        logs.extend(book.place_order(limit(2, Side::Sell, 5, "30")).unwrap());

        let updates = project(&logs);

        assert_eq!(updates.len(), 4);
        assert!(matches!(
            &updates[0],
            MarketUpdate::OrderStatus { status: OrderStatus::Open, order_id, .. } if *order_id == OrderId::new(1)
        ));
        match &updates[1] {
            MarketUpdate::Trade { maker_order_id, taker_order_id, side, amount, .. } => {
                assert_eq!(*maker_order_id, OrderId::new(1));
                assert_eq!(*taker_order_id, OrderId::new(2));
                assert_eq!(*side, Side::Sell);
                assert_eq!(*amount, Quantity::from_u64(30));
            }
            other => panic!("unexpected update {other:?}"),
        }
        assert!(matches!(
            &updates[2],
            MarketUpdate::OrderStatus { status: OrderStatus::PartiallyFilled, remaining, .. }
                if *remaining == Quantity::from_u64(70)
        ));
        assert!(matches!(
            &updates[3],
            MarketUpdate::OrderStatus { status: OrderStatus::Filled, order_id, .. } if *order_id == OrderId::new(2)
        ));
    }

    #[test]
    fn test_projector_sink_buffers_updates() {
        let mut book = OrderBook::new(MarketId::new("HOT/WETH"));
        let mut projector = FeedProjector::new();

        projector.publish(&book.place_order(limit(1, Side::Sell, 5, "10")).unwrap());
        projector.publish(&book.place_order(limit(2, Side::Buy, 5, "10")).unwrap());

        // open, trade, maker filled, taker filled
        assert_eq!(projector.updates().len(), 4);
        let drained = projector.drain();
        assert!(drained.windows(2).all(|w| w[0].sequence() <= w[1].sequence()));
        assert!(projector.updates().is_empty());
    }

    #[test]
    fn test_vec_sink_collects_logs() {
        let mut book = OrderBook::new(MarketId::new("HOT/WETH"));
        let mut sink: Vec<Log> = Vec::new();

        sink.publish(&book.place_order(limit(1, Side::Sell, 5, "10")).unwrap());

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].label(), "OrderOpened");
    }

    #[test]
    fn test_update_json_tag() {
        let mut book = OrderBook::new(MarketId::new("HOT/WETH"));
        let logs = book.place_order(limit(1, Side::Sell, 5, "10")).unwrap();

        let value = serde_json::to_value(&project(&logs)[0]).unwrap();
        assert_eq!(value["kind"], "order_status");
        assert_eq!(value["status"], "OPEN");
    }
}
