//! Order book for a single product
//!
//! Owns both sides of the book and runs the price-time priority matching
//! loop. Every operation is synchronous and expects exclusive access; the
//! caller serializes requests per product.
//!
//! Results are reported as [`Log`] records in emission order. Given the same
//! sequence of calls, a book produces the same state and the same logs.

use std::collections::HashMap;

use tracing::{debug, error, info, warn};
use types::ids::{MarketId, OrderId};
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::ask_book::AskBook;
use super::bid_book::BidBook;
use super::daily::DailyVolume;
use super::{BookError, BookSide};
use crate::config::{BookConfig, DailyLimitConfig};
use crate::events::{Log, LogType, Party};
use crate::matching::{executor, MatchError};

/// Numbers and collects logs for a single operation
struct LogEmitter {
    symbol: MarketId,
    timestamp: i64,
    next_sequence: u64,
    logs: Vec<Log>,
}

impl LogEmitter {
    fn new(symbol: &MarketId, timestamp: i64, next_sequence: u64) -> Self {
        Self {
            symbol: symbol.clone(),
            timestamp,
            next_sequence,
            logs: Vec::new(),
        }
    }

    fn emit(&mut self, log_type: LogType) {
        self.logs.push(Log {
            sequence: self.next_sequence,
            symbol: self.symbol.clone(),
            timestamp: self.timestamp,
            log_type,
        });
        self.next_sequence += 1;
    }

    fn has_matches(&self) -> bool {
        self.logs.iter().any(Log::is_match)
    }
}

/// Where a resident order lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    side: Side,
    price: Price,
}

/// Order book for one trading product
#[derive(Debug, Clone)]
pub struct OrderBook {
    symbol: MarketId,
    config: BookConfig,
    bids: BidBook,
    asks: AskBook,
    /// Resident order ids and their location
    index: HashMap<OrderId, Slot>,
    daily: DailyVolume,
    next_sequence: u64,
}

impl OrderBook {
    /// Create an empty book with default configuration
    pub fn new(symbol: MarketId) -> Self {
        Self::with_config(symbol, BookConfig::default())
    }

    pub fn with_config(symbol: MarketId, config: BookConfig) -> Self {
        info!(
            symbol = %symbol,
            open = config.open,
            scale = config.scale,
            daily_limit = config.daily_limit.enabled,
            "order book created"
        );

        Self {
            symbol,
            config,
            bids: BidBook::new(),
            asks: AskBook::new(),
            index: HashMap::new(),
            daily: DailyVolume::new(),
            next_sequence: 1,
        }
    }

    /// Place an order: match it, then rest a limit remainder
    ///
    /// Re-submitting an id that is already resident returns no logs.
    pub fn place_order(&mut self, order: Order) -> Result<Vec<Log>, BookError> {
        let order_id = order.order_id;
        let logs = self.execute(order, true, true)?;
        debug!(
            symbol = %self.symbol,
            order_id = %order_id,
            logs = logs.len(),
            "order placed"
        );
        Ok(logs)
    }

    /// Run the matching step only
    ///
    /// A limit remainder is never inserted. With `commit == false` the book
    /// is left exactly as it was and the logs describe what would happen.
    pub fn try_match(&mut self, order: Order, commit: bool) -> Result<Vec<Log>, BookError> {
        let order_id = order.order_id;
        let logs = self.execute(order, false, commit)?;
        debug!(
            symbol = %self.symbol,
            order_id = %order_id,
            commit,
            logs = logs.len(),
            "order matched"
        );
        Ok(logs)
    }

    /// Remove a resident order from the given side
    ///
    /// No log is emitted; callers publish the cancellation from the returned
    /// snapshot.
    pub fn cancel_order(&mut self, order_id: &OrderId, side: Side) -> Option<Order> {
        let slot = *self.index.get(order_id)?;
        if slot.side != side {
            return None;
        }

        let order = self.remove_resident(order_id, slot)?;
        debug!(symbol = %self.symbol, order_id = %order_id, ?side, "order cancelled");
        Some(order)
    }

    /// Cancel every resident order whose account exceeded the daily cap
    ///
    /// `now` selects the UTC day the cap applies to. Orders are swept bids
    /// first, then asks, each in matching priority.
    pub fn filter_orders(&mut self, now: i64) -> Vec<Log> {
        if !self.config.daily_limit.enabled {
            return Vec::new();
        }

        self.daily.roll(now);
        let threshold = self.config.daily_limit.threshold;
        let violators: Vec<(OrderId, Slot)> = self
            .bids
            .orders()
            .chain(self.asks.orders())
            .filter(|order| self.daily.traded_at(&order.account_id, now) > threshold)
            .filter_map(|order| Some((order.order_id, *self.index.get(&order.order_id)?)))
            .collect();

        let mut emitter = LogEmitter::new(&self.symbol, now, self.next_sequence);
        for (order_id, slot) in violators {
            if let Some(order) = self.remove_resident(&order_id, slot) {
                emitter.emit(LogType::OrderCancelled {
                    party: Party::Maker,
                    order,
                });
            }
        }
        self.next_sequence = emitter.next_sequence;

        if !emitter.logs.is_empty() {
            info!(
                symbol = %self.symbol,
                cancelled = emitter.logs.len(),
                "orders over the daily limit removed"
            );
        }
        emitter.logs
    }

    fn execute(&mut self, order: Order, rest: bool, commit: bool) -> Result<Vec<Log>, BookError> {
        if self.index.contains_key(&order.order_id) {
            debug!(symbol = %self.symbol, order_id = %order.order_id, "order already resident");
            return Ok(Vec::new());
        }
        if order.symbol != self.symbol {
            return Err(BookError::MarketMismatch {
                expected: self.symbol.clone(),
                actual: order.symbol,
            });
        }
        if !self.config.open {
            warn!(symbol = %self.symbol, order_id = %order.order_id, "order rejected, book closed");
            return Err(BookError::Closed {
                symbol: self.symbol.clone(),
            });
        }

        let mut taker = order;
        let mut emitter = LogEmitter::new(&self.symbol, taker.created_at, self.next_sequence);
        let mut touched = Vec::new();

        let swept = match taker.side {
            Side::Buy => sweep(
                &mut self.asks,
                &mut self.index,
                &mut taker,
                self.config.scale,
                &mut emitter,
                &mut touched,
            ),
            Side::Sell => sweep(
                &mut self.bids,
                &mut self.index,
                &mut taker,
                self.config.scale,
                &mut emitter,
                &mut touched,
            ),
        };

        if let Err(err) = swept {
            error!(
                symbol = %self.symbol,
                order_id = %taker.order_id,
                error = %err,
                "matching aborted"
            );
            self.restore(touched);
            return Err(err.into());
        }

        if taker.is_filled() {
            emitter.emit(LogType::OrderCompleted {
                party: Party::Taker,
                order: taker,
            });
        } else if taker.is_market() {
            emitter.emit(LogType::OrderCancelled {
                party: Party::Taker,
                order: taker,
            });
        } else if rest && commit {
            if !emitter.has_matches() {
                emitter.emit(LogType::OrderOpened {
                    party: Party::Taker,
                    order: taker.clone(),
                });
            }
            self.insert_resident(taker);
        }

        if commit {
            self.next_sequence = emitter.next_sequence;
            self.record_daily_volume(&emitter.logs);
        } else {
            self.restore(touched);
        }

        Ok(emitter.logs)
    }

    fn insert_resident(&mut self, order: Order) {
        let Some(price) = order.price() else {
            return;
        };
        self.index.insert(order.order_id, Slot { side: order.side, price });
        match order.side {
            Side::Buy => self.bids.insert(price, order),
            Side::Sell => self.asks.insert(price, order),
        }
    }

    fn remove_resident(&mut self, order_id: &OrderId, slot: Slot) -> Option<Order> {
        self.index.remove(order_id);
        match slot.side {
            Side::Buy => self.bids.remove(order_id, slot.price),
            Side::Sell => self.asks.remove(order_id, slot.price),
        }
    }

    /// Put touched makers back exactly as they were before matching
    fn restore(&mut self, touched: Vec<Order>) {
        for snapshot in touched {
            let Some(price) = snapshot.price() else {
                continue;
            };
            let slot = Slot { side: snapshot.side, price };
            self.remove_resident(&snapshot.order_id, slot);
            self.insert_resident(snapshot);
        }
    }

    fn record_daily_volume(&mut self, logs: &[Log]) {
        for log in logs {
            if let LogType::OrderMatched { taker, maker, price, amount } = &log.log_type {
                let value = *amount * *price;
                let counted = self.daily.record(taker.account_id, value, log.timestamp)
                    & self.daily.record(maker.account_id, value, log.timestamp);
                if !counted {
                    warn!(
                        symbol = %self.symbol,
                        order_id = %taker.order_id,
                        "trade from a past day left out of daily volume"
                    );
                }
            }
        }
    }

    pub fn symbol(&self) -> &MarketId {
        &self.symbol
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: BookConfig) {
        info!(symbol = %self.symbol, ?config, "order book reconfigured");
        self.config = config;
    }

    pub fn is_open(&self) -> bool {
        self.config.open
    }

    pub fn set_open(&mut self, open: bool) {
        info!(symbol = %self.symbol, open, "order book open flag changed");
        self.config.open = open;
    }

    pub fn set_scale(&mut self, scale: u32) {
        info!(symbol = %self.symbol, scale, "order book scale changed");
        self.config.scale = scale;
    }

    pub fn set_daily_limit(&mut self, daily_limit: DailyLimitConfig) {
        info!(
            symbol = %self.symbol,
            enabled = daily_limit.enabled,
            threshold = %daily_limit.threshold,
            "order book daily limit changed"
        );
        self.config.daily_limit = daily_limit;
    }

    /// Daily traded-value totals
    pub fn daily_volume(&self) -> &DailyVolume {
        &self.daily
    }

    /// Sequence the next emitted log will carry
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    pub fn contains(&self, order_id: &OrderId) -> bool {
        self.index.contains_key(order_id)
    }

    pub fn get_order(&self, order_id: &OrderId) -> Option<&Order> {
        let slot = self.index.get(order_id)?;
        match slot.side {
            Side::Buy => self.bids.get(order_id, slot.price),
            Side::Sell => self.asks.get(order_id, slot.price),
        }
    }

    pub fn order_count(&self) -> usize {
        self.index.len()
    }

    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.bids.best_bid()
    }

    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.asks.best_ask()
    }

    /// Aggregated (bids, asks), best levels first
    pub fn depth_snapshot(&self, depth: usize) -> (Vec<(Price, Quantity)>, Vec<(Price, Quantity)>) {
        (self.bids.depth_snapshot(depth), self.asks.depth_snapshot(depth))
    }

    /// Resident orders: bids then asks, each in matching priority
    pub fn orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.bids.orders().chain(self.asks.orders())
    }
}

/// Consume makers from `makers` in priority order until the taker is filled
/// or the best maker no longer trades
///
/// Each maker is snapshotted into `touched` before its first mutation.
fn sweep<S: BookSide>(
    makers: &mut S,
    index: &mut HashMap<OrderId, Slot>,
    taker: &mut Order,
    scale: u32,
    emitter: &mut LogEmitter,
    touched: &mut Vec<Order>,
) -> Result<(), MatchError> {
    while !taker.is_filled() {
        let Some((price, level)) = makers.best_level_mut() else {
            break;
        };
        let Some(maker) = level.front_mut() else {
            makers.prune_level(price);
            continue;
        };

        if !touched.iter().any(|o: &Order| o.order_id == maker.order_id) {
            touched.push(maker.clone());
        }

        let Some(traded) = executor::take(taker, maker, scale)? else {
            break;
        };

        let maker = maker.clone();
        level.record_fill(traded);
        emitter.emit(LogType::OrderMatched {
            taker: taker.clone(),
            maker: maker.clone(),
            price,
            amount: traded,
        });

        if maker.is_filled() {
            level.pop_front();
            makers.prune_level(price);
            index.remove(&maker.order_id);
            emitter.emit(LogType::OrderCompleted {
                party: Party::Maker,
                order: maker,
            });
        }
    }

    Ok(())
}
