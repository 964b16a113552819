//! Matching engine core
//!
//! Registry of order books keyed by product symbol. Requests are routed to
//! the book named by the order's symbol; books never share state.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{info, warn};
use types::ids::{MarketId, OrderId};
use types::order::{Order, Side};

use crate::book::{BookError, OrderBook};
use crate::config::{BookConfig, ConfigError, EngineConfig};
use crate::events::Log;
use crate::feed::LogSink;

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no order book for market {0}")]
    UnknownMarket(MarketId),

    #[error("order book for market {0} already exists")]
    DuplicateMarket(MarketId),

    #[error(transparent)]
    Book(#[from] BookError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Main matching engine
#[derive(Debug, Default)]
pub struct MatchingEngine {
    /// Order books per symbol, iterated in symbol order
    books: BTreeMap<MarketId, OrderBook>,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine with one book per configured market
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        let mut engine = Self::new();
        for market in &config.markets {
            market.book.validate()?;
            engine.add_book(market.market_id()?, market.book.clone())?;
        }
        info!(markets = engine.books.len(), "matching engine configured");
        Ok(engine)
    }

    /// Open a book for `symbol`
    pub fn add_book(&mut self, symbol: MarketId, config: BookConfig) -> Result<&mut OrderBook, EngineError> {
        if self.books.contains_key(&symbol) {
            return Err(EngineError::DuplicateMarket(symbol));
        }
        let book = OrderBook::with_config(symbol.clone(), config);
        Ok(self.books.entry(symbol).or_insert(book))
    }

    pub fn book(&self, symbol: &MarketId) -> Option<&OrderBook> {
        self.books.get(symbol)
    }

    pub fn book_mut(&mut self, symbol: &MarketId) -> Option<&mut OrderBook> {
        self.books.get_mut(symbol)
    }

    fn routed(&mut self, symbol: &MarketId) -> Result<&mut OrderBook, EngineError> {
        match self.books.get_mut(symbol) {
            Some(book) => Ok(book),
            None => {
                warn!(symbol = %symbol, "request for unknown market");
                Err(EngineError::UnknownMarket(symbol.clone()))
            }
        }
    }

    /// Place an order on the book of its symbol
    pub fn place_order(&mut self, order: Order) -> Result<Vec<Log>, EngineError> {
        let book = self.routed(&order.symbol)?;
        Ok(book.place_order(order)?)
    }

    /// Place an order and hand the resulting logs to `sink`
    pub fn place_order_with(&mut self, order: Order, sink: &mut dyn LogSink) -> Result<Vec<Log>, EngineError> {
        let logs = self.place_order(order)?;
        sink.publish(&logs);
        Ok(logs)
    }

    pub fn try_match(&mut self, order: Order, commit: bool) -> Result<Vec<Log>, EngineError> {
        let book = self.routed(&order.symbol)?;
        Ok(book.try_match(order, commit)?)
    }

    pub fn cancel_order(
        &mut self,
        symbol: &MarketId,
        order_id: &OrderId,
        side: Side,
    ) -> Result<Option<Order>, EngineError> {
        let book = self.routed(symbol)?;
        Ok(book.cancel_order(order_id, side))
    }

    /// Apply the daily limit filter to every book, in symbol order
    pub fn filter_orders(&mut self, now: i64) -> Vec<Log> {
        self.books
            .values_mut()
            .flat_map(|book| book.filter_orders(now))
            .collect()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &MarketId> + '_ {
        self.books.keys()
    }
}
