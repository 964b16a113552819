//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::PriceLevel;
use super::BookSide;

/// Bid (buy) side order book
///
/// Orders are sorted by price descending, so the highest bid is first.
/// Within a price level lower order ids come first.
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    /// Price levels keyed ascending; iterated from the back
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a resting order at `price`
    pub fn insert(&mut self, price: Price, order: Order) {
        self.levels.entry(price).or_default().insert(order);
    }

    /// Remove an order from the bid book
    pub fn remove(&mut self, order_id: &OrderId, price: Price) -> Option<Order> {
        let level = self.levels.get_mut(&price)?;
        let order = level.remove(order_id)?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(order)
    }

    pub fn get(&self, order_id: &OrderId, price: Price) -> Option<&Order> {
        self.levels.get(&price)?.get(order_id)
    }

    /// Get the best bid (highest price) with its aggregated quantity
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.levels
            .iter()
            .next_back()
            .map(|(price, level)| (*price, level.total_quantity()))
    }

    pub(crate) fn best_bid_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next_back()
            .map(|(price, level)| (*price, level))
    }

    /// Get depth snapshot (top N price levels)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity)> {
        self.levels
            .iter()
            .rev()
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity()))
            .collect()
    }

    /// Resting orders in matching priority
    pub fn orders(&self) -> impl Iterator<Item = &Order> + '_ {
        self.levels.values().rev().flat_map(PriceLevel::iter)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

}

impl BookSide for BidBook {
    fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.best_bid_level_mut()
    }

    fn prune_level(&mut self, price: Price) {
        if self.levels.get(&price).is_some_and(PriceLevel::is_empty) {
            self.levels.remove(&price);
        }
    }
}
