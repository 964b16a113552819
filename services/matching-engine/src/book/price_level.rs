//! Price level implementation
//!
//! A price level contains all resting orders at a specific price point,
//! keyed by order id so that earlier ids always sit at the front.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Quantity;
use types::order::Order;

/// A price level containing orders at a specific price
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Orders at this price, lowest id first
    orders: BTreeMap<OrderId, Order>,
    /// Total base quantity available at this level
    total_quantity: Quantity,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: BTreeMap::new(),
            total_quantity: Quantity::zero(),
        }
    }

    /// Insert an order, positioned by its id
    pub fn insert(&mut self, order: Order) {
        self.total_quantity = self.total_quantity + order.amount;
        if let Some(replaced) = self.orders.insert(order.order_id, order) {
            self.total_quantity = self.total_quantity.saturating_sub(replaced.amount);
        }
    }

    /// Remove an order by id
    pub fn remove(&mut self, order_id: &OrderId) -> Option<Order> {
        let order = self.orders.remove(order_id)?;
        self.total_quantity = self.total_quantity.saturating_sub(order.amount);
        Some(order)
    }

    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.get(order_id)
    }

    /// Peek at the highest priority order
    pub fn front(&self) -> Option<&Order> {
        self.orders.values().next()
    }

    /// Mutable access to the highest priority order
    ///
    /// Callers that reduce the order's amount must report it through
    /// [`PriceLevel::record_fill`].
    pub fn front_mut(&mut self) -> Option<&mut Order> {
        self.orders.values_mut().next()
    }

    /// Account for `quantity` taken from the front order
    pub fn record_fill(&mut self, quantity: Quantity) {
        self.total_quantity = self.total_quantity.saturating_sub(quantity);
    }

    /// Pop the highest priority order
    pub fn pop_front(&mut self) -> Option<Order> {
        let (_, order) = self.orders.pop_first()?;
        self.total_quantity = self.total_quantity.saturating_sub(order.amount);
        Some(order)
    }

    /// Orders in priority order
    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.values()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}
