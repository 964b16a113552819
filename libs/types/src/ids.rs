//! Identifier types for exchange entities
//!
//! Order ids are assigned by the caller from a monotonic counter and double as
//! the time-priority tie-breaker inside a price level. Accounts keep UUID v7
//! identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an order
///
/// Lower ids were submitted earlier and win ties at equal price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trading account that owns orders
///
/// Daily traded value is tracked per account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Fresh time-ordered account id
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Fixed id, for fixtures and replays
    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AccountId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Product symbol, `BASE/QUOTE` (e.g. `HOT/WETH`)
///
/// One order book exists per symbol. Ordering is lexicographic so registries
/// iterate markets deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(String);

impl MarketId {
    /// # Panics
    /// Panics unless the symbol has a non-empty base and quote around a `/`
    pub fn new(symbol: impl Into<String>) -> Self {
        match Self::try_new(symbol) {
            Some(market) => market,
            None => panic!("market symbol must be BASE/QUOTE"),
        }
    }

    pub fn try_new(symbol: impl Into<String>) -> Option<Self> {
        let symbol = symbol.into();
        let (base, quote) = symbol.split_once('/')?;
        if base.is_empty() || quote.is_empty() || quote.contains('/') {
            return None;
        }
        Some(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_ordering() {
        let first = OrderId::new(1);
        let second = OrderId::from(2);
        assert!(first < second);
        assert_eq!(second.value(), 2);
    }

    #[test]
    fn test_order_id_serialization() {
        let id = OrderId::new(42);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "42");
        let deserialized: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_account_id_fixed() {
        assert_eq!(AccountId::from_u128(7), AccountId::from_u128(7));
        assert_ne!(AccountId::new(), AccountId::new());
    }

    #[test]
    fn test_market_id_display() {
        let market = MarketId::new("HOT/WETH");
        assert_eq!(market.as_str(), "HOT/WETH");
        assert_eq!(market.to_string(), "HOT/WETH");
    }

    #[test]
    fn test_market_id_rejects_malformed() {
        for symbol in ["HOTWETH", "/WETH", "HOT/", "A/B/C"] {
            assert!(MarketId::try_new(symbol).is_none(), "{symbol}");
        }
    }

    #[test]
    #[should_panic(expected = "BASE/QUOTE")]
    fn test_market_id_new_panics() {
        MarketId::new("HOTWETH");
    }

    #[test]
    fn test_market_id_ordering() {
        let mut markets = vec![MarketId::new("HOT/WETH"), MarketId::new("BTC/USDT")];
        markets.sort();
        assert_eq!(markets[0].as_str(), "BTC/USDT");
    }
}
