//! Crossing detection logic
//!
//! Determines when an incoming order's price is compatible with a resting
//! order's price.

use types::numeric::Price;
use types::order::{Order, OrderType, Side};

/// Check if an incoming limit price crosses a resting price
///
/// A buy crosses when it bids at least the resting ask; a sell crosses when
/// it asks at most the resting bid.
pub fn incoming_can_match(incoming_side: Side, incoming_price: Price, resting_price: Price) -> bool {
    match incoming_side {
        Side::Buy => incoming_price >= resting_price,
        Side::Sell => incoming_price <= resting_price,
    }
}

/// Check if a taker may trade against a maker quoted at `maker_price`
///
/// Market takers have no price limit and always cross.
pub fn taker_crosses(taker: &Order, maker_price: Price) -> bool {
    match taker.order_type {
        OrderType::Market => true,
        OrderType::Limit { price } => incoming_can_match(taker.side, price, maker_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ids::{AccountId, MarketId, OrderId};
    use types::numeric::Quantity;

    #[test]
    fn test_incoming_buy_can_match() {
        let buy_price = Price::from_u64(50000);
        let sell_price = Price::from_u64(49000);
        assert!(incoming_can_match(Side::Buy, buy_price, sell_price));
        assert!(!incoming_can_match(Side::Buy, sell_price, buy_price));
    }

    #[test]
    fn test_incoming_sell_can_match() {
        let sell_price = Price::from_u64(49000);
        let buy_price = Price::from_u64(50000);
        assert!(incoming_can_match(Side::Sell, sell_price, buy_price));
        assert!(!incoming_can_match(Side::Sell, buy_price, sell_price));
    }

    #[test]
    fn test_equal_prices_cross() {
        let price = Price::from_u64(5);
        assert!(incoming_can_match(Side::Buy, price, price));
        assert!(incoming_can_match(Side::Sell, price, price));
    }

    #[test]
    fn test_market_taker_always_crosses() {
        let taker = Order::market(
            OrderId::new(1),
            AccountId::new(),
            MarketId::new("BTC/USDT"),
            Side::Buy,
            Quantity::from_u64(10),
            0,
        );
        assert!(taker_crosses(&taker, Price::from_u64(1_000_000)));
    }
}
