//! Trade execution logic
//!
//! [`take`] performs one matching step between a taker and a resting maker.
//! The trade executes at the maker's price.

use thiserror::Error;
use types::ids::OrderId;
use types::numeric::{self, Quantity};
use types::order::{Order, OrderType, Side};

use super::crossing;

/// Invalid-state errors raised by [`take`]
///
/// These indicate a defect in the caller; the current operation is aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("taker {taker} and maker {maker} are both on the {side:?} side")]
    SameSide {
        taker: OrderId,
        maker: OrderId,
        side: Side,
    },

    #[error("market order {0} cannot act as maker")]
    MarketMaker(OrderId),
}

/// Consume `maker` with `taker`
///
/// Returns the traded base quantity, or `None` when the prices do not cross
/// or the trade would be empty. Nothing is mutated in the `None` case.
///
/// A market buy spends quote funds: they are converted to base units at the
/// maker's price and truncated to `scale` digits, and the taker's funds drop
/// by `traded × price`. Every other taker loses `traded` from its amount.
pub fn take(taker: &mut Order, maker: &mut Order, scale: u32) -> Result<Option<Quantity>, MatchError> {
    if taker.side == maker.side {
        return Err(MatchError::SameSide {
            taker: taker.order_id,
            maker: maker.order_id,
            side: taker.side,
        });
    }

    let maker_price = match maker.order_type {
        OrderType::Limit { price } => price,
        OrderType::Market => return Err(MatchError::MarketMaker(maker.order_id)),
    };

    if !crossing::taker_crosses(taker, maker_price) {
        return Ok(None);
    }

    let traded = if taker.is_market_buy() {
        let affordable = numeric::div_truncate(
            taker.amount.as_decimal(),
            maker_price.as_decimal(),
            scale,
        );
        affordable.min(maker.amount.as_decimal())
    } else {
        taker.amount.min(maker.amount).as_decimal()
    };

    let traded = match Quantity::try_new(traded) {
        Ok(quantity) if !quantity.is_zero() => quantity,
        _ => return Ok(None),
    };

    maker.amount = maker.amount.saturating_sub(traded);
    taker.amount = if taker.is_market_buy() {
        taker.amount.saturating_sub_decimal(traded * maker_price)
    } else {
        taker.amount.saturating_sub(traded)
    };

    Ok(Some(traded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use types::ids::{AccountId, MarketId};
    use types::numeric::Price;

    fn limit(id: u64, side: Side, price: &str, amount: &str) -> Order {
        Order::limit(
            OrderId::new(id),
            AccountId::new(),
            MarketId::new("HOT/WETH"),
            side,
            Price::from_str(price).unwrap(),
            Quantity::from_str(amount).unwrap(),
            1708123456789000000,
        )
    }

    fn market(id: u64, side: Side, amount: &str) -> Order {
        Order::market(
            OrderId::new(id),
            AccountId::new(),
            MarketId::new("HOT/WETH"),
            side,
            Quantity::from_str(amount).unwrap(),
            1708123456789000000,
        )
    }

    fn qty(s: &str) -> Quantity {
        Quantity::from_str(s).unwrap()
    }

    #[test]
    fn test_same_side_is_invalid() {
        let mut taker = limit(2, Side::Buy, "5", "10");
        let mut maker = limit(1, Side::Buy, "5", "10");

        let err = take(&mut taker, &mut maker, 8).unwrap_err();
        assert!(matches!(err, MatchError::SameSide { side: Side::Buy, .. }));
        assert_eq!(maker.amount, qty("10"));
    }

    #[test]
    fn test_market_maker_is_invalid() {
        let mut taker = limit(2, Side::Sell, "5", "10");
        let mut maker = market(1, Side::Buy, "10");

        assert_eq!(
            take(&mut taker, &mut maker, 8),
            Err(MatchError::MarketMaker(OrderId::new(1)))
        );
    }

    #[test]
    fn test_price_mismatch_is_no_trade() {
        let mut taker = limit(2, Side::Buy, "4", "10");
        let mut maker = limit(1, Side::Sell, "5", "10");

        assert_eq!(take(&mut taker, &mut maker, 8), Ok(None));
        assert_eq!(taker.amount, qty("10"));
        assert_eq!(maker.amount, qty("10"));

        let mut taker = limit(3, Side::Sell, "6", "10");
        let mut maker = limit(1, Side::Buy, "5", "10");
        assert_eq!(take(&mut taker, &mut maker, 8), Ok(None));
    }

    #[test]
    fn test_limit_taker_partial_maker() {
        let mut taker = limit(3, Side::Sell, "5", "30");
        let mut maker = limit(1, Side::Buy, "5", "100");

        assert_eq!(take(&mut taker, &mut maker, 8), Ok(Some(qty("30"))));
        assert!(taker.is_filled());
        assert_eq!(maker.amount, qty("70"));
    }

    #[test]
    fn test_limit_taker_exhausts_maker() {
        let mut taker = limit(3, Side::Buy, "6", "25");
        let mut maker = limit(1, Side::Sell, "5", "10");

        assert_eq!(take(&mut taker, &mut maker, 8), Ok(Some(qty("10"))));
        assert!(maker.is_filled());
        assert_eq!(taker.amount, qty("15"));
    }

    #[test]
    fn test_market_sell_ignores_price() {
        let mut taker = market(3, Side::Sell, "4");
        let mut maker = limit(1, Side::Buy, "0.001", "10");

        assert_eq!(take(&mut taker, &mut maker, 8), Ok(Some(qty("4"))));
        assert_eq!(maker.amount, qty("6"));
    }

    #[test]
    fn test_market_buy_spends_funds() {
        let mut taker = market(2, Side::Buy, "20");
        let mut maker = limit(1, Side::Sell, "4", "10");

        // 20 / 4 = 5 base units, costing all 20 funds
        assert_eq!(take(&mut taker, &mut maker, 8), Ok(Some(qty("5"))));
        assert!(taker.is_filled());
        assert_eq!(maker.amount, qty("5"));
    }

    #[test]
    fn test_market_buy_capped_by_maker_supply() {
        let mut taker = market(2, Side::Buy, "100");
        let mut maker = limit(1, Side::Sell, "4", "10");

        assert_eq!(take(&mut taker, &mut maker, 8), Ok(Some(qty("10"))));
        assert!(maker.is_filled());
        assert_eq!(taker.amount, qty("60"));
    }

    #[test]
    fn test_market_buy_truncates_then_stalls() {
        let mut taker = market(2, Side::Buy, "1.04944");
        let mut maker = limit(1, Side::Sell, "99.98", "1");

        assert_eq!(take(&mut taker, &mut maker, 5), Ok(Some(qty("0.01049"))));
        assert_eq!(taker.amount, qty("0.0006498"));
        assert_eq!(maker.amount, qty("0.98951"));

        // Residual funds buy less than one unit at this scale
        assert_eq!(take(&mut taker, &mut maker, 5), Ok(None));
        assert_eq!(taker.amount, qty("0.0006498"));
        assert_eq!(maker.amount, qty("0.98951"));
    }
}
