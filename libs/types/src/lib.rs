//! Types library for the exchange
//!
//! Value types shared by the matching engine and its downstream consumers.
//!
//! # Modules
//! - `ids`: Identifiers (OrderId, AccountId, MarketId)
//! - `numeric`: Decimal newtypes (Price, Quantity) and the truncation policy
//! - `order`: Order matching state
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod order;
pub mod errors;

/// Everything needed to build and inspect orders
pub mod prelude {
    pub use crate::errors::NumericError;
    pub use crate::ids::{AccountId, MarketId, OrderId};
    pub use crate::numeric::{Price, Quantity};
    pub use crate::order::{Order, OrderStatus, OrderType, Side};
}
