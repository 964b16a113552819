//! Matching logic module
//!
//! Price compatibility and the single-step consumption primitive used by the
//! order book's matching loop.

pub mod crossing;
pub mod executor;

pub use crossing::taker_crosses;
pub use executor::{take, MatchError};
