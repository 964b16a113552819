//! Matching Engine Service
//!
//! Limit order book matching for spot markets. Each product has its own
//! [`OrderBook`]; [`MatchingEngine`] routes requests to the right one.
//!
//! **Key Invariants:**
//! - Price-time priority: best price first, then lowest order id
//! - Trades execute at the resting order's price
//! - Deterministic matching (same inputs, same logs)
//! - Conservation of quantity across every match step

pub mod book;
pub mod matching;
pub mod engine;
pub mod events;
pub mod config;
pub mod feed;

pub use book::{BookError, OrderBook};
pub use config::{BookConfig, ConfigError, DailyLimitConfig, EngineConfig};
pub use engine::{EngineError, MatchingEngine};
pub use events::{Log, LogType, Party};
pub use feed::{FeedProjector, LogSink, MarketUpdate};
