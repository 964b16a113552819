//! Book and engine configuration
//!
//! Settings are owned by an external configuration service; the engine only
//! consumes them, either as a JSON document at startup or through the book
//! setters while running.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::ids::MarketId;

/// Largest fractional precision `rust_decimal` can represent
pub const MAX_SCALE: u32 = 28;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid market symbol: {0}")]
    InvalidMarket(String),

    #[error("scale {scale} exceeds the maximum of {max}")]
    InvalidScale { scale: u32, max: u32 },

    #[error("daily limit threshold must not be negative, got {0}")]
    NegativeThreshold(Decimal),
}

/// Daily traded-value cap per account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyLimitConfig {
    pub enabled: bool,
    /// Maximum quote value an account may trade per UTC day
    pub threshold: Decimal,
}

impl Default for DailyLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: Decimal::ZERO,
        }
    }
}

/// Per-product order book configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Whether the book accepts new orders
    pub open: bool,
    /// Fractional digits kept when market buy funds are converted to amounts
    pub scale: u32,
    pub daily_limit: DailyLimitConfig,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            open: true,
            scale: 8,
            daily_limit: DailyLimitConfig::default(),
        }
    }
}

impl BookConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale > MAX_SCALE {
            return Err(ConfigError::InvalidScale {
                scale: self.scale,
                max: MAX_SCALE,
            });
        }
        if self.daily_limit.threshold < Decimal::ZERO {
            return Err(ConfigError::NegativeThreshold(self.daily_limit.threshold));
        }
        Ok(())
    }
}

/// One market entry of the engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub symbol: String,
    #[serde(default)]
    pub book: BookConfig,
}

impl MarketConfig {
    pub fn market_id(&self) -> Result<MarketId, ConfigError> {
        MarketId::try_new(self.symbol.as_str())
            .ok_or_else(|| ConfigError::InvalidMarket(self.symbol.clone()))
    }
}

/// Engine configuration: the set of markets to open books for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub markets: Vec<MarketConfig>,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        for market in &config.markets {
            market.market_id()?;
            market.book.validate()?;
        }
        Ok(config)
    }
}
