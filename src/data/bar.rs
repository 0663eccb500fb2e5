use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BarError {
    #[error("Non-finite price field '{field}': {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("Negative price field '{field}': {value}")]
    NegativePrice { field: &'static str, value: f64 },
    #[error("Invalid OHLC values: high ({high}) < low ({low})")]
    InvalidHighLow { high: f64, low: f64 },
}

//one time-stamped ohlcv observation, already normalized by the loader
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceBar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    //creates a new PriceBar, enforcing finite non-negative prices and high >= low
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Result<Self, BarError> {
        for (field, value) in [("open", open), ("high", high), ("low", low), ("close", close)] {
            if !value.is_finite() {
                return Err(BarError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(BarError::NegativePrice { field, value });
            }
        }

        if high < low {
            return Err(BarError::InvalidHighLow { high, low });
        }

        Ok(PriceBar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    //creates a PriceBar without validation
    pub fn new_unchecked(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        PriceBar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    //bar carrying only a close price, open/high/low mirror it
    pub fn from_close(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self::new_unchecked(timestamp, close, close, close, close, 0)
    }
}
