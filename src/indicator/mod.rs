//percentage change per bar and a rolling-mean rsi over it
//both passes are pure, one record per bar in series order

pub mod percent_change;
pub mod rsi;

use crate::data::PriceBar;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

pub use percent_change::{generate_percentage_change, PercentChangeRecord};
pub use rsi::{calculate_rsi, RsiRecord};

//default rsi lookback
pub const DEFAULT_RSI_WINDOW: usize = 14;

//substituted for a zero average loss before dividing
pub const DEFAULT_EPSILON: f64 = 1e-10;

//indicator parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub window: usize,
    pub epsilon: f64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        IndicatorConfig {
            window: DEFAULT_RSI_WINDOW,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl IndicatorConfig {
    pub fn with_window(window: usize) -> Self {
        IndicatorConfig {
            window,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.window == 0 {
            return Err(ValidationError::invalid_parameter(
                "window",
                "must be at least 1",
            ));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(ValidationError::invalid_parameter(
                "epsilon",
                format!("must be a small positive number, got {}", self.epsilon),
            ));
        }
        Ok(())
    }
}

//runs both indicator passes over a price series
pub fn compute_indicators(
    series: &[PriceBar],
    config: &IndicatorConfig,
) -> Result<Vec<RsiRecord>, ValidationError> {
    let changes = generate_percentage_change(series)?;
    calculate_rsi(&changes, config)
}
