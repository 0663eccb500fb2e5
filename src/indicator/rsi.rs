//rsi over the percentage-change sequence
//simple rolling means, window shrinks for the first window - 1 records
//a zero average loss becomes epsilon, and so does a zero average gain alongside it,
//so a motionless stretch reads 50

use crate::error::ValidationError;
use crate::indicator::percent_change::PercentChangeRecord;
use crate::indicator::IndicatorConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiRecord {
    pub timestamp: DateTime<Utc>,
    pub percent_change: f64,
    pub gain: f64,
    pub loss: f64,
    pub avg_gain: f64,
    pub avg_loss: f64,
    pub rsi: f64,
}

pub fn calculate_rsi(
    records: &[PercentChangeRecord],
    config: &IndicatorConfig,
) -> Result<Vec<RsiRecord>, ValidationError> {
    config.validate()?;

    let window = config.window;
    if records.len() < window {
        return Err(ValidationError::InsufficientData {
            required: window,
            actual: records.len(),
        });
    }

    let gains: Vec<f64> = records.iter().map(|r| r.percent_change.max(0.0)).collect();
    let losses: Vec<f64> = records
        .iter()
        .map(|r| (-r.percent_change).max(0.0))
        .collect();

    let mut out = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let start = (i + 1).saturating_sub(window);
        let avg_gain = mean(&gains[start..=i]);
        let avg_loss = mean(&losses[start..=i]);

        out.push(RsiRecord {
            timestamp: record.timestamp,
            percent_change: record.percent_change,
            gain: gains[i],
            loss: losses[i],
            avg_gain,
            avg_loss,
            rsi: rsi_from_averages(avg_gain, avg_loss, config.epsilon),
        });
    }

    Ok(out)
}

//rs = avg_gain / avg_loss, rsi = 100 - 100 / (1 + rs)
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64, epsilon: f64) -> f64 {
    let (gain, loss) = if avg_loss == 0.0 {
        let gain = if avg_gain == 0.0 { epsilon } else { avg_gain };
        (gain, epsilon)
    } else {
        (avg_gain, avg_loss)
    };

    let rs = gain / loss;
    100.0 - (100.0 / (1.0 + rs))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
