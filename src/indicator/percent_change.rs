use crate::data::PriceBar;
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//close-to-close percentage change for one bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentChangeRecord {
    pub timestamp: DateTime<Utc>,
    pub percent_change: f64,
}

//one record per bar; the first is always 0 and a zero previous close yields 0
//rather than an error
pub fn generate_percentage_change(
    series: &[PriceBar],
) -> Result<Vec<PercentChangeRecord>, ValidationError> {
    if let Some(index) = series.iter().position(|bar| !bar.close.is_finite()) {
        return Err(ValidationError::missing_field("close", index));
    }

    let mut records = Vec::with_capacity(series.len());

    for (i, bar) in series.iter().enumerate() {
        let percent_change = if i == 0 {
            0.0
        } else {
            let prev = series[i - 1].close;
            if prev == 0.0 {
                0.0
            } else {
                ((bar.close - prev) / prev) * 100.0
            }
        };

        records.push(PercentChangeRecord {
            timestamp: bar.timestamp,
            percent_change,
        });
    }

    Ok(records)
}
