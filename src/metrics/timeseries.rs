use crate::data::PriceBar;
use crate::engine::NetWorthSample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//a point in the net worth curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub equity: f64,
    pub drawdown: f64,
    pub returns: f64,
}

//pairs each sample with its bar's timestamp, in visit order
//samples pointing past the end of the series are dropped rather than assumed to line up
pub fn net_worth_curve(
    series: &[PriceBar],
    samples: &[NetWorthSample],
    initial_cash: f64,
) -> Vec<EquityPoint> {
    let mut curve = Vec::with_capacity(samples.len().min(series.len()));
    let mut peak = initial_cash;
    let mut prev_equity = initial_cash;

    for sample in samples {
        let Some(bar) = series.get(sample.index) else {
            continue;
        };
        let equity = sample.value;

        //update peak
        if equity > peak {
            peak = equity;
        }

        //calculate drawdown
        let drawdown = if peak > 0.0 {
            (peak - equity) / peak
        } else {
            0.0
        };

        //calculate returns
        let returns = if curve.is_empty() || prev_equity == 0.0 {
            0.0
        } else {
            (equity - prev_equity) / prev_equity
        };

        curve.push(EquityPoint {
            index: sample.index,
            timestamp: bar.timestamp,
            equity,
            drawdown,
            returns,
        });
        prev_equity = equity;
    }

    curve
}

//calculates maximum drawdown from equity curve
pub fn max_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    equity_curve
        .iter()
        .map(|point| point.drawdown)
        .fold(0.0, f64::max)
}

//calculates step returns from equity values, skipping steps from zero equity
pub fn calculate_returns(equity_values: &[f64]) -> Vec<f64> {
    equity_values
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};

    fn bars(n: usize) -> Vec<PriceBar> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|i| PriceBar::from_close(start + Duration::days(i as i64), 1.0))
            .collect()
    }

    fn sample(index: usize, value: f64) -> NetWorthSample {
        NetWorthSample { index, value }
    }

    #[test]
    fn samples_take_their_bar_timestamp() {
        let series = bars(3);
        let samples = [sample(2, 100.0), sample(1, 110.0), sample(0, 99.0)];
        let curve = net_worth_curve(&series, &samples, 100.0);

        assert_eq!(curve.len(), 3);
        assert_eq!(curve[0].timestamp, series[2].timestamp);
        assert_eq!(curve[2].timestamp, series[0].timestamp);
        assert_relative_eq!(curve[1].returns, 0.1);
        assert_relative_eq!(curve[2].drawdown, 0.1);
        assert_relative_eq!(max_drawdown(&curve), 0.1);
    }

    #[test]
    fn samples_without_a_bar_are_truncated() {
        let series = bars(2);
        let samples = [sample(0, 1.0), sample(1, 2.0), sample(2, 3.0)];
        let curve = net_worth_curve(&series, &samples, 1.0);
        assert_eq!(curve.len(), 2);
        assert_eq!(curve.last().unwrap().equity, 2.0);
    }

    #[test]
    fn returns_skip_zero_base() {
        assert_eq!(calculate_returns(&[0.0, 5.0, 10.0]), vec![1.0]);
        assert!(calculate_returns(&[1.0]).is_empty());
    }
}
