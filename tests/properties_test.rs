mod common;

use common::*;
use proptest::prelude::*;
use rsisim::prelude::*;

fn closes() -> impl proptest::strategy::Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..1_000.0, 14..80)
}

proptest! {
    #[test]
    fn first_percent_change_is_zero(closes in prop::collection::vec(0.0f64..1_000.0, 1..40)) {
        let records = generate_percentage_change(&series_from_closes(&closes)).unwrap();
        prop_assert_eq!(records.len(), closes.len());
        prop_assert_eq!(records[0].percent_change, 0.0);
    }

    #[test]
    fn rsi_stays_within_bounds(closes in closes(), window in 1usize..=14) {
        let bars = series_from_closes(&closes);
        let rsi = compute_indicators(&bars, &IndicatorConfig::with_window(window)).unwrap();
        prop_assert_eq!(rsi.len(), bars.len());
        for record in &rsi {
            prop_assert!((0.0..=100.0).contains(&record.rsi), "rsi {}", record.rsi);
        }
    }

    #[test]
    fn rsi_is_deterministic(closes in closes()) {
        let changes = generate_percentage_change(&series_from_closes(&closes)).unwrap();
        let config = IndicatorConfig::default();
        prop_assert_eq!(
            calculate_rsi(&changes, &config).unwrap(),
            calculate_rsi(&changes, &config).unwrap()
        );
    }

    #[test]
    fn ledger_is_conserved(
        points in prop::collection::vec((1.0f64..500.0, 0.0f64..100.0), 1..60),
        cash in 0.0f64..50_000.0,
    ) {
        let closes: Vec<f64> = points.iter().map(|p| p.0).collect();
        let bars = series_from_closes(&closes);
        let rsi: Vec<RsiRecord> = bars
            .iter()
            .zip(&points)
            .map(|(bar, &(_, value))| RsiRecord {
                timestamp: bar.timestamp,
                percent_change: 0.0,
                gain: 0.0,
                loss: 0.0,
                avg_gain: 0.0,
                avg_loss: 0.0,
                rsi: value,
            })
            .collect();

        let config = SimulatorConfig { initial_cash: cash, ..Default::default() };
        let result = PortfolioSimulator::new(config).unwrap().run(&bars, &rsi).unwrap();

        prop_assert_eq!(result.net_worth.len(), bars.len());

        let mut open: Option<&Trade> = None;
        for trade in &result.trades {
            prop_assert!(trade.balance_after >= 0.0);
            match trade.action {
                TradeAction::Buy => {
                    prop_assert!(open.is_none());
                    let spent = trade.shares_after as f64 * trade.price;
                    prop_assert!(spent <= trade.net_worth_at_decision + 0.005);
                    prop_assert!(
                        (trade.balance_after + spent - trade.net_worth_at_decision).abs() <= 0.005 + 1e-6
                    );
                    open = Some(trade);
                }
                TradeAction::Sell => {
                    let entry = open.take().unwrap();
                    let proceeds = entry.shares_after as f64 * trade.price;
                    prop_assert!(
                        (trade.balance_after - (entry.balance_after + proceeds)).abs() <= 0.005 + 1e-6
                    );
                }
            }
        }
    }
}
