use crate::engine::{Trade, TradeAction};
use crate::metrics::timeseries::{calculate_returns, max_drawdown, EquityPoint};
use crate::portfolio::Position;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//summary metrics for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub initial_cash: f64,
    pub final_net_worth: f64,
    pub total_return: f64,
    pub total_return_pct: f64,
    pub max_drawdown: f64,
    pub sharpe_ratio: f64,
    pub num_trades: usize,
    pub num_buys: usize,
    pub num_sells: usize,
    pub round_trips: usize,
    pub win_rate: f64,
    pub final_position: Position,
}

impl SummaryMetrics {
    //calculate summary metrics from the net worth curve and trade log
    pub fn from_run(
        equity_curve: &[EquityPoint],
        trades: &[Trade],
        initial_cash: f64,
        final_position: Position,
    ) -> Self {
        let final_net_worth = equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(initial_cash);

        let total_return = final_net_worth - initial_cash;
        let total_return_pct = if initial_cash > 0.0 {
            total_return / initial_cash
        } else {
            0.0
        };

        let equity_values: Vec<f64> = equity_curve.iter().map(|p| p.equity).collect();
        let returns = calculate_returns(&equity_values);

        let num_buys = trades
            .iter()
            .filter(|t| t.action == TradeAction::Buy)
            .count();
        let num_sells = trades.len() - num_buys;

        let trip_results = round_trip_results(trades);
        let winners = trip_results.iter().filter(|&&pnl| pnl > 0.0).count();
        let win_rate = if trip_results.is_empty() {
            0.0
        } else {
            winners as f64 / trip_results.len() as f64
        };

        SummaryMetrics {
            initial_cash,
            final_net_worth,
            total_return,
            total_return_pct,
            max_drawdown: max_drawdown(equity_curve),
            sharpe_ratio: calculate_sharpe_ratio(&returns),
            num_trades: trades.len(),
            num_buys,
            num_sells,
            round_trips: trip_results.len(),
            win_rate,
            final_position,
        }
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        self.to_table().printstd();
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        let rows = [
            ("Initial Cash", format!("${:.2}", self.initial_cash)),
            ("Final Net Worth", format!("${:.2}", self.final_net_worth)),
            (
                "Total Return",
                format!(
                    "${:.2} ({:.2}%)",
                    self.total_return,
                    self.total_return_pct * 100.0
                ),
            ),
            ("Max Drawdown", format!("{:.2}%", self.max_drawdown * 100.0)),
            ("Sharpe Ratio", format!("{:.3}", self.sharpe_ratio)),
            (
                "Trades",
                format!(
                    "{} ({} buys, {} sells)",
                    self.num_trades, self.num_buys, self.num_sells
                ),
            ),
            ("Round Trips", format!("{}", self.round_trips)),
            ("Win Rate", format!("{:.2}%", self.win_rate * 100.0)),
            ("Final Position", format!("{}", self.final_position)),
        ];

        for (name, value) in rows {
            table.add_row(Row::new(vec![Cell::new(name), Cell::new(&value)]));
        }

        table
    }
}

//profit of each completed buy -> sell pair, in log order
fn round_trip_results(trades: &[Trade]) -> Vec<f64> {
    let mut results = Vec::new();
    let mut open: Option<&Trade> = None;

    for trade in trades {
        match (trade.action, open) {
            (TradeAction::Buy, _) => open = Some(trade),
            (TradeAction::Sell, Some(entry)) => {
                results.push((trade.price - entry.price) * entry.shares_after as f64);
                open = None;
            }
            (TradeAction::Sell, None) => {}
        }
    }

    results
}

fn calculate_sharpe_ratio(returns: &[f64]) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let mean = returns.mean();
    let std_dev = returns.std_dev();

    if std_dev == 0.0 || std_dev.is_nan() {
        return 0.0;
    }

    //annualize assuming daily bars
    (mean / std_dev) * (252.0_f64).sqrt()
}
