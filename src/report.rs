//console trade table and csv exports of a finished run

use crate::engine::Trade;
use crate::metrics::EquityPoint;
use anyhow::{Context, Result};
use prettytable::{Cell, Row, Table};
use std::io::Write;
use std::path::Path;

//builds the seven-column trade log table
pub fn trade_table(trades: &[Trade]) -> Table {
    let mut table = Table::new();

    table.add_row(Row::new(
        [
            "Date",
            "Action",
            "RSI",
            "Price",
            "Shares",
            "Balance",
            "Net Worth",
        ]
        .iter()
        .map(|h| Cell::new(h))
        .collect(),
    ));

    for trade in trades {
        table.add_row(Row::new(vec![
            Cell::new(&trade.timestamp.format("%Y-%m-%d").to_string()),
            Cell::new(&trade.action.to_string()),
            Cell::new(&format!("{:.2}", trade.rsi_at_decision)),
            Cell::new(&format!("${:.2}", trade.price)),
            Cell::new(&trade.shares_after.to_string()),
            Cell::new(&format!("${:.2}", trade.balance_after)),
            Cell::new(&format!("${:.2}", trade.net_worth_at_decision)),
        ]));
    }

    table
}

//prints the trade log to stdout
pub fn print_trade_table(trades: &[Trade]) {
    if trades.is_empty() {
        println!("No trades were executed.");
        return;
    }
    trade_table(trades).printstd();
}

pub fn write_trades<W: Write>(trades: &[Trade], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for trade in trades {
        writer.serialize(trade).context("Failed to write trade record")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_net_worth<W: Write>(curve: &[EquityPoint], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for point in curve {
        writer
            .serialize(point)
            .context("Failed to write net worth record")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_trades_csv(trades: &[Trade], path: &Path) -> Result<()> {
    let file =
        std::fs::File::create(path).context(format!("Failed to create {:?}", path))?;
    write_trades(trades, file)
}

pub fn write_net_worth_csv(curve: &[EquityPoint], path: &Path) -> Result<()> {
    let file =
        std::fs::File::create(path).context(format!("Failed to create {:?}", path))?;
    write_net_worth(curve, file)
}
