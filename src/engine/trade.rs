use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

//trade action (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
        }
    }
}

//one executed decision, append-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub timestamp: DateTime<Utc>,
    pub action: TradeAction,
    pub rsi_at_decision: f64,
    pub price: f64,
    pub shares_after: u64,
    pub balance_after: f64,
    //net worth before the trade executed
    pub net_worth_at_decision: f64,
}

//net worth observed at one visited step, before any trade on that step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetWorthSample {
    pub index: usize,
    pub value: f64,
}
