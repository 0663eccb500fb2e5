use crate::portfolio::position::Position;
use serde::{Deserialize, Serialize};

//cash/position bookkeeping for a single asset, owned by the simulator for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    //uninvested cash, never negative
    pub cash_balance: f64,

    //flat or long
    pub position: Position,

    //whole shares held, 0 when flat
    pub shares_held: u64,

    //decimal places cash is rounded to after each transaction
    cash_decimals: u32,
}

impl Ledger {
    //creates a flat ledger holding only cash
    pub fn new(initial_cash: f64, cash_decimals: u32) -> Self {
        Ledger {
            cash_balance: initial_cash,
            position: Position::Flat,
            shares_held: 0,
            cash_decimals,
        }
    }

    //cash plus market value of held shares at the given price
    pub fn net_worth(&self, price: f64) -> f64 {
        self.cash_balance + self.shares_held as f64 * price
    }

    //true when flat and at least one whole share is affordable
    pub fn can_buy(&self, price: f64) -> bool {
        self.position.is_flat() && price > 0.0 && self.cash_balance >= price
    }

    //spends the whole balance on whole shares, returns the number bought
    pub fn buy(&mut self, price: f64) -> Option<u64> {
        if !self.can_buy(price) {
            return None;
        }

        let mut shares = (self.cash_balance / price).floor() as u64;
        //only step down when the overshoot survives rounding, exact fits keep every share
        if round_to(self.cash_balance - shares as f64 * price, self.cash_decimals) < 0.0 {
            shares -= 1;
        }

        let cost = shares as f64 * price;
        self.cash_balance = round_to(self.cash_balance - cost, self.cash_decimals).max(0.0);
        self.shares_held = shares;
        self.position = Position::Long;

        Some(shares)
    }

    //liquidates the whole position, returns the number of shares sold
    pub fn sell(&mut self, price: f64) -> Option<u64> {
        if !self.position.is_long() {
            return None;
        }

        let shares = self.shares_held;
        let proceeds = shares as f64 * price;
        self.cash_balance = round_to(self.cash_balance + proceeds, self.cash_decimals);
        self.shares_held = 0;
        self.position = Position::Flat;

        Some(shares)
    }
}

//rounds half away from zero to the given number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
