pub mod rsi_threshold;

use crate::portfolio::Position;

pub use rsi_threshold::{RsiThresholdStrategy, DEFAULT_OVERBOUGHT, DEFAULT_OVERSOLD};

//what a strategy sees at one visited step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionContext {
    //bar index in the price series
    pub index: usize,

    //indicator value for this bar
    pub rsi: f64,

    //closing price for this bar
    pub price: f64,

    //current ledger state
    pub position: Position,
    pub cash_balance: f64,
    pub shares_held: u64,
}

//strategy output for one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

//strategy interface the simulator is generic over
pub trait Strategy {
    //decides what to do at the current step
    fn decide(&self, context: &DecisionContext) -> Decision;

    //returns the strategy name
    fn name(&self) -> &str;
}
