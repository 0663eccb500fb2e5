use crate::data::PriceBar;
use crate::engine::trade::{NetWorthSample, Trade, TradeAction};
use crate::error::ValidationError;
use crate::indicator::RsiRecord;
use crate::portfolio::Ledger;
use crate::strategy::{Decision, DecisionContext, RsiThresholdStrategy, Strategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

//order in which bars are visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    //last index first; for newest-first files this is chronological
    #[default]
    LastToFirst,
    FirstToLast,
}

//configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub initial_cash: f64,
    pub oversold: f64,
    pub overbought: f64,
    pub cash_decimals: u32,
    pub traversal: TraversalOrder,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        SimulatorConfig {
            initial_cash: 10_000.0,
            oversold: crate::strategy::DEFAULT_OVERSOLD,
            overbought: crate::strategy::DEFAULT_OVERBOUGHT,
            cash_decimals: 2,
            traversal: TraversalOrder::LastToFirst,
        }
    }
}

impl SimulatorConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.initial_cash.is_finite() && self.initial_cash >= 0.0) {
            return Err(ValidationError::invalid_parameter(
                "initial_cash",
                format!("must be finite and non-negative, got {}", self.initial_cash),
            ));
        }
        if self.cash_decimals > 10 {
            return Err(ValidationError::invalid_parameter(
                "cash_decimals",
                format!("at most 10 supported, got {}", self.cash_decimals),
            ));
        }
        self.strategy().validate()
    }

    //threshold strategy described by this config
    pub fn strategy(&self) -> RsiThresholdStrategy {
        RsiThresholdStrategy {
            oversold: self.oversold,
            overbought: self.overbought,
        }
    }
}

//result of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    //trades in the order decisions were made
    pub trades: Vec<Trade>,

    //one sample per visited step, in visit order
    pub net_worth: Vec<NetWorthSample>,

    //ledger after the last step, open positions are not liquidated
    pub final_ledger: Ledger,
}

impl SimulationResult {
    //net worth at the last visited step
    pub fn final_net_worth(&self) -> Option<f64> {
        self.net_worth.last().map(|s| s.value)
    }
}

//replays a strategy bar by bar against a cash/position ledger
pub struct PortfolioSimulator<S: Strategy = RsiThresholdStrategy> {
    config: SimulatorConfig,
    strategy: S,
}

impl PortfolioSimulator<RsiThresholdStrategy> {
    //creates a simulator using the config's rsi thresholds
    pub fn new(config: SimulatorConfig) -> Result<Self, ValidationError> {
        let strategy = config.strategy();
        Self::with_strategy(config, strategy)
    }
}

impl<S: Strategy> PortfolioSimulator<S> {
    pub fn with_strategy(config: SimulatorConfig, strategy: S) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(PortfolioSimulator { config, strategy })
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    //runs the replay; fails before touching any state if the inputs are not in lockstep
    pub fn run(
        &self,
        series: &[PriceBar],
        rsi: &[RsiRecord],
    ) -> Result<SimulationResult, ValidationError> {
        if series.len() != rsi.len() {
            return Err(ValidationError::LengthMismatch {
                prices: series.len(),
                indicators: rsi.len(),
            });
        }

        let mut ledger = Ledger::new(self.config.initial_cash, self.config.cash_decimals);
        let mut trades = Vec::new();
        let mut net_worth = Vec::with_capacity(series.len());

        for i in self.visit_order(series.len()) {
            let bar = &series[i];
            let price = bar.close;
            let rsi_value = rsi[i].rsi;

            let worth = ledger.net_worth(price);
            net_worth.push(NetWorthSample {
                index: i,
                value: worth,
            });

            let context = DecisionContext {
                index: i,
                rsi: rsi_value,
                price,
                position: ledger.position,
                cash_balance: ledger.cash_balance,
                shares_held: ledger.shares_held,
            };

            let action = match self.strategy.decide(&context) {
                Decision::Buy => ledger.buy(price).map(|_| TradeAction::Buy),
                Decision::Sell => ledger.sell(price).map(|_| TradeAction::Sell),
                Decision::Hold => None,
            };

            if let Some(action) = action {
                debug!(
                    index = i,
                    %action,
                    rsi = rsi_value,
                    price,
                    shares = ledger.shares_held,
                    balance = ledger.cash_balance,
                    "trade executed"
                );

                trades.push(Trade {
                    timestamp: bar.timestamp,
                    action,
                    rsi_at_decision: rsi_value,
                    price,
                    shares_after: ledger.shares_held,
                    balance_after: ledger.cash_balance,
                    net_worth_at_decision: worth,
                });
            }
        }

        info!(
            strategy = self.strategy.name(),
            bars = series.len(),
            trades = trades.len(),
            final_net_worth = net_worth.last().map(|s| s.value).unwrap_or(ledger.cash_balance),
            position = %ledger.position,
            "simulation finished"
        );

        Ok(SimulationResult {
            trades,
            net_worth,
            final_ledger: ledger,
        })
    }

    fn visit_order(&self, len: usize) -> Box<dyn Iterator<Item = usize>> {
        match self.config.traversal {
            TraversalOrder::LastToFirst => Box::new((0..len).rev()),
            TraversalOrder::FirstToLast => Box::new(0..len),
        }
    }
}
