use crate::error::ValidationError;
use crate::strategy::{Decision, DecisionContext, Strategy};
use serde::{Deserialize, Serialize};

//rsi below this (strictly) triggers a buy
pub const DEFAULT_OVERSOLD: f64 = 20.0;

//rsi above this (strictly) triggers a sell
pub const DEFAULT_OVERBOUGHT: f64 = 85.0;

//all-in/all-out rsi threshold strategy
//buys the full balance when rsi drops below oversold while flat
//sells the full position when rsi rises above overbought while long
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiThresholdStrategy {
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiThresholdStrategy {
    fn default() -> Self {
        RsiThresholdStrategy {
            oversold: DEFAULT_OVERSOLD,
            overbought: DEFAULT_OVERBOUGHT,
        }
    }
}

impl RsiThresholdStrategy {
    pub fn new(oversold: f64, overbought: f64) -> Result<Self, ValidationError> {
        let strategy = RsiThresholdStrategy {
            oversold,
            overbought,
        };
        strategy.validate()?;
        Ok(strategy)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [("oversold", self.oversold), ("overbought", self.overbought)] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::invalid_parameter(
                    name,
                    format!("must lie in [0, 100], got {}", value),
                ));
            }
        }
        if self.oversold >= self.overbought {
            return Err(ValidationError::invalid_parameter(
                "oversold",
                format!(
                    "must be below overbought ({} >= {})",
                    self.oversold, self.overbought
                ),
            ));
        }
        Ok(())
    }
}

impl Strategy for RsiThresholdStrategy {
    fn decide(&self, context: &DecisionContext) -> Decision {
        //buy is checked first, the two rules are mutually exclusive
        if context.rsi < self.oversold
            && context.position.is_flat()
            && context.price > 0.0
            && context.cash_balance >= context.price
        {
            Decision::Buy
        } else if context.rsi > self.overbought && context.position.is_long() {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }

    fn name(&self) -> &str {
        "RSI Threshold"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::Position;

    fn context(rsi: f64, price: f64, position: Position, cash: f64) -> DecisionContext {
        DecisionContext {
            index: 0,
            rsi,
            price,
            position,
            cash_balance: cash,
            shares_held: if position.is_long() { 10 } else { 0 },
        }
    }

    #[test]
    fn buys_when_oversold_flat_and_funded() {
        let strategy = RsiThresholdStrategy::default();
        assert_eq!(
            strategy.decide(&context(19.9, 100.0, Position::Flat, 100.0)),
            Decision::Buy
        );
    }

    #[test]
    fn thresholds_are_strict() {
        let strategy = RsiThresholdStrategy::default();
        assert_eq!(
            strategy.decide(&context(20.0, 100.0, Position::Flat, 1_000.0)),
            Decision::Hold
        );
        assert_eq!(
            strategy.decide(&context(85.0, 100.0, Position::Long, 0.0)),
            Decision::Hold
        );
    }

    #[test]
    fn no_buy_without_cash_or_while_long() {
        let strategy = RsiThresholdStrategy::default();
        assert_eq!(
            strategy.decide(&context(5.0, 100.0, Position::Flat, 99.99)),
            Decision::Hold
        );
        assert_eq!(
            strategy.decide(&context(5.0, 100.0, Position::Long, 1_000.0)),
            Decision::Hold
        );
        assert_eq!(
            strategy.decide(&context(5.0, 0.0, Position::Flat, 1_000.0)),
            Decision::Hold
        );
    }

    #[test]
    fn sells_only_when_long() {
        let strategy = RsiThresholdStrategy::default();
        assert_eq!(
            strategy.decide(&context(90.0, 120.0, Position::Long, 0.0)),
            Decision::Sell
        );
        assert_eq!(
            strategy.decide(&context(90.0, 120.0, Position::Flat, 1_000.0)),
            Decision::Hold
        );
    }

    #[test]
    fn rejects_inverted_thresholds() {
        assert!(RsiThresholdStrategy::new(85.0, 20.0).is_err());
        assert!(RsiThresholdStrategy::new(20.0, 120.0).is_err());
        assert!(RsiThresholdStrategy::new(30.0, 70.0).is_ok());
    }
}
