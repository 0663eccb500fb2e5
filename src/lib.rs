//a Rust-based RSI threshold trading simulator for a single asset

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod indicator;
pub mod metrics;
pub mod portfolio;
pub mod report;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::RunConfiguration;
    pub use crate::data::{load_csv, load_csv_from_reader, PriceBar};
    pub use crate::engine::{
        NetWorthSample, PortfolioSimulator, SimulationResult, SimulatorConfig, Trade,
        TradeAction, TraversalOrder,
    };
    pub use crate::error::ValidationError;
    pub use crate::indicator::{
        calculate_rsi, compute_indicators, generate_percentage_change, IndicatorConfig,
        PercentChangeRecord, RsiRecord,
    };
    pub use crate::metrics::{net_worth_curve, EquityPoint, SummaryMetrics};
    pub use crate::portfolio::{Ledger, Position};
    pub use crate::report::{print_trade_table, write_net_worth_csv, write_trades_csv};
    pub use crate::strategy::{Decision, DecisionContext, RsiThresholdStrategy, Strategy};
}
