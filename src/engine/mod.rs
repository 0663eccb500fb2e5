pub mod simulator;
pub mod trade;

pub use simulator::{PortfolioSimulator, SimulationResult, SimulatorConfig, TraversalOrder};
pub use trade::{NetWorthSample, Trade, TradeAction};
