pub mod summary;
pub mod timeseries;

pub use summary::SummaryMetrics;
pub use timeseries::{net_worth_curve, EquityPoint};
