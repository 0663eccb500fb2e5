pub mod ledger;
pub mod position;

pub use ledger::{round_to, Ledger};
pub use position::Position;
