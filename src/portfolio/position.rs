use serde::{Deserialize, Serialize};
use std::fmt;

//position state, no shorts and no partial states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Position {
    #[default]
    Flat,
    Long,
}

impl Position {
    //returns true if the position is flat (no open position)
    pub fn is_flat(&self) -> bool {
        matches!(self, Position::Flat)
    }

    //returns true if the position is long
    pub fn is_long(&self) -> bool {
        matches!(self, Position::Long)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Flat => write!(f, "FLAT"),
            Position::Long => write!(f, "LONG"),
        }
    }
}
