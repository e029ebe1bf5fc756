mod result;
mod side;
mod trade;

pub use result::SimulationResult;
pub use side::Side;
pub use trade::{SkipReason, SkippedTrade, Trade};
