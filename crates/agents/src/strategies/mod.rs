//! Decision-making policies pluggable into an agent.
//!
//! A strategy reads the portfolio and market and emits an ordered list of
//! trading intentions; it never mutates either. The agent owns the
//! strategy and drives it once per step.

mod delta_hedger;
mod random;

pub use delta_hedger::DeltaHedger;
pub use random::RandomTrader;

use sim_core::Market;
use types::TradeIntent;

use crate::error::Result;
use crate::portfolio::Portfolio;

/// A decision-making policy.
///
/// `decide` runs between the market's step mutation and the agent's
/// trade, so every price and Greek it reads is current for the step.
/// Intention order is preserved downstream; the cash constraint is
/// applied line by line in the order a strategy emits.
pub trait Strategy: Send {
    /// Short policy name for logging.
    fn name(&self) -> &str;

    /// Produce this step's trading intentions.
    fn decide(&mut self, portfolio: &Portfolio, market: &Market) -> Result<Vec<TradeIntent>>;
}
