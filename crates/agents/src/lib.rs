//! Trading agents for the market simulation.
//!
//! An agent couples a named portfolio with a pluggable decision-making
//! strategy and drives both through the per-step protocol:
//!
//! 1. [`Agent::decision_making`] - the strategy produces intentions
//! 2. [`Agent::trade`] - intentions execute against market prices
//! 3. [`Agent::mark_holding_values`] - the portfolio value is recorded
//! 4. [`Agent::generate_performance_report`] - metrics are snapshotted
//!
//! Modules:
//!
//! - [`portfolio`] - Holdings, trade execution, valuation history
//! - [`performance`] - Return, hit rate, Sharpe, drawdown analytics
//! - [`strategies`] - The [`Strategy`] trait and reference policies
//! - [`error`] - The agent error taxonomy

pub mod error;
pub mod performance;
pub mod portfolio;
pub mod strategies;

use std::collections::BTreeMap;

use sim_core::Market;
use types::{AssetName, PerformanceRecord, Time, TradeIntent};

pub use error::{AgentError, Result};
pub use portfolio::Portfolio;
pub use strategies::{DeltaHedger, RandomTrader, Strategy};

/// A named market participant.
pub struct Agent {
    name: String,
    portfolio: Portfolio,
    strategy: Box<dyn Strategy>,
    /// Intentions produced this step, pending execution.
    intention: Vec<TradeIntent>,
    /// Performance reports keyed by the step they describe.
    reports: BTreeMap<Time, PerformanceRecord>,
}

impl Agent {
    /// Create an agent from initial holdings and a strategy.
    ///
    /// Holdings must include a `Cash` entry.
    pub fn new(
        name: impl Into<String>,
        initial_holdings: BTreeMap<AssetName, f64>,
        strategy: Box<dyn Strategy>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            portfolio: Portfolio::new(initial_holdings)?,
            strategy,
            intention: Vec::new(),
            reports: BTreeMap::new(),
        })
    }

    /// Agent name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The agent's portfolio.
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Intentions produced by the last decision, pending execution.
    pub fn intention(&self) -> &[TradeIntent] {
        &self.intention
    }

    /// Performance reports in chronological order.
    pub fn performance_history(&self) -> &BTreeMap<Time, PerformanceRecord> {
        &self.reports
    }

    /// Run the strategy and stage its intentions for the next trade call.
    pub fn decision_making(&mut self, market: &Market) -> Result<()> {
        self.intention = self.strategy.decide(&self.portfolio, market)?;
        tracing::debug!(
            agent = %self.name,
            strategy = self.strategy.name(),
            intentions = self.intention.len(),
            "decision made"
        );
        Ok(())
    }

    /// Execute the staged intentions against the market at `time`.
    ///
    /// Intentions are consumed: the staging buffer is cleared whether or
    /// not individual line items were skipped for insufficient cash.
    pub fn trade(&mut self, market: &Market, time: Time) -> Result<()> {
        let intentions = std::mem::take(&mut self.intention);
        self.portfolio.execute(&self.name, &intentions, market, time)
    }

    /// Revalue the portfolio at current market prices.
    pub fn evaluate_holding_asset_values(&mut self, market: &Market) -> Result<f64> {
        self.portfolio.revalue(market)
    }

    /// Revalue the portfolio and record the value at `time`.
    pub fn mark_holding_values(&mut self, market: &Market, time: Time) -> Result<()> {
        self.portfolio.mark_value(market, time)
    }

    /// Compute and store this step's performance report.
    ///
    /// Reports are immutable once stored; a second report for the same
    /// step is fatal.
    pub fn generate_performance_report(
        &mut self,
        market: &Market,
        time: Time,
    ) -> Result<&PerformanceRecord> {
        if self.reports.contains_key(&time) {
            return Err(AgentError::DuplicateReport { time });
        }
        let report = performance::generate_report(&self.portfolio, market, time)?;
        self.reports.insert(time, report);
        Ok(&self.reports[&time])
    }
}
