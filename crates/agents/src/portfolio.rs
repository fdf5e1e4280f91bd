//! Portfolio state: holdings, trade execution, and valuation history.
//!
//! The portfolio embeds everything an agent owns and remembers. Strategy
//! code never mutates it directly; it hands an ordered list of trading
//! intentions to [`Portfolio::execute`], which applies them against the
//! market under the cash constraint.

use std::collections::BTreeMap;

use sim_core::Market;
use types::{AssetName, Time, TradeIntent, TradeRecord, CASH};

use crate::error::{AgentError, Result};

/// Asset holdings plus the histories derived from trading them.
///
/// `holdings` and the initial snapshot are independent maps: mutating one
/// never mutates the other. Both always contain a `Cash` entry.
#[derive(Debug, Clone)]
pub struct Portfolio {
    /// Signed quantity per asset. Non-cash quantities may be fractional.
    holdings: BTreeMap<AssetName, f64>,
    /// Immutable snapshot of `holdings` taken at construction.
    initial_holdings: BTreeMap<AssetName, f64>,
    /// Append-only record of executed trades.
    trade_history: Vec<TradeRecord>,
    /// Marked portfolio value per step, in chronological order.
    value_history: BTreeMap<Time, f64>,
    /// Most recently computed portfolio value.
    current_value: f64,
}

impl Portfolio {
    /// Create a portfolio from initial holdings.
    ///
    /// Fails with [`AgentError::MissingCash`] when no `Cash` entry is
    /// present. The initial snapshot is an independent copy.
    pub fn new(initial_holdings: BTreeMap<AssetName, f64>) -> Result<Self> {
        if !initial_holdings.contains_key(CASH) {
            return Err(AgentError::MissingCash);
        }
        Ok(Self {
            holdings: initial_holdings.clone(),
            initial_holdings,
            trade_history: Vec::new(),
            value_history: BTreeMap::new(),
            current_value: 0.0,
        })
    }

    /// Current holdings.
    pub fn holdings(&self) -> &BTreeMap<AssetName, f64> {
        &self.holdings
    }

    /// Holdings snapshot taken at construction.
    pub fn initial_holdings(&self) -> &BTreeMap<AssetName, f64> {
        &self.initial_holdings
    }

    /// Held quantity of an asset, zero when not held.
    pub fn quantity(&self, asset: &str) -> f64 {
        self.holdings.get(asset).copied().unwrap_or(0.0)
    }

    /// Current cash balance.
    pub fn cash(&self) -> f64 {
        self.quantity(CASH)
    }

    /// Executed trades in execution order.
    pub fn trade_history(&self) -> &[TradeRecord] {
        &self.trade_history
    }

    /// Marked portfolio values in chronological order.
    pub fn value_history(&self) -> &BTreeMap<Time, f64> {
        &self.value_history
    }

    /// Marked portfolio value at `time`, if any.
    pub fn value_at(&self, time: Time) -> Option<f64> {
        self.value_history.get(&time).copied()
    }

    /// The most recently computed portfolio value.
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// Execute an ordered batch of trading intentions at market prices.
    ///
    /// Intentions are processed strictly in order. Each line item executes
    /// only when the remaining cash covers its cost; otherwise it is
    /// silently skipped (no record, no mutation) and processing continues.
    /// Because cash is debited incrementally, later intentions can be
    /// gated by earlier ones in the same batch.
    pub fn execute(
        &mut self,
        agent: &str,
        intentions: &[TradeIntent],
        market: &Market,
        time: Time,
    ) -> Result<()> {
        for intent in intentions {
            let price = market.check_value(&intent.asset)?;
            let cost = price * intent.units;
            if self.cash() >= cost {
                *self.holdings.entry(CASH.into()).or_insert(0.0) -= cost;
                *self.holdings.entry(intent.asset.clone()).or_insert(0.0) += intent.units;
                self.trade_history.push(TradeRecord {
                    time,
                    asset: intent.asset.clone(),
                    units: intent.units,
                });
                tracing::debug!(
                    agent,
                    time,
                    asset = %intent.asset,
                    units = intent.units,
                    cost,
                    "trade executed"
                );
            } else {
                tracing::debug!(
                    agent,
                    time,
                    asset = %intent.asset,
                    units = intent.units,
                    cost,
                    cash = self.cash(),
                    "trade skipped: insufficient cash"
                );
            }
        }
        Ok(())
    }

    /// Value the portfolio at current market prices (read-only).
    ///
    /// `Cash` contributes its face amount; every other holding is valued
    /// at `market.check_value(asset) * quantity`.
    pub fn value(&self, market: &Market) -> Result<f64> {
        let mut total = 0.0;
        for (asset, units) in &self.holdings {
            if asset == CASH {
                total += units;
            } else {
                total += market.check_value(asset)? * units;
            }
        }
        Ok(total)
    }

    /// Value the portfolio and store the result as the current value.
    pub fn revalue(&mut self, market: &Market) -> Result<f64> {
        self.current_value = self.value(market)?;
        Ok(self.current_value)
    }

    /// Value the portfolio and append the result to the value history.
    ///
    /// Marking the same time twice is fatal: the history is append-only.
    pub fn mark_value(&mut self, market: &Market, time: Time) -> Result<()> {
        if self.value_history.contains_key(&time) {
            return Err(AgentError::DuplicateValuation { time });
        }
        let value = self.revalue(market)?;
        self.value_history.insert(time, value);
        Ok(())
    }

    /// Value the initial holdings at each instrument's initial price.
    pub fn initial_value(&self, market: &Market) -> Result<f64> {
        let mut total = 0.0;
        for (asset, units) in &self.initial_holdings {
            if asset == CASH {
                total += units;
            } else {
                total += market.check_initial_value(asset)? * units;
            }
        }
        Ok(total)
    }
}
