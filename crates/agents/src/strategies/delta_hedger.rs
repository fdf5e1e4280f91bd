//! Delta-neutral hedging policy.

use std::collections::{BTreeMap, HashMap};

use sim_core::Market;
use types::{AssetKind, AssetName, TradeIntent};

use crate::error::Result;
use crate::portfolio::Portfolio;
use crate::strategies::Strategy;

/// Hedges held options by adjusting the underlying position.
///
/// Each step the hedger reads every held option's delta, aggregates the
/// delta exposure per underlier and emits the adjustment that moves the
/// underlying holding to the negated, rounded target. With no option
/// holdings it trades nothing.
#[derive(Debug, Default)]
pub struct DeltaHedger {
    /// Delta exposure per held option, rebuilt on every evaluation.
    current_delta: HashMap<AssetName, f64>,
}

impl DeltaHedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta exposure per held option from the last evaluation.
    pub fn current_delta(&self) -> &HashMap<AssetName, f64> {
        &self.current_delta
    }

    /// Recompute delta exposure for every held option.
    ///
    /// The map is cleared and rebuilt; stale entries from positions that
    /// were closed since the last call do not survive.
    pub fn evaluate_holding_asset_deltas(
        &mut self,
        portfolio: &Portfolio,
        market: &Market,
    ) -> Result<()> {
        self.current_delta.clear();
        for (asset, units) in portfolio.holdings() {
            if market.check_type(asset) == AssetKind::Option {
                let delta = market.check_delta(asset)?;
                self.current_delta.insert(asset.clone(), delta * units);
            }
        }
        Ok(())
    }

    /// Turn the current delta exposures into hedging intentions.
    ///
    /// Options sharing an underlier contribute to a single aggregated
    /// target for that underlier. An intention is emitted only when the
    /// target differs from the held quantity, and it is the adjustment
    /// `target - held`, not an absolute order.
    pub fn generate_delta_hedging_plans(
        &self,
        portfolio: &Portfolio,
        market: &Market,
    ) -> Result<Vec<TradeIntent>> {
        let mut targets: BTreeMap<AssetName, f64> = BTreeMap::new();
        for (option, delta_position) in &self.current_delta {
            let underlier = market.check_underlier(option)?;
            *targets.entry(underlier.into()).or_insert(0.0) += -delta_position.round();
        }

        let mut intentions = Vec::new();
        for (underlier, target) in targets {
            let held = portfolio.quantity(&underlier);
            if target != held {
                intentions.push(TradeIntent::new(underlier, target - held));
            }
        }
        Ok(intentions)
    }
}

impl Strategy for DeltaHedger {
    fn name(&self) -> &str {
        "delta-hedger"
    }

    fn decide(&mut self, portfolio: &Portfolio, market: &Market) -> Result<Vec<TradeIntent>> {
        self.evaluate_holding_asset_deltas(portfolio, market)?;
        self.generate_delta_hedging_plans(portfolio, market)
    }
}
