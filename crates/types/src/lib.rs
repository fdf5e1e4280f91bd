//! Core types for the market simulation.
//!
//! This crate provides the shared vocabulary used across the simulation:
//! time and asset-name aliases, asset classification, trading intentions,
//! trade and performance records, and the specification types from which
//! markets and agents are constructed.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Time & Naming
// =============================================================================

/// Discrete simulation time step (one step = one trading day).
pub type Time = u64;

/// Name of a tradeable asset within a market (e.g., "ACME", "ACME_CALL").
pub type AssetName = String;

/// Reserved pseudo-asset name for cash balances.
///
/// Cash is recognized by name alone; it is never an instrument in the
/// market registry and always values at face amount.
pub const CASH: &str = "Cash";

// =============================================================================
// Asset Classification
// =============================================================================

/// Broad classification of an asset as seen through the market registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    /// The reserved cash pseudo-asset.
    Cash,
    /// A primary instrument with its own stochastic price process.
    Stock,
    /// A derivative priced off a single underlying instrument.
    Option,
    /// Anything the registry does not know about.
    Other,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Cash => write!(f, "Cash"),
            AssetKind::Stock => write!(f, "Stock"),
            AssetKind::Option => write!(f, "Option"),
            AssetKind::Other => write!(f, "Other"),
        }
    }
}

/// European option flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    Call,
    Put,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "Call"),
            OptionKind::Put => write!(f, "Put"),
        }
    }
}

// =============================================================================
// Trading
// =============================================================================

/// A single desired trade for the current step.
///
/// Positive `units` is a buy, negative a sell, zero a hold. Intentions are
/// kept as an ordered sequence rather than a map: execution walks them in
/// order and the cash constraint is checked incrementally, so the outcome
/// of a later intention can depend on earlier ones in the same batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeIntent {
    /// Asset to trade.
    pub asset: AssetName,
    /// Signed quantity to trade (may be fractional).
    pub units: f64,
}

impl TradeIntent {
    /// Create a new trading intention.
    pub fn new(asset: impl Into<AssetName>, units: f64) -> Self {
        Self {
            asset: asset.into(),
            units,
        }
    }
}

impl fmt::Display for TradeIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} {}", self.units, self.asset)
    }
}

/// An executed trade, as recorded in an agent's trade history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Step at which the trade executed.
    pub time: Time,
    /// Asset traded.
    pub asset: AssetName,
    /// Signed quantity traded.
    pub units: f64,
}

// =============================================================================
// Performance
// =============================================================================

/// Snapshot of an agent's performance metrics at one step.
///
/// Metrics that are undefined for short histories (Sharpe with fewer than
/// two observations, hit rate with no resolvable trades) are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Step the report was generated at.
    pub time: Time,
    /// Total return relative to the initial holdings valued at initial prices.
    pub asset_return: f64,
    /// Fraction of resolvable trades whose direction matched the next move.
    pub hit_rate: Option<f64>,
    /// Portfolio value at report time.
    pub holding_value: f64,
    /// Holding value minus initial asset value.
    pub cumulative_pnl: f64,
    /// Holding value change since the previous step.
    pub one_day_pnl: f64,
    /// Mean over sample standard deviation of period returns.
    pub sharpe_ratio: Option<f64>,
    /// Largest absolute peak-to-trough decline of the holding value series.
    pub max_drawdown: f64,
}

// =============================================================================
// Construction Specs
// =============================================================================

/// Specification of one market product.
///
/// A market is constructed from a finite ordered list of these. Options
/// must reference an underlier that appears elsewhere in the same list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ProductSpec {
    /// Additive Gaussian noise: `value += N(mu, sigma)`.
    ArithmeticNoise {
        name: AssetName,
        initial_value: f64,
        mu: f64,
        sigma: f64,
    },
    /// Geometric Brownian motion: `value *= exp(N(mu, sigma))`.
    GeometricBrownian {
        name: AssetName,
        initial_value: f64,
        mu: f64,
        sigma: f64,
    },
    /// GBM with a drift component pulling toward an equilibrium price.
    MeanReverting {
        name: AssetName,
        initial_value: f64,
        mu: f64,
        sigma: f64,
        equilibrium: f64,
        speed: f64,
    },
    /// GBM with a drift component following decayed historical log returns.
    Trending {
        name: AssetName,
        initial_value: f64,
        mu: f64,
        sigma: f64,
        trend_scale: f64,
        trend_decay: f64,
    },
    /// European call on an underlier elsewhere in the list.
    EuropeanCall {
        name: AssetName,
        underlier: AssetName,
        strike: f64,
        expiry: f64,
    },
    /// European put on an underlier elsewhere in the list.
    EuropeanPut {
        name: AssetName,
        underlier: AssetName,
        strike: f64,
        expiry: f64,
    },
}

impl ProductSpec {
    /// Name of the product this spec constructs.
    pub fn name(&self) -> &str {
        match self {
            ProductSpec::ArithmeticNoise { name, .. }
            | ProductSpec::GeometricBrownian { name, .. }
            | ProductSpec::MeanReverting { name, .. }
            | ProductSpec::Trending { name, .. }
            | ProductSpec::EuropeanCall { name, .. }
            | ProductSpec::EuropeanPut { name, .. } => name,
        }
    }

    /// Whether this spec describes an option.
    pub fn is_option(&self) -> bool {
        matches!(
            self,
            ProductSpec::EuropeanCall { .. } | ProductSpec::EuropeanPut { .. }
        )
    }

    /// The option flavor, if this spec describes an option.
    pub fn option_kind(&self) -> Option<OptionKind> {
        match self {
            ProductSpec::EuropeanCall { .. } => Some(OptionKind::Call),
            ProductSpec::EuropeanPut { .. } => Some(OptionKind::Put),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_kind_display() {
        assert_eq!(AssetKind::Cash.to_string(), "Cash");
        assert_eq!(AssetKind::Option.to_string(), "Option");
    }

    #[test]
    fn test_trade_intent_display() {
        let buy = TradeIntent::new("ACME", 5.0);
        assert_eq!(buy.to_string(), "+5 ACME");
        let sell = TradeIntent::new("ACME", -2.5);
        assert_eq!(sell.to_string(), "-2.5 ACME");
    }

    #[test]
    fn test_product_spec_name_and_kind() {
        let stock = ProductSpec::GeometricBrownian {
            name: "ACME".into(),
            initial_value: 100.0,
            mu: 0.0,
            sigma: 0.01,
        };
        assert_eq!(stock.name(), "ACME");
        assert!(!stock.is_option());
        assert_eq!(stock.option_kind(), None);

        let call = ProductSpec::EuropeanCall {
            name: "ACME_C100".into(),
            underlier: "ACME".into(),
            strike: 100.0,
            expiry: 252.0,
        };
        assert_eq!(call.name(), "ACME_C100");
        assert!(call.is_option());
        assert_eq!(call.option_kind(), Some(OptionKind::Call));
    }

    #[test]
    fn test_product_spec_serde_round_trip() {
        let spec = ProductSpec::MeanReverting {
            name: "OIL".into(),
            initial_value: 80.0,
            mu: 0.0,
            sigma: 0.02,
            equilibrium: 75.0,
            speed: 0.001,
        };
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"kind\":\"MeanReverting\""));
        let back: ProductSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
