//! European options priced off a single underlying instrument.
//!
//! An option is itself a market product with a current value and a price
//! record, but its evolution is deterministic: every step it is repriced
//! from the underlying's freshly evolved spot using the closed-form
//! Black-Scholes model in [`quant::options`].

use quant::options::{self, PriceGreeks};
use types::{AssetName, OptionKind, Time};

use crate::error::{MarketError, Result};
use crate::record::PriceRecord;

/// A European call or put on one underlying instrument.
#[derive(Debug, Clone)]
pub struct EuropeanOption {
    name: AssetName,
    kind: OptionKind,
    underlier: AssetName,
    strike: f64,
    /// Expiry in time steps (days) since the start of the simulation.
    expiry: f64,
    initial_value: f64,
    current_value: f64,
    greeks: PriceGreeks,
    record: PriceRecord,
}

impl EuropeanOption {
    /// Create an option and price it at time 0.
    ///
    /// `spot` and `daily_vol` come from the underlying instrument. Fails
    /// with [`MarketError::ExpiredOption`] when the expiry is already in
    /// the past at construction.
    pub fn new(
        name: impl Into<AssetName>,
        kind: OptionKind,
        underlier: impl Into<AssetName>,
        strike: f64,
        expiry: f64,
        spot: f64,
        daily_vol: f64,
    ) -> Result<Self> {
        let mut option = Self {
            name: name.into(),
            kind,
            underlier: underlier.into(),
            strike,
            expiry,
            initial_value: 0.0,
            current_value: 0.0,
            greeks: PriceGreeks::default(),
            record: PriceRecord::new(),
        };
        option.reprice(0, spot, daily_vol)?;
        option.initial_value = option.current_value;
        Ok(option)
    }

    /// Option name, unique within a market.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call or put.
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Name of the underlying instrument.
    pub fn underlier(&self) -> &str {
        &self.underlier
    }

    /// Strike price.
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Expiry in time steps.
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Current premium.
    pub fn check_value(&self) -> f64 {
        self.current_value
    }

    /// Premium at construction (time 0).
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// dPrice/dSpot at the last repricing.
    pub fn delta(&self) -> f64 {
        self.greeks.delta
    }

    /// d2Price/dSpot2 at the last repricing.
    pub fn gamma(&self) -> f64 {
        self.greeks.gamma
    }

    /// dPrice/dVol at the last repricing.
    pub fn vega(&self) -> f64 {
        self.greeks.vega
    }

    /// The marked premium history.
    pub fn record(&self) -> &PriceRecord {
        &self.record
    }

    /// The recorded premium at `time`, if any.
    pub fn record_value(&self, time: Time) -> Option<f64> {
        self.record.value_at(time)
    }

    /// Mark the current premium into the record at `time`.
    pub fn mark_current_value_to_record(&mut self, time: Time) -> Result<()> {
        self.record.mark(&self.name, time, self.current_value)
    }

    /// Recompute premium and Greeks from the underlying's state.
    ///
    /// `daily_vol` is annualized as `sigma * sqrt(252)`. A negative
    /// residual maturity is a fatal error, not a silent clamp; at expiry
    /// the option settles to intrinsic value with zero Greeks.
    pub fn reprice(&mut self, time: Time, spot: f64, daily_vol: f64) -> Result<()> {
        let residual_days = self.expiry - time as f64;
        if residual_days < 0.0 {
            return Err(MarketError::ExpiredOption {
                name: self.name.clone(),
                time,
            });
        }

        let tau = residual_days / options::TRADING_DAYS_PER_YEAR;
        let vol = daily_vol * options::TRADING_DAYS_PER_YEAR.sqrt();
        let out = options::european(self.kind, spot, self.strike, vol, tau);
        self.current_value = out.price;
        self.greeks = out;
        Ok(())
    }
}
