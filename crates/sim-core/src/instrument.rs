//! Primary instruments and their stochastic price processes.
//!
//! Each instrument carries one of four evolution rules. All rules draw
//! from an explicit RNG handle so that simulations are reproducible given
//! a seed; none read process-wide random state.

use rand::Rng;
use rand_distr::StandardNormal;
use types::{AssetName, Time};

use crate::error::Result;
use crate::record::PriceRecord;

/// Stochastic evolution rule for a primary instrument.
///
/// All rules perturb the price with a Gaussian draw `N(drift, sigma)`;
/// they differ in how the drift is formed and whether the perturbation is
/// additive or multiplicative (applied through `exp`).
#[derive(Debug, Clone, PartialEq)]
pub enum PriceProcess {
    /// `value += N(mu, sigma)`.
    ArithmeticNoise { mu: f64, sigma: f64 },
    /// `value *= exp(N(mu, sigma))`.
    GeometricBrownian { mu: f64, sigma: f64 },
    /// `value *= exp(N(mu + speed * (equilibrium - value), sigma))`.
    ///
    /// With `speed == 0` this degenerates to plain GBM; with positive
    /// speed the drift pulls the value toward `equilibrium`.
    MeanReverting {
        mu: f64,
        sigma: f64,
        equilibrium: f64,
        speed: f64,
    },
    /// GBM whose drift is augmented by an exponentially decayed weighted
    /// sum of all previously recorded log returns.
    Trending {
        mu: f64,
        sigma: f64,
        trend_scale: f64,
        trend_decay: f64,
    },
}

impl PriceProcess {
    /// The daily volatility parameter of this process.
    pub fn sigma(&self) -> f64 {
        match *self {
            PriceProcess::ArithmeticNoise { sigma, .. }
            | PriceProcess::GeometricBrownian { sigma, .. }
            | PriceProcess::MeanReverting { sigma, .. }
            | PriceProcess::Trending { sigma, .. } => sigma,
        }
    }
}

/// A priced instrument with a stochastic evolution rule and a time-keyed
/// price record.
#[derive(Debug, Clone)]
pub struct Instrument {
    name: AssetName,
    initial_value: f64,
    current_value: f64,
    process: PriceProcess,
    record: PriceRecord,
}

impl Instrument {
    /// Create an instrument at its initial value.
    pub fn new(name: impl Into<AssetName>, initial_value: f64, process: PriceProcess) -> Self {
        Self {
            name: name.into(),
            initial_value,
            current_value: initial_value,
            process,
            record: PriceRecord::new(),
        }
    }

    /// Instrument name, unique within a market.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    pub fn check_value(&self) -> f64 {
        self.current_value
    }

    /// Value at construction; never mutated afterwards.
    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }

    /// Daily volatility parameter, used for option annualization.
    pub fn volatility(&self) -> f64 {
        self.process.sigma()
    }

    /// Replace the base drift `mu`, keeping all other parameters.
    pub fn set_drift(&mut self, mu: f64) {
        match &mut self.process {
            PriceProcess::ArithmeticNoise { mu: m, .. }
            | PriceProcess::GeometricBrownian { mu: m, .. }
            | PriceProcess::MeanReverting { mu: m, .. }
            | PriceProcess::Trending { mu: m, .. } => *m = mu,
        }
    }

    /// The marked price history.
    pub fn record(&self) -> &PriceRecord {
        &self.record
    }

    /// The recorded value at `time`, if any.
    pub fn record_value(&self, time: Time) -> Option<f64> {
        self.record.value_at(time)
    }

    /// Mark the current value into the record at `time`.
    pub fn mark_current_value_to_record(&mut self, time: Time) -> Result<()> {
        self.record.mark(&self.name, time, self.current_value)
    }

    /// Advance the price by one step.
    ///
    /// `time` is only consulted by the trending rule (to weight recorded
    /// log returns); the other rules take it for uniformity.
    pub fn evolve<R: Rng + ?Sized>(&mut self, time: Time, rng: &mut R) {
        let z: f64 = rng.sample(StandardNormal);
        match self.process {
            PriceProcess::ArithmeticNoise { mu, sigma } => {
                self.current_value += mu + sigma * z;
            }
            PriceProcess::GeometricBrownian { mu, sigma } => {
                self.current_value *= (mu + sigma * z).exp();
            }
            PriceProcess::MeanReverting {
                mu,
                sigma,
                equilibrium,
                speed,
            } => {
                let drift = mu + speed * (equilibrium - self.current_value);
                self.current_value *= (drift + sigma * z).exp();
            }
            PriceProcess::Trending {
                mu,
                sigma,
                trend_scale,
                trend_decay,
            } => {
                let drift = mu + trend_scale * self.decayed_trend(time, trend_decay);
                self.current_value *= (drift + sigma * z).exp();
            }
        }
    }

    /// Exponentially decayed weighted sum of recorded log returns.
    ///
    /// Each consecutive record pair contributes its log return weighted by
    /// `exp(-decay * (time - t))`, `t` being the later point of the pair.
    /// With fewer than two recorded points the sum is empty (zero).
    fn decayed_trend(&self, time: Time, decay: f64) -> f64 {
        let mut trend = 0.0;
        let mut prev: Option<(Time, f64)> = None;
        for (t, v) in self.record.iter() {
            if let Some((_, prev_v)) = prev {
                if prev_v > 0.0 && v > 0.0 {
                    let log_return = (v / prev_v).ln();
                    let age = time.saturating_sub(t) as f64;
                    trend += log_return * (-decay * age).exp();
                }
            }
            prev = Some((t, v));
        }
        trend
    }
}
