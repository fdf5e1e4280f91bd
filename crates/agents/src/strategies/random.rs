//! Reference random policy.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sim_core::Market;
use types::{TradeIntent, CASH};

use crate::error::Result;
use crate::portfolio::Portfolio;
use crate::strategies::Strategy;

/// Buys, sells, or holds each held asset with equal probability.
///
/// For every non-cash holding the trade size is half the held quantity,
/// rounded down, never less than one unit. The generator is owned by the
/// trader so seeded runs reproduce exactly.
#[derive(Debug)]
pub struct RandomTrader {
    rng: StdRng,
}

impl RandomTrader {
    /// Trader seeded from operating-system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Trader with a fixed seed, for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTrader {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomTrader {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(&mut self, portfolio: &Portfolio, _market: &Market) -> Result<Vec<TradeIntent>> {
        let mut intentions = Vec::new();
        for (asset, units) in portfolio.holdings() {
            if asset == CASH {
                continue;
            }
            let trade_num = (units * 0.5).floor().max(1.0);
            let units = match self.rng.random_range(0..3) {
                0 => trade_num,
                1 => -trade_num,
                _ => 0.0,
            };
            intentions.push(TradeIntent::new(asset.clone(), units));
        }
        Ok(intentions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use types::{AssetName, ProductSpec};

    fn market() -> Market {
        Market::from_specs(&[ProductSpec::GeometricBrownian {
            name: "ACME".into(),
            initial_value: 100.0,
            mu: 0.0,
            sigma: 0.0,
        }])
        .unwrap()
    }

    fn portfolio(stock: f64) -> Portfolio {
        let holdings: BTreeMap<AssetName, f64> = BTreeMap::from([
            (CASH.to_string(), 1000.0),
            ("ACME".to_string(), stock),
        ]);
        Portfolio::new(holdings).unwrap()
    }

    #[test]
    fn test_one_intention_per_non_cash_holding() {
        let market = market();
        let mut trader = RandomTrader::with_seed(1);
        let intentions = trader.decide(&portfolio(10.0), &market).unwrap();
        assert_eq!(intentions.len(), 1);
        assert_eq!(intentions[0].asset, "ACME");
        // Half of 10 rounded down: magnitude 5 or a hold.
        assert!(intentions[0].units.abs() == 5.0 || intentions[0].units == 0.0);
    }

    #[test]
    fn test_minimum_trade_size_is_one() {
        let market = market();
        let mut trader = RandomTrader::with_seed(2);
        for _ in 0..20 {
            let intentions = trader.decide(&portfolio(1.0), &market).unwrap();
            assert!(intentions[0].units.abs() == 1.0 || intentions[0].units == 0.0);
        }
    }

    #[test]
    fn test_seeded_decisions_reproduce() {
        let market = market();
        let p = portfolio(10.0);
        let mut a = RandomTrader::with_seed(42);
        let mut b = RandomTrader::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.decide(&p, &market).unwrap(), b.decide(&p, &market).unwrap());
        }
    }
}
