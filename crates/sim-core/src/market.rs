//! The market registry: a named collection of products.
//!
//! The market owns every instrument and option, evolves them step by step
//! and maintains the canonical time-stamped price record used for
//! historical lookups. Agents only ever read the market through the
//! `check_*` accessors; `evolve` and `mark_current_value_to_record` are
//! the sole mutators and are driven once per step by the runner.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use types::{AssetKind, AssetName, ProductSpec, Time, CASH};

use crate::error::{MarketError, Result};
use crate::instrument::{Instrument, PriceProcess};
use crate::option::EuropeanOption;

/// A product held by the market registry.
#[derive(Debug, Clone)]
pub enum Product {
    /// Primary instrument with its own stochastic process.
    Stock(Instrument),
    /// Derivative repriced off a primary instrument.
    Option(EuropeanOption),
}

impl Product {
    /// Product name.
    pub fn name(&self) -> &str {
        match self {
            Product::Stock(s) => s.name(),
            Product::Option(o) => o.name(),
        }
    }

    /// Current value.
    pub fn check_value(&self) -> f64 {
        match self {
            Product::Stock(s) => s.check_value(),
            Product::Option(o) => o.check_value(),
        }
    }

    /// Value at construction.
    pub fn initial_value(&self) -> f64 {
        match self {
            Product::Stock(s) => s.initial_value(),
            Product::Option(o) => o.initial_value(),
        }
    }

    /// Recorded value at `time`, if any.
    pub fn record_value(&self, time: Time) -> Option<f64> {
        match self {
            Product::Stock(s) => s.record_value(time),
            Product::Option(o) => o.record_value(time),
        }
    }

    fn mark_current_value_to_record(&mut self, time: Time) -> Result<()> {
        match self {
            Product::Stock(s) => s.mark_current_value_to_record(time),
            Product::Option(o) => o.mark_current_value_to_record(time),
        }
    }
}

/// Named registry of market products.
///
/// Construction fails on duplicate names, on a product claiming the
/// reserved `Cash` name, and on options whose underlier is missing or
/// exposes no volatility parameter.
#[derive(Debug, Clone)]
pub struct Market {
    /// Product names in construction order (evolution and marking order).
    order: Vec<AssetName>,
    products: HashMap<AssetName, Product>,
}

impl Market {
    /// Build a market from an ordered list of product specifications.
    ///
    /// Options are priced at time 0 during construction, so their initial
    /// values reflect their underliers' initial values.
    pub fn from_specs(specs: &[ProductSpec]) -> Result<Self> {
        let mut order = Vec::with_capacity(specs.len());
        let mut seen = HashSet::with_capacity(specs.len());
        let mut products: HashMap<AssetName, Product> = HashMap::with_capacity(specs.len());

        for spec in specs {
            let name = spec.name();
            // Cash is a pseudo-asset recognized by name alone; a product
            // claiming the name would be shadowed by that rule.
            if name == CASH || !seen.insert(name) {
                return Err(MarketError::DuplicateName(name.into()));
            }
            order.push(AssetName::from(name));
            if let Some(product) = Self::build_primary(spec) {
                products.insert(name.into(), product);
            }
        }

        // Second pass: construct options now that every underlier exists.
        for spec in specs {
            let (name, underlier, strike, expiry, kind) = match spec {
                ProductSpec::EuropeanCall {
                    name,
                    underlier,
                    strike,
                    expiry,
                } => (name, underlier, *strike, *expiry, types::OptionKind::Call),
                ProductSpec::EuropeanPut {
                    name,
                    underlier,
                    strike,
                    expiry,
                } => (name, underlier, *strike, *expiry, types::OptionKind::Put),
                _ => continue,
            };

            let (spot, vol) = match products.get(underlier.as_str()) {
                Some(Product::Stock(stock)) => (stock.check_value(), stock.volatility()),
                Some(Product::Option(_)) => {
                    return Err(MarketError::MissingVolatility(underlier.clone()));
                }
                None => {
                    return Err(MarketError::MissingUnderlier {
                        option: name.clone(),
                        underlier: underlier.clone(),
                    });
                }
            };

            let option = EuropeanOption::new(name, kind, underlier, strike, expiry, spot, vol)?;
            products.insert(name.clone(), Product::Option(option));
        }

        Ok(Self { order, products })
    }

    /// Build a primary instrument from a non-option spec.
    fn build_primary(spec: &ProductSpec) -> Option<Product> {
        let instrument = match *spec {
            ProductSpec::ArithmeticNoise {
                ref name,
                initial_value,
                mu,
                sigma,
            } => Instrument::new(name, initial_value, PriceProcess::ArithmeticNoise { mu, sigma }),
            ProductSpec::GeometricBrownian {
                ref name,
                initial_value,
                mu,
                sigma,
            } => Instrument::new(
                name,
                initial_value,
                PriceProcess::GeometricBrownian { mu, sigma },
            ),
            ProductSpec::MeanReverting {
                ref name,
                initial_value,
                mu,
                sigma,
                equilibrium,
                speed,
            } => Instrument::new(
                name,
                initial_value,
                PriceProcess::MeanReverting {
                    mu,
                    sigma,
                    equilibrium,
                    speed,
                },
            ),
            ProductSpec::Trending {
                ref name,
                initial_value,
                mu,
                sigma,
                trend_scale,
                trend_decay,
            } => Instrument::new(
                name,
                initial_value,
                PriceProcess::Trending {
                    mu,
                    sigma,
                    trend_scale,
                    trend_decay,
                },
            ),
            ProductSpec::EuropeanCall { .. } | ProductSpec::EuropeanPut { .. } => return None,
        };
        Some(Product::Stock(instrument))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the market holds no products.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Product names in construction order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(AssetName::as_str)
    }

    /// Look up a product.
    pub fn get(&self, name: &str) -> Option<&Product> {
        self.products.get(name)
    }

    fn product(&self, name: &str) -> Result<&Product> {
        self.products
            .get(name)
            .ok_or_else(|| MarketError::UnknownAsset(name.into()))
    }

    /// Current value of a product.
    pub fn check_value(&self, name: &str) -> Result<f64> {
        Ok(self.product(name)?.check_value())
    }

    /// Construction-time value of a product.
    pub fn check_initial_value(&self, name: &str) -> Result<f64> {
        Ok(self.product(name)?.initial_value())
    }

    /// Classify an asset name. `Cash` is recognized by name alone; names
    /// absent from the registry are [`AssetKind::Other`].
    pub fn check_type(&self, name: &str) -> AssetKind {
        if name == CASH {
            return AssetKind::Cash;
        }
        match self.products.get(name) {
            Some(Product::Stock(_)) => AssetKind::Stock,
            Some(Product::Option(_)) => AssetKind::Option,
            None => AssetKind::Other,
        }
    }

    /// Delta of an option product.
    pub fn check_delta(&self, name: &str) -> Result<f64> {
        match self.product(name)? {
            Product::Option(o) => Ok(o.delta()),
            Product::Stock(_) => Err(MarketError::NotAnOption(name.into())),
        }
    }

    /// Underlier name of an option product.
    pub fn check_underlier(&self, name: &str) -> Result<&str> {
        match self.product(name)? {
            Product::Option(o) => Ok(o.underlier()),
            Product::Stock(_) => Err(MarketError::NotAnOption(name.into())),
        }
    }

    /// Recorded value of a product at `time`.
    pub fn check_record_value(&self, name: &str, time: Time) -> Result<f64> {
        self.product(name)?
            .record_value(time)
            .ok_or(MarketError::NoRecord {
                asset: name.into(),
                time,
            })
    }

    /// Advance every product one step.
    ///
    /// Primary instruments evolve first, then options reprice off the
    /// freshly evolved spots, so within a step every option is consistent
    /// with its underlier.
    pub fn evolve<R: Rng + ?Sized>(&mut self, time: Time, rng: &mut R) -> Result<()> {
        for name in &self.order {
            if let Some(Product::Stock(stock)) = self.products.get_mut(name.as_str()) {
                stock.evolve(time, rng);
            }
        }

        let mut repricings = Vec::new();
        for name in &self.order {
            if let Some(Product::Option(option)) = self.products.get(name.as_str()) {
                let underlier = option.underlier();
                match self.products.get(underlier) {
                    Some(Product::Stock(stock)) => {
                        repricings.push((name.clone(), stock.check_value(), stock.volatility()));
                    }
                    Some(Product::Option(_)) => {
                        return Err(MarketError::MissingVolatility(underlier.into()));
                    }
                    None => {
                        return Err(MarketError::MissingUnderlier {
                            option: name.clone(),
                            underlier: underlier.into(),
                        });
                    }
                }
            }
        }
        for (name, spot, vol) in repricings {
            if let Some(Product::Option(option)) = self.products.get_mut(name.as_str()) {
                option.reprice(time, spot, vol)?;
            }
        }
        Ok(())
    }

    /// Mark every product's current value into its record at `time`.
    pub fn mark_current_value_to_record(&mut self, time: Time) -> Result<()> {
        for name in &self.order {
            if let Some(product) = self.products.get_mut(name.as_str()) {
                product.mark_current_value_to_record(time)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const DAILY_VOL: f64 = 0.06299407883487121; // 1 / sqrt(252)

    fn specs_with_option() -> Vec<ProductSpec> {
        vec![
            ProductSpec::GeometricBrownian {
                name: "ACME".into(),
                initial_value: 100.0,
                mu: 0.01,
                sigma: DAILY_VOL,
            },
            ProductSpec::EuropeanCall {
                name: "ACME_C100".into(),
                underlier: "ACME".into(),
                strike: 100.0,
                expiry: 252.0,
            },
        ]
    }

    /// Pure-drift variant: evolution is exact, option prices at intrinsic.
    fn deterministic_specs() -> Vec<ProductSpec> {
        vec![
            ProductSpec::GeometricBrownian {
                name: "ACME".into(),
                initial_value: 100.0,
                mu: 0.01,
                sigma: 0.0,
            },
            ProductSpec::EuropeanCall {
                name: "ACME_C100".into(),
                underlier: "ACME".into(),
                strike: 100.0,
                expiry: 252.0,
            },
        ]
    }

    #[test]
    fn test_construction_and_lookups() {
        let market = Market::from_specs(&specs_with_option()).unwrap();
        assert_eq!(market.len(), 2);
        assert_eq!(market.check_value("ACME").unwrap(), 100.0);
        assert!((market.check_value("ACME_C100").unwrap() - 38.292).abs() < 0.001);
        assert_eq!(market.check_initial_value("ACME").unwrap(), 100.0);
        assert_eq!(market.check_type("ACME"), AssetKind::Stock);
        assert_eq!(market.check_type("ACME_C100"), AssetKind::Option);
        assert_eq!(market.check_type(CASH), AssetKind::Cash);
        assert_eq!(market.check_type("NOPE"), AssetKind::Other);
        assert_eq!(market.check_underlier("ACME_C100").unwrap(), "ACME");
        assert!((market.check_delta("ACME_C100").unwrap() - 0.691).abs() < 0.001);
    }

    #[test]
    fn test_duplicate_name_fails() {
        let mut specs = specs_with_option();
        specs.push(ProductSpec::ArithmeticNoise {
            name: "ACME".into(),
            initial_value: 1.0,
            mu: 0.0,
            sigma: 0.0,
        });
        assert_eq!(
            Market::from_specs(&specs).unwrap_err(),
            MarketError::DuplicateName("ACME".into())
        );
    }

    #[test]
    fn test_reserved_cash_name_rejected() {
        let specs = vec![ProductSpec::ArithmeticNoise {
            name: CASH.into(),
            initial_value: 1.0,
            mu: 0.0,
            sigma: 0.0,
        }];
        assert!(Market::from_specs(&specs).is_err());
    }

    #[test]
    fn test_missing_underlier_fails() {
        let specs = vec![ProductSpec::EuropeanCall {
            name: "GHOST_C".into(),
            underlier: "GHOST".into(),
            strike: 100.0,
            expiry: 252.0,
        }];
        assert_eq!(
            Market::from_specs(&specs).unwrap_err(),
            MarketError::MissingUnderlier {
                option: "GHOST_C".into(),
                underlier: "GHOST".into()
            }
        );
    }

    #[test]
    fn test_option_on_option_fails() {
        let mut specs = specs_with_option();
        specs.push(ProductSpec::EuropeanCall {
            name: "C_ON_C".into(),
            underlier: "ACME_C100".into(),
            strike: 10.0,
            expiry: 252.0,
        });
        assert_eq!(
            Market::from_specs(&specs).unwrap_err(),
            MarketError::MissingVolatility("ACME_C100".into())
        );
    }

    #[test]
    fn test_unknown_asset_lookups_fail() {
        let market = Market::from_specs(&specs_with_option()).unwrap();
        assert!(matches!(
            market.check_value("NOPE"),
            Err(MarketError::UnknownAsset(_))
        ));
        assert!(matches!(
            market.check_delta("ACME"),
            Err(MarketError::NotAnOption(_))
        ));
        assert!(matches!(
            market.check_underlier("ACME"),
            Err(MarketError::NotAnOption(_))
        ));
    }

    #[test]
    fn test_evolve_reprices_options_off_evolved_spot() {
        let mut market = Market::from_specs(&deterministic_specs()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        market.evolve(1, &mut rng).unwrap();

        // sigma = 0, mu = 0.01: spot moves deterministically.
        let spot = market.check_value("ACME").unwrap();
        assert!((spot - 100.0 * (0.01f64).exp()).abs() < 1e-9);
        // The zero-vol option prices at intrinsic off the evolved spot.
        let premium = market.check_value("ACME_C100").unwrap();
        assert!((premium - (spot - 100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_vol_underlier_prices_finite() {
        let market = Market::from_specs(&deterministic_specs()).unwrap();

        // ATM call on a deterministic underlier: intrinsic premium and a
        // finite delta, never NaN.
        assert_eq!(market.check_value("ACME_C100").unwrap(), 0.0);
        assert_eq!(market.check_delta("ACME_C100").unwrap(), 0.5);
    }

    #[test]
    fn test_record_marking_and_lookup() {
        let mut market = Market::from_specs(&deterministic_specs()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        market.mark_current_value_to_record(0).unwrap();
        market.evolve(1, &mut rng).unwrap();
        market.mark_current_value_to_record(1).unwrap();

        assert_eq!(market.check_record_value("ACME", 0).unwrap(), 100.0);
        assert!(market.check_record_value("ACME", 1).unwrap() > 100.0);
        assert!(matches!(
            market.check_record_value("ACME", 7),
            Err(MarketError::NoRecord { .. })
        ));
        // Re-marking the same step is fatal.
        assert!(matches!(
            market.mark_current_value_to_record(1),
            Err(MarketError::DuplicateRecord { .. })
        ));
    }
}
