//! Closed-form Black-Scholes pricing with Greeks.
//!
//! Zero interest rate throughout:
//!
//! ```text
//! d1 = (ln(S/K) + sigma^2/2 * tau) / (sigma * sqrt(tau))
//! d2 = d1 - sigma * sqrt(tau)
//! call = S * Phi(d1) - K * Phi(d2)
//! put  = K * Phi(-d2) - S * Phi(-d1)
//! ```
//!
//! with `Phi` the standard normal CDF, `S` the spot, `K` the strike, `sigma`
//! the annualized volatility and `tau` the residual maturity in years.

use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use types::OptionKind;

/// Trading days per year, used to annualize daily volatility and maturities.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Residual maturities below this (in years) price at intrinsic value.
const AT_EXPIRY_EPS: f64 = 1e-6;

/// `vol * sqrt(tau)` below this prices in the deterministic limit.
const DETERMINISTIC_EPS: f64 = 1e-6;

/// Price and first-order sensitivities of a European option.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceGreeks {
    /// Option premium.
    pub price: f64,
    /// dPrice/dSpot.
    pub delta: f64,
    /// d2Price/dSpot2.
    pub gamma: f64,
    /// dPrice/dVol.
    pub vega: f64,
}

/// Price a European option and compute its Greeks.
///
/// `vol` is the annualized volatility and `tau` the residual maturity in
/// years; the caller is responsible for rejecting negative maturities. At
/// (or within [`AT_EXPIRY_EPS`] of) expiry the option settles to intrinsic
/// value with all Greeks at zero. A vanishing `vol * sqrt(tau)` prices in
/// the deterministic limit: intrinsic premium, step-function delta.
pub fn european(kind: OptionKind, spot: f64, strike: f64, vol: f64, tau: f64) -> PriceGreeks {
    if tau < AT_EXPIRY_EPS {
        let intrinsic = match kind {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        };
        return PriceGreeks {
            price: intrinsic,
            ..Default::default()
        };
    }

    let vol_sqrt_tau = vol * tau.sqrt();
    if vol_sqrt_tau < DETERMINISTIC_EPS {
        // Deterministic underlier: d1 would be 0/0. Price the vol -> 0
        // limit instead: intrinsic premium, step-function delta.
        let step = if spot > strike {
            1.0
        } else if spot < strike {
            0.0
        } else {
            0.5
        };
        let (price, delta) = match kind {
            OptionKind::Call => ((spot - strike).max(0.0), step),
            OptionKind::Put => ((strike - spot).max(0.0), step - 1.0),
        };
        return PriceGreeks {
            price,
            delta,
            gamma: 0.0,
            vega: 0.0,
        };
    }

    let normal = Normal::standard();
    let d1 = ((spot / strike).ln() + 0.5 * vol * vol * tau) / vol_sqrt_tau;
    let d2 = d1 - vol_sqrt_tau;

    let (price, delta) = match kind {
        OptionKind::Call => (
            spot * normal.cdf(d1) - strike * normal.cdf(d2),
            normal.cdf(d1),
        ),
        OptionKind::Put => (
            strike * normal.cdf(-d2) - spot * normal.cdf(-d1),
            normal.cdf(d1) - 1.0,
        ),
    };

    let pdf_d1 = normal.pdf(d1);
    PriceGreeks {
        price,
        delta,
        gamma: pdf_d1 / (spot * vol_sqrt_tau),
        vega: spot * pdf_d1 * tau.sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Annualized vol of 1.0 corresponds to a daily vol of 1/sqrt(252).
    const UNIT_VOL: f64 = 1.0;

    #[test]
    fn test_atm_call_one_year() {
        let out = european(OptionKind::Call, 100.0, 100.0, UNIT_VOL, 1.0);
        assert!((out.price - 38.292).abs() < 0.001);
        assert!((out.delta - 0.691).abs() < 0.001);
        assert!((out.gamma - 0.0035).abs() < 0.001);
        assert!((out.vega - 35.207).abs() < 0.001);
    }

    #[test]
    fn test_atm_put_parity() {
        let call = european(OptionKind::Call, 100.0, 100.0, UNIT_VOL, 1.0);
        let put = european(OptionKind::Put, 100.0, 100.0, UNIT_VOL, 1.0);
        // With zero rates, ATM call and put prices coincide.
        assert!((put.price - 38.292).abs() < 0.001);
        assert!((put.delta + 0.309).abs() < 0.001);
        // call_delta - put_delta = 1
        assert!((call.delta - put.delta - 1.0).abs() < 1e-12);
        // Gamma and vega are shared between call and put.
        assert!((call.gamma - put.gamma).abs() < 1e-12);
        assert!((call.vega - put.vega).abs() < 1e-12);
    }

    #[test]
    fn test_deep_itm_call_negligible_vol() {
        let out = european(OptionKind::Call, 100.0, 90.0, 1e-4, 1.0);
        assert!((out.price - 10.0).abs() < 0.01);
        assert!((out.delta - 1.0).abs() < 0.001);
        assert!(out.gamma.abs() < 0.001);
        assert!(out.vega.abs() < 0.001);
    }

    #[test]
    fn test_zero_vol_prices_deterministic_limit() {
        // No NaN from the 0/0 d1: the premium is intrinsic and the delta
        // a step function of moneyness.
        let atm = european(OptionKind::Call, 100.0, 100.0, 0.0, 1.0);
        assert_eq!(atm.price, 0.0);
        assert_eq!(atm.delta, 0.5);
        assert!(atm.price.is_finite() && atm.delta.is_finite());

        let itm = european(OptionKind::Call, 110.0, 100.0, 0.0, 1.0);
        assert_eq!(itm.price, 10.0);
        assert_eq!(itm.delta, 1.0);

        let otm = european(OptionKind::Call, 90.0, 100.0, 0.0, 1.0);
        assert_eq!(otm.price, 0.0);
        assert_eq!(otm.delta, 0.0);

        let put = european(OptionKind::Put, 90.0, 100.0, 0.0, 1.0);
        assert_eq!(put.price, 10.0);
        assert_eq!(put.delta, -1.0);
        assert_eq!(put.gamma, 0.0);
        assert_eq!(put.vega, 0.0);
    }

    #[test]
    fn test_at_expiry_intrinsic() {
        let call = european(OptionKind::Call, 107.0, 100.0, UNIT_VOL, 0.0);
        assert_eq!(call.price, 7.0);
        assert_eq!(call.delta, 0.0);
        assert_eq!(call.gamma, 0.0);
        assert_eq!(call.vega, 0.0);

        let put = european(OptionKind::Put, 93.0, 100.0, UNIT_VOL, 0.0);
        assert_eq!(put.price, 7.0);

        let otm = european(OptionKind::Call, 93.0, 100.0, UNIT_VOL, 0.0);
        assert_eq!(otm.price, 0.0);
    }
}
