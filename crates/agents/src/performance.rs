//! Performance analytics over an agent's trading and valuation history.
//!
//! Every metric is a pure read of the portfolio and market state. The
//! valuation series drives return, PnL, Sharpe and drawdown; the trade
//! history drives the hit rate. Metrics that need more data than exists
//! yet report `None` rather than a degenerate number.

use quant::stats::pct_changes;
use sim_core::{Market, MarketError};
use types::{PerformanceRecord, Time};

use crate::error::{AgentError, Result};
use crate::portfolio::Portfolio;

/// Fractional return over the initial asset value.
///
/// `(current - initial) / initial`, with the initial value computed by
/// pricing the initial holdings at each instrument's initial value.
pub fn asset_return(portfolio: &Portfolio, market: &Market) -> Result<f64> {
    let initial = portfolio.initial_value(market)?;
    let current = portfolio.value(market)?;
    Ok((current - initial) / initial)
}

/// Total profit and loss since construction, in currency units.
pub fn cumulative_pnl(portfolio: &Portfolio, market: &Market) -> Result<f64> {
    Ok(portfolio.value(market)? - portfolio.initial_value(market)?)
}

/// Profit and loss over the last step.
///
/// At time 0 the baseline is the initial asset value. Afterwards it is
/// the marked value at `time - 1`; a gap there is a bookkeeping bug and
/// is fatal.
pub fn one_day_pnl(portfolio: &Portfolio, market: &Market, time: Time) -> Result<f64> {
    let baseline = if time == 0 {
        portfolio.initial_value(market)?
    } else {
        let prev = time - 1;
        portfolio
            .value_at(prev)
            .ok_or(AgentError::MissingValuation { time: prev })?
    };
    Ok(portfolio.value(market)? - baseline)
}

/// Fraction of resolvable trades whose direction matched the next move.
///
/// A trade at step `t` resolves against the recorded price at `t + 1`.
/// A buy (or a zero-unit trade) wins when the price rose, a sell wins
/// when it fell. Trades whose next-step price is not yet recorded are
/// excluded entirely; `None` when nothing has resolved.
pub fn hit_rate(portfolio: &Portfolio, market: &Market, time: Time) -> Result<Option<f64>> {
    let mut wins = 0usize;
    let mut resolved = 0usize;

    for trade in portfolio.trade_history() {
        if trade.time + 1 > time {
            continue;
        }
        let now = market.check_record_value(&trade.asset, trade.time)?;
        let next = match market.check_record_value(&trade.asset, trade.time + 1) {
            Ok(v) => v,
            Err(MarketError::NoRecord { .. }) => continue,
            Err(e) => return Err(e.into()),
        };

        resolved += 1;
        let win = (next > now && trade.units >= 0.0)
            || (next < now && trade.units < 0.0)
            || trade.units == 0.0;
        if win {
            wins += 1;
        }
    }

    if resolved == 0 {
        Ok(None)
    } else {
        Ok(Some(wins as f64 / resolved as f64))
    }
}

/// Sharpe ratio of the marked valuation series.
///
/// Mean over sample standard deviation of the period-over-period
/// percentage changes. `None` with fewer than two changes or zero
/// variance.
pub fn sharpe_ratio(portfolio: &Portfolio) -> Option<f64> {
    let values: Vec<f64> = portfolio.value_history().values().copied().collect();
    quant::sharpe_ratio(&pct_changes(&values))
}

/// Largest peak-to-trough decline of the marked valuation series.
pub fn max_drawdown(portfolio: &Portfolio) -> f64 {
    let values: Vec<f64> = portfolio.value_history().values().copied().collect();
    quant::max_drawdown(&values)
}

/// Package every metric into a single immutable record keyed by `time`.
///
/// Pure reads only: generating a report never trades, never marks a
/// valuation.
pub fn generate_report(
    portfolio: &Portfolio,
    market: &Market,
    time: Time,
) -> Result<PerformanceRecord> {
    Ok(PerformanceRecord {
        time,
        asset_return: asset_return(portfolio, market)?,
        hit_rate: hit_rate(portfolio, market, time)?,
        holding_value: portfolio.value(market)?,
        cumulative_pnl: cumulative_pnl(portfolio, market)?,
        one_day_pnl: one_day_pnl(portfolio, market, time)?,
        sharpe_ratio: sharpe_ratio(portfolio),
        max_drawdown: max_drawdown(portfolio),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;
    use types::{AssetName, ProductSpec, TradeIntent, CASH};

    fn drifting_market(mu: f64) -> Market {
        Market::from_specs(&[ProductSpec::GeometricBrownian {
            name: "ACME".into(),
            initial_value: 100.0,
            mu,
            sigma: 0.0,
        }])
        .unwrap()
    }

    fn cash_portfolio(cash: f64) -> Portfolio {
        let holdings: BTreeMap<AssetName, f64> = BTreeMap::from([(CASH.to_string(), cash)]);
        Portfolio::new(holdings).unwrap()
    }

    #[test]
    fn test_return_and_pnl_on_flat_cash() {
        let market = drifting_market(0.0);
        let portfolio = cash_portfolio(1000.0);

        assert_eq!(asset_return(&portfolio, &market).unwrap(), 0.0);
        assert_eq!(cumulative_pnl(&portfolio, &market).unwrap(), 0.0);
        assert_eq!(one_day_pnl(&portfolio, &market, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_one_day_pnl_needs_previous_mark() {
        let market = drifting_market(0.0);
        let portfolio = cash_portfolio(1000.0);
        assert_eq!(
            one_day_pnl(&portfolio, &market, 3).unwrap_err(),
            AgentError::MissingValuation { time: 2 }
        );
    }

    #[test]
    fn test_hit_rate_half() {
        // Deterministic uptrend: buys win, sells lose.
        let mut market = drifting_market(0.01);
        let mut rng = StdRng::seed_from_u64(7);
        let mut portfolio = cash_portfolio(10_000.0);

        market.mark_current_value_to_record(0).unwrap();
        portfolio
            .execute(
                "t",
                &[TradeIntent::new("ACME", 1.0), TradeIntent::new("ACME", -1.0)],
                &market,
                0,
            )
            .unwrap();

        // Unresolved until the next step's price is recorded.
        assert_eq!(hit_rate(&portfolio, &market, 0).unwrap(), None);

        market.evolve(1, &mut rng).unwrap();
        market.mark_current_value_to_record(1).unwrap();

        assert_eq!(hit_rate(&portfolio, &market, 1).unwrap(), Some(0.5));
    }

    #[test]
    fn test_sharpe_and_drawdown_need_history() {
        let market = drifting_market(0.0);
        let mut portfolio = cash_portfolio(1000.0);

        assert_eq!(sharpe_ratio(&portfolio), None);
        assert_eq!(max_drawdown(&portfolio), 0.0);

        portfolio.mark_value(&market, 0).unwrap();
        portfolio.mark_value(&market, 1).unwrap();

        // Flat series: zero variance, Sharpe stays undefined.
        assert_eq!(sharpe_ratio(&portfolio), None);
        assert_eq!(max_drawdown(&portfolio), 0.0);
    }

    #[test]
    fn test_report_packages_metrics() {
        let mut market = drifting_market(0.01);
        let mut rng = StdRng::seed_from_u64(7);
        let mut portfolio = cash_portfolio(1000.0);

        // Hold one share through a deterministic 1% drift step.
        market.mark_current_value_to_record(0).unwrap();
        portfolio
            .execute("t", &[TradeIntent::new("ACME", 1.0)], &market, 0)
            .unwrap();
        portfolio.mark_value(&market, 0).unwrap();

        market.evolve(1, &mut rng).unwrap();
        market.mark_current_value_to_record(1).unwrap();
        portfolio.mark_value(&market, 1).unwrap();

        let report = generate_report(&portfolio, &market, 1).unwrap();
        assert_eq!(report.time, 1);
        let gain = 100.0 * ((0.01f64).exp() - 1.0);
        assert!((report.cumulative_pnl - gain).abs() < 1e-9);
        assert!((report.one_day_pnl - gain).abs() < 1e-9);
        assert!((report.asset_return - gain / 1000.0).abs() < 1e-12);
        assert_eq!(report.hit_rate, Some(1.0));
        assert_eq!(report.max_drawdown, 0.0);
    }
}
