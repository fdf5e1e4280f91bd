//! Quantitative math for the market simulation.
//!
//! This crate provides the pure numerical building blocks the rest of the
//! workspace uses: statistical helpers, portfolio risk metrics, and the
//! closed-form Black-Scholes pricer with Greeks.
//!
//! # Modules
//!
//! - [`stats`] - Statistical utilities (mean, std-dev, percentage changes)
//! - [`risk`] - Risk metrics (Sharpe ratio, max drawdown)
//! - [`options`] - Black-Scholes pricing and Greeks (zero interest rate)
//!
//! All functions here are deterministic and side-effect free; metrics that
//! are undefined for a given input (too few observations, zero variance)
//! return `None` rather than a sentinel value.

pub mod options;
pub mod risk;
pub mod stats;

pub use options::{european, PriceGreeks, TRADING_DAYS_PER_YEAR};
pub use risk::{max_drawdown, sharpe_ratio};
