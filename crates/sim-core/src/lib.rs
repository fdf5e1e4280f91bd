//! Market core for the simulation.
//!
//! This crate owns everything on the market side of the step loop:
//!
//! - [`instrument`] - Primary instruments and their stochastic processes
//! - [`option`] - European options repriced off an underlying instrument
//! - [`market`] - The named registry evolving and recording all products
//! - [`record`] - Append-only, time-keyed price records
//! - [`error`] - The market error taxonomy
//!
//! The step contract: `market.evolve(t, rng)` advances every product,
//! then `market.mark_current_value_to_record(t)` freezes the step's
//! prices into the canonical record agents use for historical lookups.

pub mod error;
pub mod instrument;
pub mod market;
pub mod option;
pub mod record;

pub use error::{MarketError, Result};
pub use instrument::{Instrument, PriceProcess};
pub use market::{Market, Product};
pub use option::EuropeanOption;
pub use record::PriceRecord;
