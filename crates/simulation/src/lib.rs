//! Simulation driver tying the market and the agents together.
//!
//! - [`config`] - Declarative run configuration, JSON-serializable
//! - [`runner`] - The step loop executing the fixed per-step sequence
//! - [`error`] - Driver-level error type
//!
//! A run is fully determined by its [`SimulationConfig`]: the same
//! config (with seeded strategies) replays to identical price paths,
//! trades, and performance reports.

pub mod config;
pub mod error;
pub mod runner;

pub use config::{AgentConfig, SimulationConfig, StrategyConfig};
pub use error::{Result, SimulationError};
pub use runner::Simulation;
