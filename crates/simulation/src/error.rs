//! Errors surfaced while building or running a simulation.

use agents::AgentError;
use sim_core::MarketError;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Errors raised by the simulation driver.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Market construction or stepping failed.
    #[error(transparent)]
    Market(#[from] MarketError),

    /// Agent construction or bookkeeping failed.
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
