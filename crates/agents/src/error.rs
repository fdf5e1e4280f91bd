//! Error types for agent construction and bookkeeping.

use sim_core::MarketError;
use types::Time;

/// Result type for agent operations.
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors raised by the agent engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgentError {
    /// Initial holdings missing the mandatory `Cash` entry.
    #[error("agent holdings must include a Cash entry")]
    MissingCash,

    /// A market lookup failed underneath an agent operation.
    #[error(transparent)]
    Market(#[from] MarketError),

    /// One-day PnL needs the previous step's valuation, which was never marked.
    #[error("no holding value marked at time {time}")]
    MissingValuation { time: Time },

    /// Re-marking the holding value at an already marked time.
    #[error("holding value already marked at time {time}")]
    DuplicateValuation { time: Time },

    /// Generating a second performance report for the same time.
    #[error("performance report already generated at time {time}")]
    DuplicateReport { time: Time },
}
