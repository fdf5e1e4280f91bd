//! Error types for market operations.
//!
//! Every variant is a programmer or configuration error: none are retried
//! and none are recovered internally. They propagate to the caller of the
//! operation that triggered them.

use types::{AssetName, Time};

/// Result type for market operations.
pub type Result<T> = std::result::Result<T, MarketError>;

/// Errors that can occur constructing or operating a market.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarketError {
    /// Two products in the construction list share a name.
    #[error("duplicate product name in market: {0}")]
    DuplicateName(AssetName),

    /// Lookup of an asset the registry does not contain.
    #[error("asset not found in market: {0}")]
    UnknownAsset(AssetName),

    /// Lookup of a price record at a time that was never marked.
    #[error("{asset} has no recorded price at time {time}")]
    NoRecord { asset: AssetName, time: Time },

    /// Re-marking a price record at an already recorded time.
    #[error("{asset} already has a recorded price at time {time}")]
    DuplicateRecord { asset: AssetName, time: Time },

    /// An option references an underlier absent from the market.
    #[error("option {option} references underlier {underlier} which is not in the market")]
    MissingUnderlier {
        option: AssetName,
        underlier: AssetName,
    },

    /// An option's underlier exposes no volatility parameter.
    #[error("underlier {0} exposes no volatility parameter")]
    MissingVolatility(AssetName),

    /// An option-only query against a non-option product.
    #[error("{0} is not an option")]
    NotAnOption(AssetName),

    /// An option was evolved past its expiry.
    #[error("option {name} evolved past expiry at time {time}")]
    ExpiredOption { name: AssetName, time: Time },
}
