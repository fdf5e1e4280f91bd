//! Append-only, time-keyed price records.

use std::collections::BTreeMap;

use types::{AssetName, Time};

use crate::error::{MarketError, Result};

/// A time-indexed series of marked prices.
///
/// Keys iterate in chronological order; a given time may be written at
/// most once and entries are never pruned or rewritten.
#[derive(Debug, Clone, Default)]
pub struct PriceRecord {
    entries: BTreeMap<Time, f64>,
}

impl PriceRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `value` at `time`, failing if `time` is already recorded.
    ///
    /// `asset` is only used to label the error.
    pub fn mark(&mut self, asset: &str, time: Time, value: f64) -> Result<()> {
        if self.entries.contains_key(&time) {
            return Err(MarketError::DuplicateRecord {
                asset: AssetName::from(asset),
                time,
            });
        }
        self.entries.insert(time, value);
        Ok(())
    }

    /// The recorded value at `time`, if any.
    pub fn value_at(&self, time: Time) -> Option<f64> {
        self.entries.get(&time).copied()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (Time, f64)> + '_ {
        self.entries.iter().map(|(&t, &v)| (t, v))
    }
}
