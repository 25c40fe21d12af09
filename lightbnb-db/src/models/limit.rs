//! Row cap for list queries

use serde::{Deserialize, Serialize};

/// Rows returned by a list query when the caller does not say otherwise
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum number of rows a list query returns.
///
/// Zero is allowed and yields an empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowLimit(u32);

impl RowLimit {
    pub const fn new(limit: u32) -> Self {
        Self(limit)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Value bound to the SQL `LIMIT` placeholder.
    pub fn as_i64(self) -> i64 {
        i64::from(self.0)
    }

    /// Limit for slicing in-process results.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl Default for RowLimit {
    fn default() -> Self {
        Self(DEFAULT_LIMIT)
    }
}

impl From<u32> for RowLimit {
    fn from(limit: u32) -> Self {
        Self(limit)
    }
}

impl From<Option<u32>> for RowLimit {
    fn from(limit: Option<u32>) -> Self {
        limit.map(Self).unwrap_or_default()
    }
}
