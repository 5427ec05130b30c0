//! Strongly-typed identifiers used across the domain.

use core::num::NonZeroU64;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

const INVALID_ITEM_ID: &str = "Item ID must be a positive number";

/// Identifier of a catalog item.
///
/// Always positive. Assigned by the item store from a counter that starts at 1
/// and is never reused within a process lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(NonZeroU64);

impl ItemId {
    /// The first id handed out by a fresh store.
    pub const FIRST: ItemId = ItemId(NonZeroU64::MIN);

    /// Build an id from a caller-supplied integer, rejecting zero and negatives.
    pub fn new(raw: i64) -> DomainResult<Self> {
        u64::try_from(raw)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(|| DomainError::invalid_argument(INVALID_ITEM_ID))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }

    /// The id that follows this one, or `None` once the id space is exhausted.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<NonZeroU64> for ItemId {
    fn from(value: NonZeroU64) -> Self {
        Self(value)
    }
}

impl From<ItemId> for u64 {
    fn from(value: ItemId) -> Self {
        value.get()
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| DomainError::invalid_argument(INVALID_ITEM_ID))?;
        Self::new(raw)
    }
}
