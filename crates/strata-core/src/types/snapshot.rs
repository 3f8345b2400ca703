use super::category::{Category, CATEGORY_COUNT};
use crate::error::{Result, StrataError};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Cumulative per-category counts as of one tick.
///
/// Always covers every category; a missing key cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountSnapshot {
    counts: [u64; CATEGORY_COUNT],
}

impl CountSnapshot {
    /// Snapshot with every category at `count`.
    pub fn uniform(count: u64) -> Self {
        Self {
            counts: [count; CATEGORY_COUNT],
        }
    }

    /// Seed snapshot: every category at 1, so the total is never zero.
    pub fn seed() -> Self {
        Self::uniform(1)
    }

    pub fn from_counts(counts: [u64; CATEGORY_COUNT]) -> Self {
        Self { counts }
    }

    pub fn get(&self, category: Category) -> u64 {
        self.counts[category.index()]
    }

    pub fn counts(&self) -> &[u64; CATEGORY_COUNT] {
        &self.counts
    }

    /// Sum over all categories.
    pub fn total(&self) -> u64 {
        self.counts
            .iter()
            .fold(0u64, |acc, count| acc.saturating_add(*count))
    }

    /// Copy of this snapshot with `category` incremented by one.
    pub fn incremented(&self, category: Category) -> Result<Self> {
        let mut next = *self;
        let slot = &mut next.counts[category.index()];
        *slot = slot
            .checked_add(1)
            .ok_or(StrataError::CounterOverflow(category))?;
        Ok(next)
    }

    /// The single category that grew by exactly one between `self` and
    /// `next`, if that is the only difference.
    pub fn single_increment_to(&self, next: &CountSnapshot) -> Option<Category> {
        let mut grown = None;
        for category in Category::ALL {
            let before = self.get(category);
            let after = next.get(category);
            if after == before {
                continue;
            }
            if before.checked_add(1) != Some(after) || grown.is_some() {
                return None;
            }
            grown = Some(category);
        }
        grown
    }
}

impl Default for CountSnapshot {
    fn default() -> Self {
        Self::seed()
    }
}

impl Index<Category> for CountSnapshot {
    type Output = u64;

    fn index(&self, category: Category) -> &u64 {
        &self.counts[category.index()]
    }
}
