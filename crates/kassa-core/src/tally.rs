//! # Tally
//!
//! Counts of physical items per denomination, and the totals derived from them.
//!
//! ## Counting Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Tally Operations                                     │
//! │                                                                         │
//! │  User Action              Operation               Tally Change          │
//! │  ───────────              ─────────               ────────────          │
//! │                                                                         │
//! │  Type "3" for 10-krona ──► set_count(10, 3) ────► counts[10] = 3        │
//! │                                                                         │
//! │  Type "-2" for 5-krona ──► set_count(5, -2) ────► counts[5] = 0         │
//! │                                                                         │
//! │  Totals footer ──────────► compute_totals() ───► (read only)           │
//! │                                                                         │
//! │  NOTE: Totals iterate the REGISTRY, not the map. Keys that are not     │
//! │        registry values are kept (import/export carry them) but never   │
//! │        summed and never shown.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::denomination::{Category, Denomination, Registry};
use crate::money::Kronor;

// =============================================================================
// Tally
// =============================================================================

/// Mapping from denomination value to a non-negative count.
///
/// Serialized as a JSON object keyed by the value as a string:
/// `{"10": 3, "500": 1}`.
///
/// ## Invariants
/// - Every stored count is >= 0 (enforced by the `u64` type and by clamping
///   in [`Tally::set_count`])
/// - Absent keys read as 0
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tally {
    counts: BTreeMap<u32, u64>,
}

impl Tally {
    /// Creates an empty tally.
    pub fn new() -> Self {
        Tally::default()
    }

    /// Sets the count for a value, flooring negative input to zero.
    ///
    /// The value is not checked against the registry.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::tally::Tally;
    ///
    /// let mut tally = Tally::new();
    /// tally.set_count(5, -4);
    /// assert_eq!(tally.get_count(5), 0);
    /// ```
    pub fn set_count(&mut self, value: u32, count: i64) {
        let clamped = u64::try_from(count).unwrap_or(0);
        self.counts.insert(value, clamped);
    }

    /// Returns the count for a value, 0 when absent.
    pub fn get_count(&self, value: u32) -> u64 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    /// Iterates over every stored `(value, count)` pair, registry or not.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u64)> + '_ {
        self.counts.iter().map(|(value, count)| (*value, *count))
    }

    /// Number of stored keys (including zero counts and unknown values).
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when no key has been stored.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Stored keys that the registry does not know about.
    pub fn unknown_values(&self, registry: &Registry) -> Vec<u32> {
        self.counts
            .keys()
            .copied()
            .filter(|value| !registry.contains(*value))
            .collect()
    }

    /// Computes per-category and grand totals.
    ///
    /// ## Algorithm
    /// For each registry denomination: `value × count` into its category
    /// bucket. `grand_total = coin_total + note_total`.
    pub fn compute_totals(&self, registry: &Registry) -> Totals {
        let mut totals = Totals::default();

        for denomination in registry.list(None) {
            let subtotal = self.subtotal(denomination);
            match denomination.category {
                Category::Coin => totals.coin_total += subtotal,
                Category::Note => totals.note_total += subtotal,
            }
        }

        totals.grand_total = totals.coin_total + totals.note_total;
        totals
    }

    /// One row per registry denomination in the category, zero counts included.
    pub fn lines(&self, registry: &Registry, category: Category) -> Vec<TallyLine> {
        registry
            .list(Some(category))
            .map(|denomination| TallyLine {
                denomination: *denomination,
                count: self.get_count(denomination.value),
                subtotal: self.subtotal(denomination),
            })
            .collect()
    }

    fn subtotal(&self, denomination: &Denomination) -> Kronor {
        Kronor::from(denomination.value).multiply_count(self.get_count(denomination.value))
    }
}

impl FromIterator<(u32, u64)> for Tally {
    fn from_iter<I: IntoIterator<Item = (u32, u64)>>(iter: I) -> Self {
        Tally {
            counts: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Tally Line
// =============================================================================

/// A single denomination row: count and `value × count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TallyLine {
    pub denomination: Denomination,
    pub count: u64,
    pub subtotal: Kronor,
}

// =============================================================================
// Totals
// =============================================================================

/// Derived totals. Never the source of truth; recomputed from the tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub coin_total: Kronor,
    pub note_total: Kronor,
    pub grand_total: Kronor,
}

impl Totals {
    /// Total for one category.
    pub fn for_category(&self, category: Category) -> Kronor {
        match category {
            Category::Coin => self.coin_total,
            Category::Note => self.note_total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
