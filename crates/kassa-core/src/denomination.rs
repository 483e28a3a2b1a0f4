//! # Denomination Registry
//!
//! The fixed catalog of Swedish coins and banknotes that can be counted.
//!
//! ## Registry Contents
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Denomination Registry                            │
//! │                                                                         │
//! │   Mynt (coins)                    Sedlar (notes)                        │
//! │   ────────────                    ──────────────                        │
//! │   10  10-krona                    500  500-lapp                         │
//! │    5   5-krona                    200  200-lapp                         │
//! │    2   2-krona                    100  100-lapp                         │
//! │    1   1-krona                     50   50-lapp                         │
//! │                                    20   20-lapp                         │
//! │                                                                         │
//! │   Values are unique across both categories.                            │
//! │   Each category is listed in descending value order.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Category
// =============================================================================

/// Physical form of a denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Metal coin.
    Coin,
    /// Paper banknote.
    Note,
}

impl Category {
    /// Both categories in report order.
    pub const ALL: [Category; 2] = [Category::Coin, Category::Note];

    /// Section heading used in reports ("Mynt" / "Sedlar").
    pub const fn display_name(&self) -> &'static str {
        match self {
            Category::Coin => "Mynt",
            Category::Note => "Sedlar",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// Denomination
// =============================================================================

/// A coin or note value with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Denomination {
    /// Face value in kronor. Unique across the registry.
    pub value: u32,
    /// Coin or note.
    pub category: Category,
    /// Label shown in reports, e.g. "10-krona".
    pub label: &'static str,
}

impl Denomination {
    const fn coin(value: u32, label: &'static str) -> Self {
        Denomination {
            value,
            category: Category::Coin,
            label,
        }
    }

    const fn note(value: u32, label: &'static str) -> Self {
        Denomination {
            value,
            category: Category::Note,
            label,
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Coins first, then notes; each block already in descending value order.
static SWEDISH: [Denomination; 9] = [
    Denomination::coin(10, "10-krona"),
    Denomination::coin(5, "5-krona"),
    Denomination::coin(2, "2-krona"),
    Denomination::coin(1, "1-krona"),
    Denomination::note(500, "500-lapp"),
    Denomination::note(200, "200-lapp"),
    Denomination::note(100, "100-lapp"),
    Denomination::note(50, "50-lapp"),
    Denomination::note(20, "20-lapp"),
];

static SWEDISH_REGISTRY: Registry = Registry { entries: &SWEDISH };

/// An ordered, immutable set of denominations.
///
/// The registry never changes at runtime; callers borrow the `'static`
/// instance from [`Registry::swedish`].
#[derive(Debug)]
pub struct Registry {
    entries: &'static [Denomination],
}

impl Registry {
    /// The Swedish krona registry (4 coins, 5 notes).
    pub fn swedish() -> &'static Registry {
        &SWEDISH_REGISTRY
    }

    /// Lists denominations, optionally filtered to one category.
    ///
    /// Within a category the order is descending by value. Without a filter
    /// all coins come before all notes.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::denomination::{Category, Registry};
    ///
    /// let coins: Vec<u32> = Registry::swedish()
    ///     .list(Some(Category::Coin))
    ///     .map(|d| d.value)
    ///     .collect();
    /// assert_eq!(coins, vec![10, 5, 2, 1]);
    /// ```
    pub fn list(
        &self,
        category: Option<Category>,
    ) -> impl Iterator<Item = &'static Denomination> + '_ {
        self.entries
            .iter()
            .filter(move |d| category.map_or(true, |c| d.category == c))
    }

    /// Looks up a denomination by face value.
    pub fn find(&self, value: u32) -> Option<&'static Denomination> {
        self.entries.iter().find(|d| d.value == value)
    }

    /// Checks whether a value belongs to the registry.
    pub fn contains(&self, value: u32) -> bool {
        self.find(value).is_some()
    }

    /// Number of denominations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for the shipped registry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_four_coins_and_five_notes() {
        let registry = Registry::swedish();
        assert_eq!(registry.len(), 9);
        assert_eq!(registry.list(Some(Category::Coin)).count(), 4);
        assert_eq!(registry.list(Some(Category::Note)).count(), 5);
    }

    #[test]
    fn test_each_category_sorted_descending() {
        let registry = Registry::swedish();
        for category in Category::ALL {
            let values: Vec<u32> = registry.list(Some(category)).map(|d| d.value).collect();
            let mut sorted = values.clone();
            sorted.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(values, sorted, "{category} not descending");
        }
    }

    #[test]
    fn test_unfiltered_lists_coins_before_notes() {
        let values: Vec<u32> = Registry::swedish().list(None).map(|d| d.value).collect();
        assert_eq!(values, vec![10, 5, 2, 1, 500, 200, 100, 50, 20]);
    }

    #[test]
    fn test_values_are_unique() {
        let registry = Registry::swedish();
        let unique: HashSet<u32> = registry.list(None).map(|d| d.value).collect();
        assert_eq!(unique.len(), registry.len());
    }

    #[test]
    fn test_find() {
        let registry = Registry::swedish();
        let note = registry.find(500).unwrap();
        assert_eq!(note.label, "500-lapp");
        assert_eq!(note.category, Category::Note);

        assert!(registry.find(1000).is_none());
        assert!(!registry.contains(25));
    }

    #[test]
    fn test_category_display_names() {
        assert_eq!(Category::Coin.to_string(), "Mynt");
        assert_eq!(Category::Note.to_string(), "Sedlar");
    }
}
