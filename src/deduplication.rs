// 🔍 Deduplication - Keep the first item per identity key
// The upstream can return the same target account through several membership
// edges; only the first occurrence survives, in original order.

use std::collections::HashSet;
use std::hash::Hash;

// ============================================================================
// DEDUPLICATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Deduplicated<T> {
    /// Surviving items, in order of first occurrence
    pub items: Vec<T>,

    /// How many later duplicates were dropped
    pub dropped: usize,
}

/// Keep the first item for each key, preserving order
pub fn unique_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Deduplicated<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    let mut dropped = 0;

    for item in items {
        if seen.insert(key(&item)) {
            kept.push(item);
        } else {
            dropped += 1;
        }
    }

    Deduplicated {
        items: kept,
        dropped,
    }
}

// ============================================================================
// TESTS
// ============================================================================
