//! Frequency counting over trip columns.
//!
//! Values are tallied in first-seen order, which makes "most frequent"
//! deterministic: among tied values the one that appeared first wins.

use std::collections::HashMap;
use std::hash::Hash;

// ── Modal ─────────────────────────────────────────────────────────────────────

/// The most frequent value of a column and how often it occurs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal<T> {
    pub value: T,
    pub count: usize,
}

// ── FrequencyTable ────────────────────────────────────────────────────────────

/// Occurrence counts keyed by value, remembering first-seen order.
#[derive(Debug, Clone)]
pub struct FrequencyTable<T> {
    /// `(value, count)` in order of first appearance.
    entries: Vec<(T, usize)>,
    index: HashMap<T, usize>,
}

impl<T> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Eq + Hash + Clone> FrequencyTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `value`.
    pub fn add(&mut self, value: T) {
        if let Some(&slot) = self.index.get(&value) {
            self.entries[slot].1 += 1;
            return;
        }
        self.index.insert(value.clone(), self.entries.len());
        self.entries.push((value, 1));
    }

    /// Most frequent value; the earliest-seen value wins ties.
    /// `None` when nothing was counted.
    pub fn mode(&self) -> Option<Modal<T>> {
        let mut best: Option<&(T, usize)> = None;
        for entry in &self.entries {
            // strict comparison keeps the earlier entry on ties
            if best.map_or(true, |b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(value, count)| Modal {
            value: value.clone(),
            count: *count,
        })
    }

    /// All values by descending count; ties keep first-seen order.
    pub fn distribution(&self) -> Vec<(T, usize)> {
        let mut sorted = self.entries.clone();
        // sort_by is stable
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for FrequencyTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = FrequencyTable::new();
        for value in iter {
            table.add(value);
        }
        table
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
