//! Checked-item bookkeeping for multi-selection.

use std::collections::BTreeSet;

/// Set of selected indices into a list of `len` items.
///
/// Every member is a valid index. Reads always come back in ascending
/// index order, independent of the order the toggles happened in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    selected: BTreeSet<usize>,
    len: usize,
}

impl SelectionSet {
    /// Every index of the list selected.
    #[must_use]
    pub fn all(len: usize) -> Self {
        Self {
            selected: (0..len).collect(),
            len,
        }
    }

    /// Nothing selected.
    #[must_use]
    pub fn none(len: usize) -> Self {
        Self {
            selected: BTreeSet::new(),
            len,
        }
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Number of selected indices.
    #[must_use]
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.selected.len() == self.len
    }

    /// Flips membership of `index`. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    /// Clears the set when everything is selected, otherwise selects everything.
    pub fn toggle_all(&mut self) {
        if self.is_full() {
            self.selected.clear();
        } else {
            self.selected = (0..self.len).collect();
        }
    }

    /// Selected indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }
}
