//! Row selection state.
//!
//! Rows are keyed by their position in the raw row set, so a selection
//! survives re-filtering and re-sorting.

use std::collections::BTreeSet;

/// Set of selected row positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: BTreeSet<usize>,
}

impl SelectionState {
    /// Whether `row_id` is selected.
    pub fn is_selected(&self, row_id: usize) -> bool {
        self.selected.contains(&row_id)
    }

    /// Flip one row. Returns the new membership.
    pub fn toggle(&mut self, row_id: usize) -> bool {
        if self.selected.remove(&row_id) {
            false
        } else {
            self.selected.insert(row_id);
            true
        }
    }

    /// True when `candidates` is non-empty and every one is selected.
    pub fn all_selected(&self, candidates: &[usize]) -> bool {
        !candidates.is_empty() && candidates.iter().all(|id| self.selected.contains(id))
    }

    /// True when some but not all of `candidates` are selected.
    pub fn some_selected(&self, candidates: &[usize]) -> bool {
        candidates.iter().any(|id| self.selected.contains(id)) && !self.all_selected(candidates)
    }

    /// Header checkbox: deselect `candidates` if all are selected,
    /// otherwise select all of them.
    pub fn toggle_all(&mut self, candidates: &[usize]) {
        if self.all_selected(candidates) {
            for id in candidates {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(candidates.iter().copied());
        }
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected row ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Resolve the selected ids against `rows`, skipping stale ids.
    pub fn selected_rows<'a, T>(&self, rows: &'a [T]) -> Vec<&'a T> {
        self.selected.iter().filter_map(|&i| rows.get(i)).collect()
    }
}
