//! Case-insensitive substring search over a table.
//!
//! A row matches when any of its cells contains the term. NULL cells never
//! match, whatever placeholder the grid shows for them.

use crate::data::store::TableStore;
use crate::types::DataCell;

/// Search term plus the per-row match flags computed for it
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    /// Lowercased, trimmed term; empty means no active search
    needle: String,
    row_matches: Vec<bool>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.needle
    }

    pub fn is_active(&self) -> bool {
        !self.needle.is_empty()
    }

    /// Set a new term and rescan every row
    pub fn set_term(&mut self, term: &str, store: &TableStore) {
        self.needle = term.trim().to_lowercase();
        self.rescan(store);
    }

    pub fn clear(&mut self) {
        self.needle.clear();
        self.row_matches.clear();
    }

    /// Recompute every row's match flag
    pub fn rescan(&mut self, store: &TableStore) {
        if !self.is_active() {
            self.row_matches.clear();
            return;
        }
        self.row_matches = store.rows().map(|row| self.row_hits(row)).collect();
    }

    /// Recompute one row's match flag after an edit
    pub fn rescan_row(&mut self, store: &TableStore, row: usize) {
        if !self.is_active() {
            return;
        }
        if row >= self.row_matches.len() {
            return;
        }
        if let Ok(cells) = store.row(row) {
            self.row_matches[row] = self.row_hits(cells);
        }
    }

    pub fn row_matches(&self, row: usize) -> bool {
        !self.is_active() || self.row_matches.get(row).copied().unwrap_or(false)
    }

    pub fn cell_matches(&self, cell: &DataCell) -> bool {
        self.is_active() && !cell.is_null() && contains_ignore_case(&cell.to_string(), &self.needle)
    }

    /// Number of rows matching the active term
    pub fn match_count(&self) -> usize {
        self.row_matches.iter().filter(|&&m| m).count()
    }

    fn row_hits(&self, cells: &[DataCell]) -> bool {
        cells.iter().any(|cell| self.cell_matches(cell))
    }
}

fn contains_ignore_case(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}
