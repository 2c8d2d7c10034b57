//! Display adapter between a [`TableStore`] and a grid widget.
//!
//! The adapter is the only owner of the store. Grid surfaces ask it for cell
//! text, style hints and row visibility, and route edits back through it. Each
//! mutation queues an [`Invalidation`] so the surface can repaint one cell or
//! rebuild its row/column layout.
//!
//! Two display strategies are served by the same API:
//! - surfaces that can hide rows query [`DisplayAdapter::row_visible`]
//! - surfaces that can't render [`DisplayAdapter::visible_rows`] and map
//!   their row numbers back with [`DisplayAdapter::display_to_store_row`]

use crate::data::error::{DataError, DataResult};
use crate::data::search::SearchState;
use crate::data::store::TableStore;
use crate::types::{CellStyle, DataColumn};
use tracing::debug;

/// What the display surface has to refresh
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Invalidation {
    /// A single cell's text or style changed
    Cell { row: usize, col: usize },
    /// Row/column count, visibility or many styles changed; index-keyed caches are stale
    Shape,
}

/// Structural edits the adapter can apply to the store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StructuralChange {
    /// Insert an empty row after the given row, or append when `None`
    InsertRow { after: Option<usize> },
    DeleteRows(Vec<usize>),
    DeleteColumn(usize),
    AddColumn(String),
}

/// Result of a [`StructuralChange`]
#[derive(Clone, Debug, PartialEq)]
pub enum ChangeOutcome {
    RowInserted(usize),
    RowsDeleted(usize),
    ColumnDeleted(DataColumn),
    ColumnAdded(usize),
}

#[derive(Debug, Default)]
pub struct DisplayAdapter {
    store: TableStore,
    search: SearchState,
    invalidations: Vec<Invalidation>,
}

impl DisplayAdapter {
    pub fn new(store: TableStore) -> Self {
        Self {
            store,
            search: SearchState::new(),
            invalidations: Vec::new(),
        }
    }

    pub fn store(&self) -> &TableStore {
        &self.store
    }

    /// Replace the whole table. The active search term is kept and rescanned.
    pub fn replace_store(&mut self, store: TableStore) {
        self.store = store;
        self.search.rescan(&self.store);
        self.invalidations.push(Invalidation::Shape);
    }

    pub fn row_count(&self) -> usize {
        self.store.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.store.column_count()
    }

    pub fn header_label(&self, col: usize) -> DataResult<&str> {
        self.store.column(col).map(|c| c.name.as_str())
    }

    /// `"NULL"` for NULL cells, otherwise the value's text
    pub fn cell_text(&self, row: usize, col: usize) -> DataResult<String> {
        self.store.get_cell(row, col).map(|cell| cell.display_text())
    }

    pub fn cell_style(&self, row: usize, col: usize) -> DataResult<CellStyle> {
        let cell = self.store.get_cell(row, col)?;
        Ok(CellStyle {
            is_null: cell.is_null(),
            is_modified: self.store.is_modified(row, col),
            is_search_match: self.search.cell_matches(cell),
        })
    }

    /// False only when a search is active and no cell of the row matches
    pub fn row_visible(&self, row: usize) -> bool {
        row < self.store.row_count() && self.search.row_matches(row)
    }

    /// Store indices of the rows currently shown, in store order
    pub fn visible_rows(&self) -> Vec<usize> {
        (0..self.store.row_count())
            .filter(|&row| self.search.row_matches(row))
            .collect()
    }

    pub fn visible_row_count(&self) -> usize {
        if self.search.is_active() {
            self.search.match_count()
        } else {
            self.store.row_count()
        }
    }

    /// Map the n-th shown row to its store index
    pub fn display_to_store_row(&self, display_row: usize) -> Option<usize> {
        if !self.search.is_active() {
            return (display_row < self.store.row_count()).then_some(display_row);
        }
        (0..self.store.row_count())
            .filter(|&row| self.search.row_matches(row))
            .nth(display_row)
    }

    /// Write user text into one cell.
    ///
    /// Queues `Shape` instead of `Cell` when the edit shows or hides the row
    /// under the active search.
    pub fn apply_edit(&mut self, row: usize, col: usize, text: &str) -> DataResult<()> {
        self.store.set_cell(row, col, text)?;

        let was_visible = self.search.row_matches(row);
        self.search.rescan_row(&self.store, row);
        if self.search.row_matches(row) == was_visible {
            self.invalidations.push(Invalidation::Cell { row, col });
        } else {
            self.invalidations.push(Invalidation::Shape);
        }
        Ok(())
    }

    pub fn apply_structural_change(&mut self, change: StructuralChange) -> DataResult<ChangeOutcome> {
        debug!(?change, "Applying structural change");
        let outcome = match change {
            StructuralChange::InsertRow { after } => {
                ChangeOutcome::RowInserted(self.store.insert_row(after)?)
            }
            StructuralChange::DeleteRows(rows) => {
                if rows.is_empty() {
                    return Err(DataError::Edit("No rows selected".to_string()));
                }
                ChangeOutcome::RowsDeleted(self.store.delete_rows(&rows)?)
            }
            StructuralChange::DeleteColumn(col) => {
                ChangeOutcome::ColumnDeleted(self.store.delete_column(col)?)
            }
            StructuralChange::AddColumn(name) => {
                ChangeOutcome::ColumnAdded(self.store.add_column(&name)?)
            }
        };

        self.search.rescan(&self.store);
        self.invalidations.push(Invalidation::Shape);
        Ok(outcome)
    }

    /// Change the search term; an empty or blank term shows every row again
    pub fn set_search(&mut self, term: &str) {
        if term.trim().is_empty() {
            self.search.clear();
        } else {
            self.search.set_term(term, &self.store);
        }
        debug!(term = self.search.term(), matches = self.visible_row_count(), "Search updated");
        self.invalidations.push(Invalidation::Shape);
    }

    pub fn search_term(&self) -> &str {
        self.search.term()
    }

    pub fn is_searching(&self) -> bool {
        self.search.is_active()
    }

    /// Forget modified-cell highlights after a successful save
    pub fn mark_saved(&mut self) {
        if !self.store.modified_cells().is_empty() {
            self.store.mark_saved();
            self.invalidations.push(Invalidation::Shape);
        }
    }

    /// Drain pending invalidations, oldest first
    pub fn take_invalidations(&mut self) -> Vec<Invalidation> {
        std::mem::take(&mut self.invalidations)
    }
}
