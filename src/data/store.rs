//! In-memory table storage.
//!
//! `TableStore` owns the column headers, the rows and the set of cells edited
//! since the last load/save boundary. Every structural operation validates its
//! arguments before touching any data, so a failed call leaves the store
//! exactly as it was.

use crate::data::csv_parser::write_csv_content;
use crate::data::error::{DataError, DataResult};
use crate::types::{DataCell, DataColumn};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Position of a cell as (row, column)
pub type CellPos = (usize, usize);

/// Ordered rows under named columns, plus modified-cell tracking
#[derive(Clone, Debug, Default)]
pub struct TableStore {
    columns: Vec<DataColumn>,
    rows: Vec<Vec<DataCell>>,
    modified: HashSet<CellPos>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from columns and rows, see [`TableStore::load`]
    pub fn from_parts(columns: Vec<DataColumn>, rows: Vec<Vec<DataCell>>) -> DataResult<Self> {
        let mut store = Self::new();
        store.load(columns, rows)?;
        Ok(store)
    }

    /// Replace the whole contents and forget modified cells.
    ///
    /// Fails if column names repeat or any row's width differs from the
    /// header's; the store is untouched on failure.
    pub fn load(&mut self, columns: Vec<DataColumn>, rows: Vec<Vec<DataCell>>) -> DataResult<()> {
        let mut seen = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(DataError::DuplicateColumn(column.name.clone()));
            }
        }

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(DataError::Parse(format!(
                "Row {} has {} fields, expected {}",
                index,
                row.len(),
                columns.len()
            )));
        }

        self.columns = columns;
        self.rows = rows;
        self.modified.clear();
        Ok(())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    pub fn columns(&self) -> &[DataColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, col: usize) -> DataResult<&DataColumn> {
        self.check_column(col)?;
        Ok(&self.columns[col])
    }

    pub fn row(&self, row: usize) -> DataResult<&[DataCell]> {
        self.check_row(row)?;
        Ok(&self.rows[row])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DataCell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    pub fn get_cell(&self, row: usize, col: usize) -> DataResult<&DataCell> {
        self.check_row(row)?;
        self.check_column(col)?;
        Ok(&self.rows[row][col])
    }

    /// Write user text into a cell and mark it modified.
    ///
    /// Text normalization follows [`DataCell::from_input`].
    pub fn set_cell(&mut self, row: usize, col: usize, text: &str) -> DataResult<()> {
        self.check_row(row)?;
        self.check_column(col)?;

        self.rows[row][col] = DataCell::from_input(text);
        self.modified.insert((row, col));
        debug!(row, col, "Cell updated");
        Ok(())
    }

    pub fn is_modified(&self, row: usize, col: usize) -> bool {
        self.modified.contains(&(row, col))
    }

    /// Modified cells in row-major order
    pub fn modified_cells(&self) -> Vec<CellPos> {
        let mut cells: Vec<CellPos> = self.modified.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Forget modified cells after the table was written to disk
    pub fn mark_saved(&mut self) {
        self.modified.clear();
    }

    /// Insert an all-NULL row right after `after`, or at the end for `None`.
    ///
    /// Returns the index of the new row. The new row is not marked modified.
    pub fn insert_row(&mut self, after: Option<usize>) -> DataResult<usize> {
        let at = match after {
            Some(after) => {
                self.check_row(after)?;
                after + 1
            }
            None => self.rows.len(),
        };

        self.rows
            .insert(at, vec![DataCell::Null; self.columns.len()]);
        self.modified = self
            .modified
            .drain()
            .map(|(r, c)| if r >= at { (r + 1, c) } else { (r, c) })
            .collect();

        debug!(row = at, "Row inserted");
        Ok(at)
    }

    pub fn delete_row(&mut self, index: usize) -> DataResult<()> {
        self.delete_rows(&[index]).map(|_| ())
    }

    /// Remove several rows at once.
    ///
    /// Duplicate indices are collapsed. Returns how many rows were removed.
    pub fn delete_rows(&mut self, indices: &[usize]) -> DataResult<usize> {
        let doomed: BTreeSet<usize> = indices.iter().copied().collect();
        if let Some(&index) = doomed.iter().find(|&&i| i >= self.rows.len()) {
            return Err(DataError::RowOutOfBounds {
                index,
                len: self.rows.len(),
            });
        }

        for &index in doomed.iter().rev() {
            self.rows.remove(index);
        }

        self.modified = self
            .modified
            .drain()
            .filter(|(r, _)| !doomed.contains(r))
            .map(|(r, c)| (r - doomed.range(..r).count(), c))
            .collect();

        debug!(count = doomed.len(), "Rows deleted");
        Ok(doomed.len())
    }

    /// Remove a column from the header and every row
    pub fn delete_column(&mut self, index: usize) -> DataResult<DataColumn> {
        self.check_column(index)?;

        let removed = self.columns.remove(index);
        for row in &mut self.rows {
            row.remove(index);
        }

        self.modified = self
            .modified
            .drain()
            .filter(|&(_, c)| c != index)
            .map(|(r, c)| if c > index { (r, c - 1) } else { (r, c) })
            .collect();

        debug!(column = %removed.name, "Column deleted");
        Ok(removed)
    }

    /// Append an all-NULL text column. Returns its index.
    pub fn add_column(&mut self, name: &str) -> DataResult<usize> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DataError::Edit("Column name cannot be empty".to_string()));
        }
        if self.columns.iter().any(|c| c.name == name) {
            return Err(DataError::DuplicateColumn(name.to_string()));
        }

        self.columns.push(DataColumn::text(name));
        for row in &mut self.rows {
            row.push(DataCell::Null);
        }

        debug!(column = name, "Column added");
        Ok(self.columns.len() - 1)
    }

    /// Rows as delimited-text fields, NULL cells as empty strings
    pub fn to_records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(DataCell::to_field).collect())
            .collect()
    }

    /// Whole table as CSV text, header first
    pub fn serialize(&self) -> DataResult<String> {
        write_csv_content(self)
    }

    fn check_row(&self, index: usize) -> DataResult<()> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(DataError::RowOutOfBounds {
                index,
                len: self.rows.len(),
            })
        }
    }

    fn check_column(&self, index: usize) -> DataResult<()> {
        if index < self.columns.len() {
            Ok(())
        } else {
            Err(DataError::ColumnOutOfBounds {
                index,
                len: self.columns.len(),
            })
        }
    }
}
