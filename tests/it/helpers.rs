//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestTableBuilder` - Builder pattern for creating test tables
//! - Helper functions like `people_store()` and `write_csv()`
//! - Assertions over rendered row text

#![allow(dead_code)]

use sheetview::data::{DisplayAdapter, TableStore};
use sheetview::types::{DataCell, DataColumn};
use std::path::{Path, PathBuf};

// ============================================================================
// TestTableBuilder - Builder pattern for creating test tables
// ============================================================================

/// Builder for creating test tables from plain strings.
///
/// Empty strings become NULL cells, everything else is stored as text.
///
/// # Example
/// ```ignore
/// let store = TestTableBuilder::new()
///     .with_columns(&["id", "name"])
///     .with_row(&["1", "Alice"])
///     .build();
/// ```
#[derive(Default)]
pub struct TestTableBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TestTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(mut self, names: &[&str]) -> Self {
        self.columns = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_row(mut self, cells: &[&str]) -> Self {
        self.rows.push(cells.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Add `count` rows of the form `["r0c0", "r0c1", ...]`
    pub fn with_numbered_rows(mut self, count: usize) -> Self {
        for r in 0..count {
            let row = (0..self.columns.len())
                .map(|c| format!("r{}c{}", r, c))
                .collect();
            self.rows.push(row);
        }
        self
    }

    pub fn build(self) -> TableStore {
        let columns = self.columns.iter().map(|n| DataColumn::text(n)).collect();
        let rows = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|s| {
                        if s.is_empty() {
                            DataCell::Null
                        } else {
                            DataCell::Text(s.clone())
                        }
                    })
                    .collect()
            })
            .collect();
        TableStore::from_parts(columns, rows).expect("test table should be rectangular")
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// `id,name` with rows `1,Alice` and `2,<NULL>`
pub fn people_store() -> TableStore {
    TestTableBuilder::new()
        .with_columns(&["id", "name"])
        .with_row(&["1", "Alice"])
        .with_row(&["2", ""])
        .build()
}

pub const PEOPLE_CSV: &str = "id,name,city\n1,Alice,Oslo\n2,,Bergen\n3,Malik,\n4,Bob,Alicante\n";

/// Write `content` to `dir/name` and return the path
pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write fixture");
    path
}

// ============================================================================
// Assertions
// ============================================================================

/// Display text of every cell in a store row
pub fn row_texts(adapter: &DisplayAdapter, row: usize) -> Vec<String> {
    (0..adapter.column_count())
        .map(|col| adapter.cell_text(row, col).expect("cell in bounds"))
        .collect()
}

/// Display text of every cell, row by row
pub fn table_texts(adapter: &DisplayAdapter) -> Vec<Vec<String>> {
    (0..adapter.row_count()).map(|row| row_texts(adapter, row)).collect()
}

pub fn assert_row_count(adapter: &DisplayAdapter, expected: usize) {
    assert_eq!(
        adapter.row_count(),
        expected,
        "Expected {} rows, found {}",
        expected,
        adapter.row_count()
    );
}
