//! Core types for the table model.
//!
//! Cell values, column metadata and the styling hints handed to display
//! surfaces.

use crate::constants::NULL_LABEL;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Cell Values
// ============================================================================

/// A single cell value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DataCell {
    Text(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
    Null,
}

impl DataCell {
    /// Parse a string into a DataCell, trying to preserve type.
    ///
    /// Empty input is NULL. Values that don't fit the hint fall back to text.
    pub fn parse(value: &str, hint: DataType) -> Self {
        if value.is_empty() {
            return DataCell::Null;
        }

        match hint {
            DataType::Integer => value
                .parse::<i64>()
                .map(DataCell::Integer)
                .unwrap_or_else(|_| DataCell::Text(value.to_string())),
            DataType::Number => parse_finite(value)
                .map(DataCell::Number)
                .unwrap_or_else(|| DataCell::Text(value.to_string())),
            DataType::Boolean => match value.to_ascii_lowercase().as_str() {
                "true" => DataCell::Boolean(true),
                "false" => DataCell::Boolean(false),
                _ => DataCell::Text(value.to_string()),
            },
            DataType::Text => DataCell::Text(value.to_string()),
        }
    }

    /// Normalize user-entered text.
    ///
    /// `"NULL"` in any case, empty and whitespace-only input all become NULL.
    /// Everything else is kept verbatim as text.
    pub fn from_input(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NULL_LABEL) {
            DataCell::Null
        } else {
            DataCell::Text(text.to_string())
        }
    }

    pub fn is_null(&self) -> bool {
        match self {
            DataCell::Null => true,
            DataCell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Text written to a delimited file. NULL is an empty field.
    pub fn to_field(&self) -> String {
        match self {
            DataCell::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Text shown in a grid cell.
    pub fn display_text(&self) -> String {
        if self.is_null() {
            NULL_LABEL.to_string()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for DataCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataCell::Text(s) => f.write_str(s),
            DataCell::Integer(n) => write!(f, "{}", n),
            // Whole floats keep a trailing ".0" so the column re-parses as floats
            DataCell::Number(n) if n.fract() == 0.0 && n.abs() < 1e16 => write!(f, "{:.1}", n),
            DataCell::Number(n) => write!(f, "{}", n),
            DataCell::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            DataCell::Null => Ok(()),
        }
    }
}

/// Parse a float, rejecting `inf`/`nan` spellings that `f64::from_str` accepts.
fn parse_finite(value: &str) -> Option<f64> {
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

// ============================================================================
// Columns
// ============================================================================

/// Supported data types for columns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    #[default]
    Text,
    Integer,
    Number,
    Boolean,
}

/// Column metadata
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataColumn {
    /// Column name/header
    pub name: String,
    /// Type inferred when the column was loaded
    pub data_type: DataType,
}

impl DataColumn {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            data_type,
        }
    }

    pub fn text(name: &str) -> Self {
        Self::new(name, DataType::Text)
    }
}

// ============================================================================
// Display Hints
// ============================================================================

/// Styling hints for one cell, derived from store and search state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStyle {
    pub is_null: bool,
    pub is_modified: bool,
    pub is_search_match: bool,
}
