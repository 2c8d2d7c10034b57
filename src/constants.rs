//! Application-wide constants.
//!
//! Centralizes limits, labels and style values to make the codebase
//! more maintainable and self-documenting.

use std::time::Duration;

// ============================================================================
// Application
// ============================================================================

/// Window title suffix
pub const APP_TITLE: &str = "Modern CSV Viewer";

/// Label shown in place of a NULL cell
pub const NULL_LABEL: &str = "NULL";

// ============================================================================
// Data Loading
// ============================================================================

/// Maximum number of CSV rows to load
pub const MAX_CSV_ROWS: usize = 100_000;

/// Maximum CSV file size in MB
pub const MAX_CSV_SIZE_MB: usize = 100;

/// Field delimiter used for reading and writing
pub const CSV_DELIMITER: u8 = b',';

/// Prefix given to blank header names (followed by the column index)
pub const UNNAMED_COLUMN_PREFIX: &str = "Unnamed: ";

// ============================================================================
// Notifications
// ============================================================================

/// How long a success toast stays on screen
pub const SUCCESS_TOAST_DURATION: Duration = Duration::from_millis(2000);

/// How long an error toast stays on screen
pub const ERROR_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Fade-out window at the end of a toast's lifetime
pub const TOAST_FADE_DURATION: Duration = Duration::from_millis(300);

// ============================================================================
// Colors (0xRRGGBB)
// ============================================================================

/// Foreground for NULL cells
pub const NULL_CELL_COLOR: u32 = 0x808080;

/// Background for cells edited since the last load/save
pub const MODIFIED_CELL_BG: u32 = 0xffff00;

/// Background for cells matching the active search
pub const SEARCH_MATCH_BG: u32 = 0x9fd3ff;
