//! Editing session: the current file, its table, and the action table the UI
//! binds gestures to.
//!
//! Every user action enters through [`Session::dispatch`] (or the matching
//! named method). Failures never escape: they are logged, turned into an
//! error toast, and the table is left as it was before the action.

use crate::constants::APP_TITLE;
use crate::data::{
    ChangeOutcome, DataError, DataResult, DisplayAdapter, StructuralChange, TableStore,
    is_csv_file, parse_csv_file, write_csv_file,
};
use crate::notifications::{Toast, ToastManager};
use crate::settings::{self, ThemeMode};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Operations a UI can trigger
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Open(PathBuf),
    Save,
    SaveAs(PathBuf),
    /// Search box text changed
    Search(String),
    /// Add a row after the last selected row, or at the end with no selection
    AddRow { selected: Vec<usize> },
    DeleteRows(Vec<usize>),
    DeleteColumn(usize),
    AddColumn(String),
    EditCell { row: usize, col: usize, text: String },
    ToggleTheme,
    SetTheme(ThemeMode),
}

/// One entry of a context menu model
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuItem {
    Entry { label: String, action: Action },
    Separator,
}

impl MenuItem {
    fn entry(label: impl Into<String>, action: Action) -> Self {
        MenuItem::Entry {
            label: label.into(),
            action,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            MenuItem::Entry { label, .. } => Some(label.as_str()),
            MenuItem::Separator => None,
        }
    }

    pub fn action(&self) -> Option<&Action> {
        match self {
            MenuItem::Entry { action, .. } => Some(action),
            MenuItem::Separator => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    adapter: DisplayAdapter,
    current_file: Option<PathBuf>,
    dirty: bool,
    toasts: ToastManager,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an in-memory table with no backing file
    pub fn with_store(store: TableStore) -> Self {
        Self {
            adapter: DisplayAdapter::new(store),
            ..Self::default()
        }
    }

    pub fn adapter(&self) -> &DisplayAdapter {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut DisplayAdapter {
        &mut self.adapter
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Whether there are changes not yet written to disk
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastManager {
        &mut self.toasts
    }

    /// Window title, e.g. `people.csv* — Modern CSV Viewer`
    pub fn title(&self) -> String {
        let Some(path) = &self.current_file else {
            return APP_TITLE.to_string();
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let marker = if self.dirty { "*" } else { "" };
        format!("{}{} — {}", name, marker, APP_TITLE)
    }

    /// Run an action. Returns whether it succeeded.
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Open(path) => self.open(&path),
            Action::Save => self.save(),
            Action::SaveAs(path) => self.save_as(&path),
            Action::Search(text) => {
                self.search(&text);
                true
            }
            Action::AddRow { selected } => self.add_row(&selected),
            Action::DeleteRows(rows) => self.delete_rows(&rows),
            Action::DeleteColumn(col) => self.delete_column(col),
            Action::AddColumn(name) => self.add_column(&name),
            Action::EditCell { row, col, text } => self.edit_cell(row, col, &text),
            Action::ToggleTheme => {
                self.toggle_theme();
                true
            }
            Action::SetTheme(theme) => {
                settings::set_theme(theme);
                true
            }
        }
    }

    /// Load a CSV file, replacing the current table. The active search is
    /// re-applied to the new data.
    pub fn open(&mut self, path: &Path) -> bool {
        if !is_csv_file(path) {
            warn!(path = %path.display(), "Opening a file without a .csv extension");
        }
        match parse_csv_file(path) {
            Ok(store) => {
                self.adapter.replace_store(store);
                self.current_file = Some(path.to_path_buf());
                self.dirty = false;
                self.notify_success(format!("File loaded: {}", path.display()));
                true
            }
            Err(e) => self.report("Error opening file", e),
        }
    }

    /// Write to the current file.
    ///
    /// Returns false without side effects when there is no current file; the
    /// caller should offer "Save As" instead.
    pub fn save(&mut self) -> bool {
        let Some(path) = self.current_file.clone() else {
            return false;
        };
        match self.write_to(&path) {
            Ok(()) => {
                self.notify_success("File saved successfully");
                true
            }
            Err(e) => self.report("Error saving file", e),
        }
    }

    /// Write to a new path and make it the current file
    pub fn save_as(&mut self, path: &Path) -> bool {
        match self.write_to(path) {
            Ok(()) => {
                self.current_file = Some(path.to_path_buf());
                self.notify_success("File saved successfully");
                true
            }
            Err(e) => self.report("Error saving file", e),
        }
    }

    /// Filter rows by the search box text
    pub fn search(&mut self, text: &str) {
        self.adapter.set_search(text);
    }

    /// Insert an empty row after the highest selected row, or append
    pub fn add_row(&mut self, selected: &[usize]) -> bool {
        let after = selected.iter().max().copied();
        match self.change(StructuralChange::InsertRow { after }) {
            Ok(_) => {
                self.notify_success("New row added successfully");
                true
            }
            Err(e) => self.report("Error adding row", e),
        }
    }

    pub fn delete_rows(&mut self, rows: &[usize]) -> bool {
        match self.change(StructuralChange::DeleteRows(rows.to_vec())) {
            Ok(ChangeOutcome::RowsDeleted(count)) => {
                self.notify_success(format!("Deleted {} row(s)", count));
                true
            }
            Ok(_) => true,
            Err(e) => self.report("Error deleting row(s)", e),
        }
    }

    pub fn delete_column(&mut self, col: usize) -> bool {
        match self.change(StructuralChange::DeleteColumn(col)) {
            Ok(_) => {
                self.notify_success("Column deleted successfully");
                true
            }
            Err(e) => self.report("Error deleting column", e),
        }
    }

    pub fn add_column(&mut self, name: &str) -> bool {
        match self.change(StructuralChange::AddColumn(name.to_string())) {
            Ok(_) => {
                self.notify_success(format!("Column '{}' added", name.trim()));
                true
            }
            Err(e) => self.report("Error adding column", e),
        }
    }

    pub fn edit_cell(&mut self, row: usize, col: usize, text: &str) -> bool {
        match self.adapter.apply_edit(row, col, text) {
            Ok(()) => {
                self.dirty = true;
                true
            }
            Err(e) => self.report("Error editing cell", e),
        }
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        settings::toggle_theme()
    }

    /// Context menu for the table body.
    ///
    /// Always offers "Add New Row"; with a selection, also offers deleting it.
    pub fn row_context_menu(&self, selected: &[usize]) -> Vec<MenuItem> {
        let mut menu = vec![MenuItem::entry(
            "Add New Row",
            Action::AddRow {
                selected: selected.to_vec(),
            },
        )];

        let mut rows = selected.to_vec();
        rows.sort_unstable();
        rows.dedup();
        if !rows.is_empty() {
            menu.push(MenuItem::Separator);
            menu.push(MenuItem::entry(
                format!("Delete {} Selected Row(s)", rows.len()),
                Action::DeleteRows(rows),
            ));
        }
        menu
    }

    /// Context menu for a column header; empty when `col` is not a column
    pub fn header_context_menu(&self, col: usize) -> Vec<MenuItem> {
        match self.adapter.header_label(col) {
            Ok(name) => vec![MenuItem::entry(
                format!("Delete Column '{}'", name),
                Action::DeleteColumn(col),
            )],
            Err(_) => Vec::new(),
        }
    }

    fn change(&mut self, change: StructuralChange) -> DataResult<ChangeOutcome> {
        let outcome = self.adapter.apply_structural_change(change)?;
        self.dirty = true;
        Ok(outcome)
    }

    fn write_to(&mut self, path: &Path) -> DataResult<()> {
        write_csv_file(self.adapter.store(), path)?;
        self.adapter.mark_saved();
        self.dirty = false;
        Ok(())
    }

    fn notify_success(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);
        self.toasts.push(Toast::success(message));
    }

    fn report(&mut self, context: &str, err: DataError) -> bool {
        error!(kind = ?err.kind(), "{}: {}", context, err);
        self.toasts.push(Toast::error(format!("{}: {}", context, err)));
        false
    }
}
