//! Open / edit / save workflows through the Session action table.

use crate::helpers::{PEOPLE_CSV, people_store, row_texts, table_texts, write_csv};
use sheetview::data::parse_csv_file;
use sheetview::notifications::ToastVariant;
use sheetview::session::{Action, MenuItem, Session};
use tempfile::tempdir;

fn last_toast(session: &Session) -> (ToastVariant, String) {
    let toast = session.toasts().latest().expect("a toast");
    (toast.variant, toast.message.clone())
}

#[test]
fn test_open_edit_save_reopen() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "people.csv", PEOPLE_CSV);

    let mut session = Session::new();
    assert!(session.open(&path));
    assert_eq!(session.current_file(), Some(path.as_path()));
    assert_eq!(
        last_toast(&session),
        (ToastVariant::Success, format!("File loaded: {}", path.display()))
    );
    assert_eq!(session.title(), "people.csv — Modern CSV Viewer");

    assert!(session.edit_cell(1, 1, "Bea"));
    assert!(session.edit_cell(2, 2, "NULL"));
    assert!(session.is_dirty());
    assert_eq!(session.title(), "people.csv* — Modern CSV Viewer");

    assert!(session.save());
    assert!(!session.is_dirty());
    assert_eq!(
        last_toast(&session),
        (ToastVariant::Success, "File saved successfully".to_string())
    );
    // saving is a boundary for modified-cell highlighting
    assert!(!session.adapter().cell_style(1, 1).unwrap().is_modified);

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        written,
        "id,name,city\n1,Alice,Oslo\n2,Bea,Bergen\n3,Malik,\n4,Bob,Alicante\n"
    );

    let mut reopened = Session::new();
    assert!(reopened.open(&path));
    assert_eq!(row_texts(reopened.adapter(), 1), vec!["2", "Bea", "Bergen"]);
    assert_eq!(row_texts(reopened.adapter(), 2), vec!["3", "Malik", "NULL"]);
}

#[test]
fn test_open_failure_keeps_previous_table() {
    let dir = tempdir().unwrap();
    let good = write_csv(dir.path(), "good.csv", PEOPLE_CSV);
    let bad = write_csv(dir.path(), "bad.csv", "a,b\n1,2,3\n");

    let mut session = Session::new();
    assert!(session.open(&good));
    let before = table_texts(session.adapter());

    assert!(!session.open(&bad));
    let (variant, message) = last_toast(&session);
    assert_eq!(variant, ToastVariant::Error);
    assert!(message.starts_with("Error opening file: "), "{}", message);
    assert_eq!(table_texts(session.adapter()), before);
    assert_eq!(session.current_file(), Some(good.as_path()));

    assert!(!session.open(&dir.path().join("missing.csv")));
    assert_eq!(last_toast(&session).0, ToastVariant::Error);
}

#[test]
fn test_open_accepts_other_extensions() {
    let dir = tempdir().unwrap();
    let path = write_csv(dir.path(), "export.txt", "a,b\n1,2\n");

    let mut session = Session::new();
    assert!(session.open(&path));
    assert_eq!(session.adapter().row_count(), 1);
    assert_eq!(session.title(), "export.txt — Modern CSV Viewer");
}

#[test]
fn test_open_then_save_keeps_numbers_exact() {
    let dir = tempdir().unwrap();
    let content = "id,qty,price\n12345678901234567890,1,2.50\n2,3,4.25\n";
    let path = write_csv(dir.path(), "ids.csv", content);

    let mut session = Session::new();
    assert!(session.open(&path));
    assert!(session.save());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn test_open_empty_file_reports_parse_error() {
    let dir = tempdir().unwrap();
    let empty = write_csv(dir.path(), "empty.csv", "");

    let mut session = Session::new();
    assert!(!session.open(&empty));
    assert_eq!(
        last_toast(&session).1,
        "Error opening file: No columns to parse from file"
    );
}

#[test]
fn test_save_without_file_is_noop() {
    let mut session = Session::with_store(people_store());
    let toasts_before = session.toasts().count();
    assert!(!session.save());
    assert_eq!(session.toasts().count(), toasts_before);
}

#[test]
fn test_save_as_adopts_new_path() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("copy.csv");

    let mut session = Session::with_store(people_store());
    session.edit_cell(1, 1, "Bob");
    assert!(session.dispatch(Action::SaveAs(target.clone())));
    assert_eq!(session.current_file(), Some(target.as_path()));

    let reloaded = parse_csv_file(&target).unwrap();
    assert_eq!(reloaded.to_records(), session.adapter().store().to_records());
}

#[test]
fn test_save_into_missing_directory_fails_cleanly() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("no-such-dir").join("out.csv");

    let mut session = Session::with_store(people_store());
    session.edit_cell(0, 0, "9");
    assert!(!session.save_as(&target));
    assert!(session.current_file().is_none());
    assert!(session.is_dirty());
    assert!(last_toast(&session).1.starts_with("Error saving file: "));
}

#[test]
fn test_row_actions_and_messages() {
    let mut session = Session::with_store(people_store());

    assert!(session.dispatch(Action::AddRow { selected: vec![0] }));
    assert_eq!(last_toast(&session).1, "New row added successfully");
    assert_eq!(row_texts(session.adapter(), 1), vec!["NULL", "NULL"]);

    assert!(session.dispatch(Action::AddRow { selected: vec![] }));
    assert_eq!(session.adapter().row_count(), 4);

    assert!(session.dispatch(Action::DeleteRows(vec![1, 3])));
    assert_eq!(last_toast(&session).1, "Deleted 2 row(s)");
    assert_eq!(
        table_texts(session.adapter()),
        vec![vec!["1", "Alice"], vec!["2", "NULL"]]
    );

    assert!(!session.dispatch(Action::DeleteRows(vec![5])));
    assert_eq!(
        last_toast(&session).1,
        "Error deleting row(s): Row index 5 out of bounds (2 rows)"
    );
}

#[test]
fn test_add_row_failure_is_reported() {
    let mut session = Session::with_store(people_store());
    assert!(!session.add_row(&[10]));
    let (variant, message) = last_toast(&session);
    assert_eq!(variant, ToastVariant::Error);
    assert!(message.starts_with("Error adding row: "));
    assert_eq!(session.adapter().row_count(), 2);
}

#[test]
fn test_column_actions() {
    let mut session = Session::with_store(people_store());

    assert!(session.dispatch(Action::AddColumn("email".to_string())));
    assert_eq!(last_toast(&session).1, "Column 'email' added");

    assert!(session.dispatch(Action::DeleteColumn(0)));
    assert_eq!(last_toast(&session).1, "Column deleted successfully");
    assert_eq!(session.adapter().store().column_names(), vec!["name", "email"]);

    assert!(!session.dispatch(Action::DeleteColumn(2)));
    assert!(last_toast(&session).1.starts_with("Error deleting column: "));
}

#[test]
fn test_edit_errors_are_reported() {
    let mut session = Session::with_store(people_store());
    let edit = Action::EditCell {
        row: 7,
        col: 0,
        text: "x".to_string(),
    };
    assert!(!session.dispatch(edit));
    assert_eq!(
        last_toast(&session).1,
        "Error editing cell: Row index 7 out of bounds (2 rows)"
    );
    assert!(!session.is_dirty());
}

#[test]
fn test_row_context_menu() {
    let session = Session::with_store(people_store());

    let menu = session.row_context_menu(&[]);
    assert_eq!(menu.len(), 1);
    assert_eq!(menu[0].label(), Some("Add New Row"));

    let menu = session.row_context_menu(&[1, 0, 1]);
    assert_eq!(menu.len(), 3);
    assert_eq!(menu[1], MenuItem::Separator);
    assert_eq!(menu[2].label(), Some("Delete 2 Selected Row(s)"));
    assert_eq!(menu[2].action(), Some(&Action::DeleteRows(vec![0, 1])));
}

#[test]
fn test_header_context_menu_drives_delete() {
    let mut session = Session::with_store(people_store());

    let menu = session.header_context_menu(1);
    assert_eq!(menu[0].label(), Some("Delete Column 'name'"));
    assert!(session.header_context_menu(2).is_empty());

    let action = menu[0].action().cloned().unwrap();
    assert!(session.dispatch(action));
    assert_eq!(session.adapter().store().column_names(), vec!["id"]);
}
