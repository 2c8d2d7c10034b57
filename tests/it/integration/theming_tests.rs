//! Process-wide UI preferences.
//!
//! The theme lives in a global, so only one test here mutates it.

use sheetview::session::{Action, Session};
use sheetview::settings::{self, ThemeMode};

#[test]
fn test_toggle_theme_flips_global_mode() {
    let mut session = Session::new();

    let before = settings::theme();
    let after = session.toggle_theme();
    assert_eq!(after, before.toggled());
    assert_eq!(settings::theme(), after);
    assert_ne!(after.is_dark(), before.is_dark());

    assert!(session.dispatch(Action::ToggleTheme));
    assert_eq!(settings::theme(), before);
    assert_eq!(settings::preferences().theme, before);

    assert!(session.dispatch(Action::SetTheme(ThemeMode::Dark)));
    assert!(settings::theme().is_dark());
    assert!(session.dispatch(Action::SetTheme(ThemeMode::Light)));
    assert_eq!(settings::theme(), ThemeMode::Light);
}
