//! Process-wide UI preferences.
//!
//! Nothing here is written to disk; preferences live for the process only.

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    pub theme: ThemeMode,
}

static PREFERENCES: Lazy<RwLock<UiPreferences>> = Lazy::new(|| RwLock::new(UiPreferences::default()));

/// Snapshot of the current preferences
pub fn preferences() -> UiPreferences {
    *PREFERENCES.read()
}

pub fn theme() -> ThemeMode {
    PREFERENCES.read().theme
}

pub fn set_theme(theme: ThemeMode) {
    PREFERENCES.write().theme = theme;
    tracing::debug!(?theme, "Theme changed");
}

/// Flip between light and dark, returning the new mode
pub fn toggle_theme() -> ThemeMode {
    let mut prefs = PREFERENCES.write();
    prefs.theme = prefs.theme.toggled();
    tracing::debug!(theme = ?prefs.theme, "Theme toggled");
    prefs.theme
}
