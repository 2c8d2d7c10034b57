//! CSV viewer and light editor.
//!
//! - [`data`] - table store, CSV reading/writing, search and the display adapter
//! - [`session`] - current file, action table and error reporting
//! - [`notifications`] - toast queue
//! - [`settings`] - process-wide UI preferences
//! - `grid` - gpui-component Table bridge (feature `gui`)

pub mod constants;
pub mod data;
#[cfg(feature = "gui")]
pub mod grid;
pub mod logging;
pub mod notifications;
pub mod session;
pub mod settings;
pub mod types;
