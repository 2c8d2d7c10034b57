//! TableDelegate implementation over a [`Session`].
//!
//! Bridges the display adapter to gpui-component's Table. This surface can't
//! hide rows on its own, so it renders `visible_rows()` and maps display rows
//! back to store rows for every lookup and edit.

use crate::constants::{MODIFIED_CELL_BG, NULL_CELL_COLOR, SEARCH_MATCH_BG};
use crate::data::Invalidation;
use crate::session::Session;
use gpui::*;
use gpui_component::ActiveTheme;
use gpui_component::input::{Input, InputEvent, InputState};
use gpui_component::table::{Column, TableDelegate, TableState};

/// Delegate for rendering a session's table in a gpui-component Table.
pub struct GridDelegate {
    session: Session,
    /// Columns derived from the store header
    columns: Vec<Column>,
    /// Store row index for each displayed row
    visible_rows: Vec<usize>,
    /// Currently editing cell (display row, col)
    pub editing_cell: Option<(usize, usize)>,
    /// Input state for editing
    pub edit_input: Option<Entity<InputState>>,
    /// Container width for column sizing
    container_width: f32,
}

impl GridDelegate {
    pub fn new(session: Session, container_width: f32) -> Self {
        let mut delegate = Self {
            session,
            columns: Vec::new(),
            visible_rows: Vec::new(),
            editing_cell: None,
            edit_input: None,
            container_width,
        };
        delegate.rebuild_layout();
        delegate
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Update container width and recalculate column widths
    pub fn set_container_width(&mut self, width: f32) {
        if (self.container_width - width).abs() < 1.0 {
            return; // No significant change
        }
        self.container_width = width;
        let col_width = self.column_width();
        for col in &mut self.columns {
            col.width = px(col_width);
        }
    }

    /// Apply pending invalidations from the adapter.
    ///
    /// Returns true when anything needs repainting.
    pub fn sync(&mut self) -> bool {
        let pending = self.session.adapter_mut().take_invalidations();
        if pending.is_empty() {
            return false;
        }
        if pending.contains(&Invalidation::Shape) {
            self.editing_cell = None;
            self.edit_input = None;
            self.rebuild_layout();
        }
        true
    }

    fn column_width(&self) -> f32 {
        let col_count = self.session.adapter().column_count();
        let table_overhead = 4.0; // borders only (scrollbars hidden)
        let available_width = (self.container_width - table_overhead).max(100.0);
        if col_count > 0 {
            (available_width / col_count as f32).max(60.0)
        } else {
            100.0
        }
    }

    fn rebuild_layout(&mut self) {
        let col_width = self.column_width();
        let adapter = self.session.adapter();
        self.columns = adapter
            .store()
            .columns()
            .iter()
            .enumerate()
            .map(|(i, col)| {
                Column::new(format!("col_{}", i), col.name.clone())
                    .width(px(col_width))
                    .resizable(true)
            })
            .collect();
        self.visible_rows = adapter.visible_rows();
    }

    fn store_row(&self, display_row: usize) -> Option<usize> {
        self.visible_rows.get(display_row).copied()
    }

    /// Start editing a cell
    pub fn start_editing(
        &mut self,
        display_row: usize,
        col: usize,
        window: &mut Window,
        cx: &mut Context<TableState<Self>>,
    ) {
        let Some(row) = self.store_row(display_row) else {
            return;
        };
        let current_value = self
            .session
            .adapter()
            .store()
            .get_cell(row, col)
            .map(|c| c.to_field())
            .unwrap_or_default();

        let input = cx.new(|cx| InputState::new(window, cx).default_value(current_value));

        cx.subscribe(&input, |state, _input, event: &InputEvent, cx| match event {
            InputEvent::PressEnter { .. } | InputEvent::Blur => {
                state.delegate_mut().finish_editing(cx);
                cx.notify();
            }
            _ => {}
        })
        .detach();

        let input_clone = input.clone();
        window.defer(cx, move |window, cx| {
            input_clone.update(cx, |state, cx| {
                state.focus(window, cx);
            });
        });

        self.editing_cell = Some((display_row, col));
        self.edit_input = Some(input);
    }

    /// Finish editing and write the value through the session
    pub fn finish_editing(&mut self, cx: &mut Context<TableState<Self>>) {
        if let (Some((display_row, col)), Some(input)) =
            (self.editing_cell.take(), self.edit_input.take())
        {
            let Some(row) = self.store_row(display_row) else {
                return;
            };
            let new_value = input.read(cx).text().to_string();
            self.session.edit_cell(row, col, &new_value);
            self.sync();
        }
    }

    /// Cancel editing
    pub fn cancel_editing(&mut self) {
        self.editing_cell = None;
        self.edit_input = None;
    }
}

impl TableDelegate for GridDelegate {
    fn columns_count(&self, _cx: &App) -> usize {
        self.columns.len()
    }

    fn rows_count(&self, _cx: &App) -> usize {
        self.visible_rows.len()
    }

    fn column(&self, col_ix: usize, _cx: &App) -> &Column {
        // Bounds checking: clamp index to prevent panics
        let col_ix = col_ix.min(self.columns.len().saturating_sub(1));
        &self.columns[col_ix]
    }

    fn render_td(
        &mut self,
        row_ix: usize,
        col_ix: usize,
        _window: &mut Window,
        cx: &mut Context<TableState<Self>>,
    ) -> impl IntoElement {
        let is_editing = self.editing_cell == Some((row_ix, col_ix));
        if is_editing {
            if let Some(input) = &self.edit_input {
                return div()
                    .size_full()
                    .child(Input::new(input).appearance(false).size_full())
                    .into_any_element();
            }
        }

        let adapter = self.session.adapter();
        let row = self.store_row(row_ix).unwrap_or(row_ix);
        let text = adapter.cell_text(row, col_ix).unwrap_or_default();
        let style = adapter.cell_style(row, col_ix).unwrap_or_default();

        let fg: Hsla = if style.is_null {
            rgb(NULL_CELL_COLOR).into()
        } else {
            cx.theme().foreground
        };
        let bg: Option<Hsla> = if style.is_modified {
            Some(rgb(MODIFIED_CELL_BG).into())
        } else if style.is_search_match {
            Some(rgb(SEARCH_MATCH_BG).into())
        } else {
            None
        };
        let selection_bg = cx.theme().selection;

        let mut cell = div()
            .id(ElementId::Name(format!("cell-{}-{}", row_ix, col_ix).into()))
            .size_full()
            .px_2()
            .flex()
            .items_center()
            .text_color(fg)
            .overflow_x_hidden()
            .text_ellipsis()
            .hover(|s| s.bg(selection_bg.opacity(0.3)));
        if let Some(bg) = bg {
            cell = cell.bg(bg);
        }

        cell.on_mouse_down(
            MouseButton::Left,
            cx.listener(move |state, event: &MouseDownEvent, window, cx| {
                if event.click_count == 2 {
                    state.delegate_mut().start_editing(row_ix, col_ix, window, cx);
                    cx.notify();
                }
            }),
        )
        .child(text)
        .into_any_element()
    }

    fn render_tr(
        &mut self,
        row_ix: usize,
        _window: &mut Window,
        _cx: &mut Context<TableState<Self>>,
    ) -> Stateful<Div> {
        div().id(("row", row_ix))
    }

    fn render_empty(
        &mut self,
        _window: &mut Window,
        cx: &mut Context<TableState<Self>>,
    ) -> impl IntoElement {
        let message = if self.session.adapter().is_searching() {
            "No matching rows"
        } else {
            "No data"
        };
        div()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .text_color(cx.theme().muted_foreground)
            .child(message)
            .into_any_element()
    }
}
