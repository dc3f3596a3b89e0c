//! UI-facing command surface.
//!
//! Every interaction the grid widget can raise is a [`Command`]; `dispatch`
//! runs one to completion. Dispatch first cancels a pending refocus from an
//! earlier copy, so a stale refocus can never land after a newer command.

use pastegrid_core::Position;

use crate::editor::Editor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Point at a cell and drop the drag.
    Click { row: usize, col: usize },
    DragStart { row: usize, col: usize },
    DragEnter { row: usize, col: usize },
    DragEnd,
    SelectRow(usize),
    SelectColumn(usize),
    /// Point at a candidate cell with wrap-inside-selection semantics.
    Select { row: isize, col: isize, breaking: bool },
    /// Same as `Select`, relative to the pointed cell.
    Move { d_row: isize, d_col: isize, breaking: bool },
    ExtendDrag { d_row: isize, d_col: isize },
    SelectAll,
    /// Replace the pointed cell's text.
    Write(String),
    Copy,
    Cut,
    /// Paste an explicit payload (paste event).
    Paste(String),
    /// Paste whatever the host clipboard holds.
    PasteFromClipboard,
    Clear,
    Escape,
    Blur,
}

impl Editor {
    pub fn dispatch(&mut self, command: Command) {
        if let Some(stale) = self.selection.cancel_refocus() {
            log::trace!("cancelled refocus of ({}, {})", stale.target.row, stale.target.col);
        }
        log::debug!("dispatch {command:?}");

        match command {
            Command::Click { row, col } => {
                self.selection.click(Position::new(row, col));
            }
            Command::DragStart { row, col } => {
                self.selection.drag_start(Position::new(row, col));
            }
            Command::DragEnter { row, col } => {
                self.selection.drag_enter(Position::new(row, col));
            }
            Command::DragEnd => self.selection.drag_end(),
            Command::SelectRow(row) => {
                self.selection.select_row(row);
            }
            Command::SelectColumn(col) => {
                self.selection.select_column(col);
            }
            Command::Select { row, col, breaking } => {
                self.selection.select(row, col, breaking);
            }
            Command::Move { d_row, d_col, breaking } => {
                self.selection.move_by(d_row, d_col, breaking);
            }
            Command::ExtendDrag { d_row, d_col } => {
                self.selection.extend_drag(d_row, d_col);
            }
            Command::SelectAll => self.selection.select_all(),
            Command::Write(text) => self.write(&text),
            Command::Copy => self.copy(false),
            Command::Cut => self.copy(true),
            Command::Paste(text) => self.paste(&text),
            Command::PasteFromClipboard => self.paste_from_clipboard(),
            Command::Clear => self.clear(),
            Command::Escape => self.escape(),
            Command::Blur => self.blur(),
        }
    }

    /// Replace the pointed cell's text.
    pub fn write(&mut self, text: &str) {
        let Some(pos) = self.selection.pointed() else {
            return;
        };
        if let Err(e) = self.grid.set_cell(pos.row, pos.col, text) {
            log::warn!("write ignored: {e}");
        }
    }

    /// Blank the drag rectangle, or the pointed cell when nothing is dragged.
    pub fn clear(&mut self) {
        let result = match (self.selection.drag_rect(), self.selection.pointed()) {
            (Some(rect), _) => self.grid.set_rect(rect, ""),
            (None, Some(pos)) => self.grid.set_cell(pos.row, pos.col, ""),
            (None, None) => return,
        };
        if let Err(e) = result {
            log::warn!("clear ignored: {e}");
        }
    }

    /// Drop the copy range (marching ants). Drag and pointed cell stay.
    pub fn escape(&mut self) {
        self.selection.clear_copy();
    }

    pub fn blur(&mut self) {
        self.selection.blur();
    }
}
