//! The editing session: one grid, its selection, and a host clipboard.
//!
//! Copy/cut/paste live in `paste.rs`, the remaining commands in `commands.rs`.

use std::time::{Duration, Instant};

use pastegrid_core::Position;
use serde::Serialize;

use crate::clipboard::{ClipboardService, MemoryClipboard};
use crate::grid::Grid;
use crate::selection::Selection;

/// Delay before focus returns to the pointed cell after a copy.
pub const DEFAULT_REFOCUS_DELAY: Duration = Duration::from_millis(100);

/// How a cell sits relative to the copy rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipMark {
    Copying,
    Cutting,
}

/// Per-cell state a renderer needs to decorate a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CellMarks {
    pub pointed: bool,
    pub dragging: bool,
    pub clip: Option<ClipMark>,
}

pub struct Editor {
    pub(crate) grid: Grid,
    pub(crate) selection: Selection,
    pub(crate) clipboard: Box<dyn ClipboardService>,
    pub(crate) refocus_delay: Duration,
}

impl Editor {
    /// Session over `grid` with a process-local clipboard.
    pub fn new(grid: Grid) -> Self {
        Self::with_clipboard(grid, Box::new(MemoryClipboard::new()))
    }

    pub fn with_clipboard(grid: Grid, clipboard: Box<dyn ClipboardService>) -> Self {
        let selection = Selection::new(grid.rows(), grid.cols());
        Self {
            grid,
            selection,
            clipboard,
            refocus_delay: DEFAULT_REFOCUS_DELAY,
        }
    }

    pub fn with_refocus_delay(mut self, delay: Duration) -> Self {
        self.refocus_delay = delay;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clipboard_mut(&mut self) -> &mut dyn ClipboardService {
        self.clipboard.as_mut()
    }

    pub fn cell_marks(&self, row: usize, col: usize) -> CellMarks {
        let clip = self.selection.copy_range().contains(row, col).then(|| {
            if self.selection.is_cutting() {
                ClipMark::Cutting
            } else {
                ClipMark::Copying
            }
        });
        CellMarks {
            pointed: self.selection.pointed() == Some(Position::new(row, col)),
            dragging: self.selection.drag().contains(row, col),
            clip,
        }
    }

    /// Advance the session clock: runs the deferred refocus once it is due.
    pub fn tick(&mut self, now: Instant) -> Option<Position> {
        let focused = self.selection.fire_refocus(now);
        if let Some(pos) = focused {
            log::debug!("refocused ({}, {})", pos.row, pos.col);
        }
        focused
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("grid", &self.grid)
            .field("selection", &self.selection)
            .field("refocus_delay", &self.refocus_delay)
            .finish_non_exhaustive()
    }
}
