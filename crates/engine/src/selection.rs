//! Selection state and keyboard/mouse navigation.
//!
//! Tracks the pointed cell, the live drag range, and the copy ("marching
//! ants") range that survives a copy or cut until the next paste or escape.

use std::time::Instant;

use pastegrid_core::{Position, Range, Rect};

/// Where input focus currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// On the pointed cell.
    #[default]
    Cell,
    /// On the hidden text surface used for the platform copy.
    Transfer,
    /// Nowhere: after a blur, or between a copy and its refocus.
    Detached,
}

/// A deferred "give focus back to this cell" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledRefocus {
    pub target: Position,
    pub due: Instant,
}

#[derive(Debug, Clone)]
pub struct Selection {
    rows: usize,
    cols: usize,
    pointed: Option<Position>,
    drag: Range,
    copy: Range,
    cutting: bool,
    focus: Focus,
    pending_refocus: Option<ScheduledRefocus>,
}

impl Selection {
    /// Fresh selection for a `rows` x `cols` grid, pointing at the top-left cell.
    pub fn new(rows: usize, cols: usize) -> Self {
        let origin = Position::new(0, 0);
        Self {
            rows,
            cols,
            pointed: origin.within(rows, cols).then_some(origin),
            drag: Range::Inactive,
            copy: Range::Inactive,
            cutting: false,
            focus: Focus::Cell,
            pending_refocus: None,
        }
    }

    pub fn pointed(&self) -> Option<Position> {
        self.pointed
    }

    pub fn drag(&self) -> Range {
        self.drag
    }

    pub fn copy_range(&self) -> Range {
        self.copy
    }

    pub fn is_cutting(&self) -> bool {
        self.cutting
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn pending_refocus(&self) -> Option<ScheduledRefocus> {
        self.pending_refocus
    }

    /// Normalized drag rectangle, if a drag is active.
    pub fn drag_rect(&self) -> Option<Rect> {
        self.drag.rect()
    }

    /// Normalized copy rectangle, if one is active.
    pub fn copy_rect(&self) -> Option<Rect> {
        self.copy.rect()
    }

    /// Point at a cell. Leaves the drag alone; rejects positions off the grid.
    pub fn point_at(&mut self, pos: Position) -> bool {
        if !pos.within(self.rows, self.cols) {
            return false;
        }
        self.pointed = Some(pos);
        self.focus = Focus::Cell;
        true
    }

    /// Click: point at the cell and drop any drag.
    pub fn click(&mut self, pos: Position) -> bool {
        if !self.point_at(pos) {
            return false;
        }
        self.drag = Range::Inactive;
        true
    }

    pub fn set_drag(&mut self, range: Range) {
        self.drag = range;
    }

    /// Grow or shrink the drag by moving its free corner (shift+arrow).
    ///
    /// The anchor is the pointed cell; the corner starts there when no drag is
    /// active. Moves that would leave the grid are ignored. Landing back on the
    /// anchor collapses the drag.
    pub fn extend_drag(&mut self, d_row: isize, d_col: isize) -> bool {
        let Some(anchor) = self.pointed else {
            return false;
        };
        let corner = self.drag.free().unwrap_or(anchor);
        let Some(next) = corner
            .offset(d_row, d_col)
            .filter(|p| p.within(self.rows, self.cols))
        else {
            return false;
        };

        self.drag = if next == anchor {
            Range::Inactive
        } else {
            Range::active(anchor, next)
        };
        true
    }

    pub fn select_all(&mut self) {
        if self.rows == 0 || self.cols == 0 {
            return;
        }
        self.drag = Range::from_rect(Rect::new(0, 0, self.rows - 1, self.cols - 1));
    }

    /// Select a whole column (column header click).
    pub fn select_column(&mut self, col: usize) -> bool {
        if col >= self.cols || self.rows == 0 {
            return false;
        }
        self.drag = Range::from_rect(Rect::new(0, col, self.rows - 1, col));
        self.point_at(Position::new(0, col))
    }

    /// Select a whole row (row header click).
    pub fn select_row(&mut self, row: usize) -> bool {
        if row >= self.rows || self.cols == 0 {
            return false;
        }
        self.drag = Range::from_rect(Rect::new(row, 0, row, self.cols - 1));
        self.point_at(Position::new(row, 0))
    }

    /// Mouse drag begins on a cell.
    pub fn drag_start(&mut self, pos: Position) -> bool {
        if !self.point_at(pos) {
            return false;
        }
        self.drag = Range::Anchored(pos);
        true
    }

    /// Mouse drag passes over a cell.
    pub fn drag_enter(&mut self, pos: Position) -> bool {
        let Some(anchor) = self.drag.anchor() else {
            return false;
        };
        if !pos.within(self.rows, self.cols) {
            return false;
        }
        self.drag = Range::active(anchor, pos);
        true
    }

    /// Mouse drag released. A drag that never left its anchor cell is dropped.
    pub fn drag_end(&mut self) {
        match self.drag {
            Range::Anchored(_) => self.drag = Range::Inactive,
            Range::Active { anchor, free } if anchor == free => self.drag = Range::Inactive,
            _ => {}
        }
    }

    /// Move the pointed cell by a delta. See [`Selection::select`].
    pub fn move_by(&mut self, d_row: isize, d_col: isize, breaking: bool) -> bool {
        let Some(current) = self.pointed else {
            return false;
        };
        let row = (current.row as isize).checked_add(d_row);
        let col = (current.col as isize).checked_add(d_col);
        match (row, col) {
            (Some(row), Some(col)) => self.select(row, col, breaking),
            _ => {
                // Off any grid; same outcome as a rejected select.
                if breaking {
                    self.drag = Range::Inactive;
                }
                false
            }
        }
    }

    /// Point at a candidate cell, wrapping inside the drag rectangle.
    ///
    /// While a drag is active (and `breaking` is false) a candidate that falls
    /// off one edge of the rectangle reappears on the opposite edge, one step
    /// along the other axis, the way Tab/Enter cycle through a selection.
    /// Each edge is checked once, in order top, bottom, left, right.
    ///
    /// A breaking move drops the drag first, even when the move itself is
    /// then rejected for leaving the grid.
    pub fn select(&mut self, row: isize, col: isize, breaking: bool) -> bool {
        let (mut next_row, mut next_col) = (row, col);

        if let (Some(rect), false) = (self.drag.rect(), breaking) {
            let top = rect.top as isize;
            let left = rect.left as isize;
            let bottom = rect.bottom as isize;
            let right = rect.right as isize;

            if next_row < top {
                next_row = bottom;
                next_col = if next_col > left { next_col - 1 } else { right };
            }
            if next_row > bottom {
                next_row = top;
                next_col = if next_col < right { next_col + 1 } else { left };
            }
            if next_col < left {
                next_col = right;
                next_row = if next_row > top { next_row - 1 } else { bottom };
            }
            if next_col > right {
                next_col = left;
                next_row = if next_row < bottom { next_row + 1 } else { top };
            }
        }

        if breaking {
            self.drag = Range::Inactive;
        }

        match self.in_grid(next_row, next_col) {
            Some(target) => {
                self.pointed = Some(target);
                self.focus = Focus::Cell;
                true
            }
            None => false,
        }
    }

    /// Drop the pointed cell and the drag.
    pub fn blur(&mut self) {
        self.pointed = None;
        self.drag = Range::Inactive;
        self.focus = Focus::Detached;
    }

    pub fn set_copy(&mut self, rect: Rect, cut: bool) {
        self.copy = Range::from_rect(rect);
        self.cutting = cut;
    }

    /// Forget the copy rectangle (escape, or after a paste).
    pub fn clear_copy(&mut self) {
        self.copy = Range::Inactive;
        self.cutting = false;
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
    }

    /// Schedule focus to return to `target` at `due`. Replaces any pending one.
    pub fn schedule_refocus(&mut self, target: Position, due: Instant) {
        self.pending_refocus = Some(ScheduledRefocus { target, due });
    }

    pub fn cancel_refocus(&mut self) -> Option<ScheduledRefocus> {
        self.pending_refocus.take()
    }

    /// Run the pending refocus if it is due at `now`. Returns the cell focused.
    pub fn fire_refocus(&mut self, now: Instant) -> Option<Position> {
        let pending = self.pending_refocus.filter(|p| p.due <= now)?;
        self.pending_refocus = None;
        if self.point_at(pending.target) {
            Some(pending.target)
        } else {
            None
        }
    }

    fn in_grid(&self, row: isize, col: isize) -> Option<Position> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        let pos = Position::new(row, col);
        pos.within(self.rows, self.cols).then_some(pos)
    }
}
