use serde::{Deserialize, Serialize};

/// A cell coordinate, zero-based on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a signed delta. Returns None if either axis would go negative;
    /// the upper bound is the caller's business.
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Self { row, col })
    }

    /// Check if this position lies inside a `rows` x `cols` grid.
    pub fn within(&self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A rectangular block of cells, inclusive on all four edges.
///
/// Only ever built normalized (`top <= bottom`, `left <= right`), either through
/// [`Rect::new`] or by normalizing a [`Range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl Rect {
    /// Create a new rectangle, automatically normalizing so top-left <= bottom-right.
    pub fn new(r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        Self {
            top: r1.min(r2),
            left: c1.min(c2),
            bottom: r1.max(r2),
            right: c1.max(c2),
        }
    }

    /// Create a single-cell rectangle.
    pub fn single(pos: Position) -> Self {
        Self {
            top: pos.row,
            left: pos.col,
            bottom: pos.row,
            right: pos.col,
        }
    }

    /// Rectangle whose top-left is `origin`, extending `height` rows and
    /// `width` columns further (spans, so `spanning(p, 0, 0)` is one cell).
    pub fn spanning(origin: Position, height: usize, width: usize) -> Self {
        Self {
            top: origin.row,
            left: origin.col,
            bottom: origin.row + height,
            right: origin.col + width,
        }
    }

    pub fn top_left(&self) -> Position {
        Position::new(self.top, self.left)
    }

    pub fn bottom_right(&self) -> Position {
        Position::new(self.bottom, self.right)
    }

    /// Inclusive containment; a cell on any edge is inside.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.top && row <= self.bottom && col >= self.left && col <= self.right
    }

    /// Row span (`bottom - top`). A single cell has height 0.
    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    /// Column span (`right - left`). A single cell has width 0.
    pub fn width(&self) -> usize {
        self.right - self.left
    }

    /// Number of rows covered.
    pub fn rows(&self) -> usize {
        self.height() + 1
    }

    /// Number of columns covered.
    pub fn cols(&self) -> usize {
        self.width() + 1
    }

    /// Number of cells in this rectangle.
    pub fn cell_count(&self) -> usize {
        self.rows() * self.cols()
    }

    /// Check if this is a single cell.
    pub fn is_single(&self) -> bool {
        self.top == self.bottom && self.left == self.right
    }

    /// Iterate over all cells (row-major order).
    pub fn cells(&self) -> impl Iterator<Item = Position> {
        let (top, bottom, left, right) = (self.top, self.bottom, self.left, self.right);
        (top..=bottom).flat_map(move |r| (left..=right).map(move |c| Position::new(r, c)))
    }

    /// Cut this rectangle down to a `rows` x `cols` grid.
    /// Returns None when it lies entirely outside.
    pub fn clamp_to(&self, rows: usize, cols: usize) -> Option<Self> {
        if rows == 0 || cols == 0 || self.top >= rows || self.left >= cols {
            return None;
        }
        Some(Self {
            top: self.top,
            left: self.left,
            bottom: self.bottom.min(rows - 1),
            right: self.right.min(cols - 1),
        })
    }
}

/// An anchor-first span of cells, as produced by dragging or extending.
///
/// The anchor is where the gesture started; `free` is the corner that moves.
/// Neither endpoint is ordered, use [`Range::rect`] to get the normalized block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Range {
    #[default]
    Inactive,
    /// Collapsed to the anchor only: a drag has started but not yet entered
    /// another cell. Covers no rectangle.
    Anchored(Position),
    Active { anchor: Position, free: Position },
}

impl Range {
    pub fn active(anchor: Position, free: Position) -> Self {
        Self::Active { anchor, free }
    }

    /// Range covering `rect`, anchored at its top-left.
    pub fn from_rect(rect: Rect) -> Self {
        Self::Active {
            anchor: rect.top_left(),
            free: rect.bottom_right(),
        }
    }

    /// Normalize into a rectangle. Only `Active` ranges cover cells.
    pub fn rect(&self) -> Option<Rect> {
        match *self {
            Self::Active { anchor, free } => {
                Some(Rect::new(anchor.row, anchor.col, free.row, free.col))
            }
            Self::Inactive | Self::Anchored(_) => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    pub fn anchor(&self) -> Option<Position> {
        match *self {
            Self::Active { anchor, .. } | Self::Anchored(anchor) => Some(anchor),
            Self::Inactive => None,
        }
    }

    pub fn free(&self) -> Option<Position> {
        match *self {
            Self::Active { free, .. } => Some(free),
            Self::Inactive | Self::Anchored(_) => None,
        }
    }

    /// Check if a cell lies in the normalized rectangle.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rect().is_some_and(|r| r.contains(row, col))
    }
}
