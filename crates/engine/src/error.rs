use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// A row does not have the grid's column count.
    #[error("row {row} has {found} column(s), expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    /// Row heights / column widths don't match the matrix shape.
    #[error("extents are {heights} height(s) x {widths} width(s), matrix is {rows}x{cols}")]
    ExtentMismatch {
        heights: usize,
        widths: usize,
        rows: usize,
        cols: usize,
    },
    #[error("grid has no cells")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// No host clipboard could be opened.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard is empty")]
    Empty,
    #[error("clipboard read failed: {0}")]
    Read(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}
