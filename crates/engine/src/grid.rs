//! Grid store: the committed matrix of cell text.
//!
//! The matrix is never edited in place. Every change builds a new matrix
//! (directly or through a [`Draft`]) and publishes it with a commit, so a
//! renderer holding an older [`Grid::snapshot`] keeps a consistent view.

use std::sync::Arc;

use pastegrid_core::Rect;

use crate::error::GridError;
use crate::tsv;

/// Row-major cell text.
pub type Matrix = Vec<Vec<String>>;

#[derive(Debug, Clone)]
pub struct Grid {
    current: Arc<Matrix>,
    rows: usize,
    cols: usize,
    /// Opaque display metadata, one entry per row / column.
    heights: Vec<String>,
    widths: Vec<String>,
    revision: u64,
}

impl Grid {
    /// Build a grid from initial data plus row heights and column widths.
    /// The extents fix the grid's shape for the session.
    pub fn new(data: Matrix, heights: Vec<String>, widths: Vec<String>) -> Result<Self, GridError> {
        let (rows, cols) = (heights.len(), widths.len());
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }
        if data.len() != rows || data.first().map(Vec::len) != Some(cols) {
            return Err(GridError::ExtentMismatch {
                heights: rows,
                widths: cols,
                rows: data.len(),
                cols: data.first().map_or(0, Vec::len),
            });
        }
        check_shape(&data, cols)?;

        Ok(Self {
            current: Arc::new(data),
            rows,
            cols,
            heights,
            widths,
            revision: 0,
        })
    }

    /// Build a grid with the same height for every row and width for every column.
    pub fn with_uniform_extents(
        data: Matrix,
        row_height: &str,
        col_width: &str,
    ) -> Result<Self, GridError> {
        let rows = data.len();
        let cols = data.first().map_or(0, Vec::len);
        Self::new(
            data,
            vec![row_height.to_string(); rows],
            vec![col_width.to_string(); cols],
        )
    }

    /// A `rows` x `cols` grid of empty cells.
    pub fn blank(
        rows: usize,
        cols: usize,
        row_height: &str,
        col_width: &str,
    ) -> Result<Self, GridError> {
        Self::with_uniform_extents(vec![vec![String::new(); cols]; rows], row_height, col_width)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn heights(&self) -> &[String] {
        &self.heights
    }

    pub fn widths(&self) -> &[String] {
        &self.widths
    }

    /// Bumped on every commit.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, row: usize, col: usize) -> Result<&str, GridError> {
        self.check(row, col)?;
        Ok(&self.current[row][col])
    }

    /// The committed matrix, shared. Later commits don't affect it.
    pub fn snapshot(&self) -> Arc<Matrix> {
        Arc::clone(&self.current)
    }

    pub fn matrix(&self) -> &Matrix {
        &self.current
    }

    /// Replace a single cell and commit.
    pub fn set_cell(&mut self, row: usize, col: usize, text: &str) -> Result<(), GridError> {
        self.check(row, col)?;
        let mut draft = self.draft();
        draft.set(row, col, text);
        self.commit_draft(draft);
        Ok(())
    }

    /// Replace every cell of an inclusive rectangle with the same text and commit.
    pub fn set_rect(&mut self, rect: Rect, text: &str) -> Result<(), GridError> {
        self.check(rect.bottom, rect.right)?;
        let mut draft = self.draft();
        for pos in rect.cells() {
            draft.set(pos.row, pos.col, text);
        }
        self.commit_draft(draft);
        Ok(())
    }

    /// Publish a new matrix as current. It must keep the grid's shape.
    pub fn commit(&mut self, matrix: Matrix) -> Result<(), GridError> {
        if matrix.len() != self.rows {
            return Err(GridError::ExtentMismatch {
                heights: self.rows,
                widths: self.cols,
                rows: matrix.len(),
                cols: matrix.first().map_or(0, Vec::len),
            });
        }
        check_shape(&matrix, self.cols)?;
        self.publish(matrix);
        Ok(())
    }

    /// Start an edit from a private copy of the current matrix.
    pub fn draft(&self) -> Draft {
        Draft {
            cells: self.current.as_ref().clone(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Publish a draft. Drafts cannot change shape, so this can't fail.
    pub fn commit_draft(&mut self, draft: Draft) {
        self.publish(draft.cells);
    }

    /// Copy out the cells of a rectangle.
    pub fn block(&self, rect: Rect) -> Result<Matrix, GridError> {
        self.check(rect.bottom, rect.right)?;
        Ok(self.current[rect.top..=rect.bottom]
            .iter()
            .map(|row| row[rect.left..=rect.right].to_vec())
            .collect())
    }

    /// Whole grid as clipboard text.
    pub fn to_tsv(&self) -> String {
        tsv::encode(self.current.as_slice())
    }

    fn publish(&mut self, matrix: Matrix) {
        self.current = Arc::new(matrix);
        self.revision += 1;
        log::trace!("grid committed, revision {}", self.revision);
    }

    fn check(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

fn check_shape(matrix: &Matrix, cols: usize) -> Result<(), GridError> {
    match matrix.iter().position(|row| row.len() != cols) {
        Some(row) => Err(GridError::Ragged {
            row,
            expected: cols,
            found: matrix[row].len(),
        }),
        None => Ok(()),
    }
}

/// An uncommitted edit of the grid with a fixed shape.
#[derive(Debug, Clone)]
pub struct Draft {
    cells: Matrix,
    rows: usize,
    cols: usize,
}

impl Draft {
    /// Write one cell. Positions outside the grid are skipped; returns whether
    /// the write landed.
    pub fn set(&mut self, row: usize, col: usize, text: &str) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells[row][col] = text.to_string();
        true
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }
}
