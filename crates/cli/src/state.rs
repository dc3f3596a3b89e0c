// Session state dump for `pgrid replay --json`

use pastegrid_core::{cell_ref, Range};
use pastegrid_engine::{CellMarks, Editor};
use serde::Serialize;

/// Everything a renderer would need after a replay: cells, extents,
/// selection ranges, and the cells that carry a mark.
#[derive(Debug, Serialize)]
pub struct SessionState<'a> {
    pub cells: &'a [Vec<String>],
    pub heights: &'a [String],
    pub widths: &'a [String],
    /// A1 reference of the pointed cell
    pub pointed: Option<String>,
    pub drag: Range,
    pub copy: Range,
    pub cutting: bool,
    /// Cells that are pointed, dragged over, or inside the copy range
    pub marked: Vec<MarkedCell>,
}

#[derive(Debug, Serialize)]
pub struct MarkedCell {
    pub cell: String,
    #[serde(flatten)]
    pub marks: CellMarks,
}

impl<'a> SessionState<'a> {
    pub fn capture(editor: &'a Editor) -> Self {
        let grid = editor.grid();
        let selection = editor.selection();

        let mut marked = Vec::new();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let marks = editor.cell_marks(row, col);
                if marks != CellMarks::default() {
                    marked.push(MarkedCell { cell: cell_ref(row, col), marks });
                }
            }
        }

        Self {
            cells: grid.matrix(),
            heights: grid.heights(),
            widths: grid.widths(),
            pointed: selection.pointed().map(|p| cell_ref(p.row, p.col)),
            drag: selection.drag(),
            copy: selection.copy_range(),
            cutting: selection.is_cutting(),
            marked,
        }
    }
}
