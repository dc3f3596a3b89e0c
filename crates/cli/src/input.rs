// Loading grids from TSV files

use pastegrid_engine::{tsv, Grid, GridError};

/// Build a grid from TSV file contents.
///
/// One trailing newline is the file terminator, not an extra empty row.
/// Short rows are padded with empty cells to the widest row, since files
/// written by hand are often ragged.
pub fn parse_grid(text: &str, row_height: &str, col_width: &str) -> Result<Grid, GridError> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    let body = body.strip_suffix('\r').unwrap_or(body);
    if body.is_empty() {
        return Err(GridError::Empty);
    }

    let mut rows = tsv::decode(body);
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for (idx, row) in rows.iter_mut().enumerate() {
        if row.len() < width {
            log::debug!("padding row {} from {} to {} cells", idx + 1, row.len(), width);
            row.resize(width, String::new());
        }
    }

    Grid::with_uniform_extents(rows, row_height, col_width)
}
