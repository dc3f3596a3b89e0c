//! Clipboard text format: tab-separated columns, newline-separated rows.
//!
//! No quoting or escaping. Cell text is expected to hold no tab, CR or LF;
//! text that does will not survive a round trip.

use crate::grid::Matrix;

/// Join columns with tabs and rows with newlines. A 1x1 block is its bare text.
pub fn encode(block: &[Vec<String>]) -> String {
    block
        .iter()
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split text into rows and columns.
///
/// Always yields at least one row of at least one cell (`""` decodes to a
/// single empty cell). Rows keep whatever length the text gives them, so the
/// result may be ragged. A trailing `\r` on a line is dropped so CRLF text
/// decodes the same as LF text.
pub fn decode(text: &str) -> Matrix {
    text.split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            line.split('\t').map(str::to_string).collect()
        })
        .collect()
}

/// Column count of the first row, the width paste tiling uses.
pub fn reference_width(block: &Matrix) -> usize {
    block.first().map_or(0, Vec::len)
}
