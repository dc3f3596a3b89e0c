//! Copy, cut and paste.
//!
//! A copy remembers its source rectangle (the copy range) besides putting
//! TSV on the host clipboard. Paste then picks one of four strategies from
//! whether a drag and a copy range are active:
//!
//! | drag | copy | strategy                                                  |
//! |------|------|-----------------------------------------------------------|
//! | no   | no   | decode the text, write it at the pointed cell             |
//! | no   | yes  | write the copy source at the pointed cell                 |
//! | yes  | no   | tile the decoded text over the drag, by grid position     |
//! | yes  | yes  | tile the copy source over the larger of drag and source   |
//!
//! Writes falling outside the grid are dropped. Internal sources are read
//! from the snapshot committed before the paste, so overlapping source and
//! destination never feed back into each other.

use std::time::Instant;

use pastegrid_core::{Position, Range, Rect};

use crate::editor::Editor;
use crate::grid::{Draft, Matrix};
use crate::selection::Focus;
use crate::tsv;

impl Editor {
    /// Copy (or cut) the current source to the clipboard and mark it as the copy range.
    ///
    /// The source is the active copy range, else the drag rectangle, else the
    /// pointed cell. Cut only marks the source; its cells are cleared by the
    /// next paste.
    pub fn copy(&mut self, cut: bool) {
        let source = self
            .selection
            .copy_rect()
            .or_else(|| self.selection.drag_rect())
            .or_else(|| self.selection.pointed().map(Rect::single));
        let Some(source) = source else {
            log::debug!("copy ignored: nothing selected");
            return;
        };
        let block = match self.grid.block(source) {
            Ok(block) => block,
            Err(e) => {
                log::warn!("copy ignored: {e}");
                return;
            }
        };

        self.selection.set_copy(source, cut);
        log::debug!(
            "{} {}x{} at ({}, {})",
            if cut { "cut" } else { "copy" },
            source.rows(),
            source.cols(),
            source.top,
            source.left
        );

        self.selection.set_focus(Focus::Transfer);
        if let Err(e) = self.clipboard.write_text(&tsv::encode(&block)) {
            log::warn!("{e}; keeping internal copy only");
        }
        self.selection.set_focus(Focus::Detached);

        if let Some(target) = self.selection.pointed() {
            self.selection
                .schedule_refocus(target, Instant::now() + self.refocus_delay);
        }
    }

    pub fn cut(&mut self) {
        self.copy(true);
    }

    /// Paste `text` (the paste event payload) at the pointed cell.
    pub fn paste(&mut self, text: &str) {
        let Some(pointed) = self.selection.pointed() else {
            log::debug!("paste ignored: no pointed cell");
            return;
        };
        let drag = self.selection.drag_rect();
        let copy = self.selection.copy_rect();
        let source = self.grid.snapshot();
        let mut draft = self.grid.draft();

        match (drag, copy) {
            (None, None) => {
                let block = tsv::decode(text);
                log::debug!(
                    "paste: {} row(s) of text at ({}, {})",
                    block.len(),
                    pointed.row,
                    pointed.col
                );
                let footprint = write_block(&mut draft, pointed, &block);
                if let Some(footprint) = footprint {
                    self.selection.set_drag(Range::from_rect(footprint));
                }
            }
            (None, Some(src)) => {
                log::debug!(
                    "paste: internal {}x{} at ({}, {})",
                    src.rows(),
                    src.cols(),
                    pointed.row,
                    pointed.col
                );
                tile_source(&mut draft, &source, src, pointed, src.height(), src.width());
                if !src.is_single() {
                    self.set_drag_footprint(pointed, src.height(), src.width());
                }
            }
            (Some(dest), None) => {
                let block = tsv::decode(text);
                log::debug!("paste: tiling text over {}x{}", dest.rows(), dest.cols());
                tile_text(&mut draft, &block, dest);
            }
            (Some(dest), Some(src)) => {
                let height = dest.height().max(src.height());
                let width = dest.width().max(src.width());
                log::debug!(
                    "paste: tiling internal {}x{} over {}x{}",
                    src.rows(),
                    src.cols(),
                    height + 1,
                    width + 1
                );
                tile_source(&mut draft, &source, src, pointed, height, width);
                self.set_drag_footprint(pointed, height, width);
            }
        }

        if self.selection.is_cutting() {
            if let Some(src) = copy {
                for pos in src.cells() {
                    draft.set(pos.row, pos.col, "");
                }
            }
        }

        self.grid.commit_draft(draft);
        self.selection.clear_copy();
    }

    /// Read the host clipboard and paste it.
    ///
    /// When the read fails but a copy range is active, the paste still runs
    /// from the internal source.
    pub fn paste_from_clipboard(&mut self) {
        match self.clipboard.read_text() {
            Ok(text) => self.paste(&text),
            Err(e) if self.selection.copy_range().is_active() => {
                log::warn!("{e}; pasting from internal copy");
                self.paste("");
            }
            Err(e) => log::warn!("paste ignored: {e}"),
        }
    }

    fn set_drag_footprint(&mut self, origin: Position, height: usize, width: usize) {
        let footprint = Rect::spanning(origin, height, width);
        if let Some(rect) = footprint.clamp_to(self.grid.rows(), self.grid.cols()) {
            self.selection.set_drag(Range::from_rect(rect));
        }
    }
}

/// Write a decoded block with its top-left at `origin`, row by row, each row
/// as long as the text made it. Returns the landed footprint, measured with
/// the first row's width and clipped to the grid.
fn write_block(draft: &mut Draft, origin: Position, block: &Matrix) -> Option<Rect> {
    for (dy, row) in block.iter().enumerate() {
        for (dx, text) in row.iter().enumerate() {
            draft.set(origin.row + dy, origin.col + dx, text);
        }
    }
    let height = block.len().saturating_sub(1);
    let width = tsv::reference_width(block).saturating_sub(1);
    Rect::spanning(origin, height, width).clamp_to(draft.rows(), draft.cols())
}

/// Fill `dest` by repeating the block, indexed by absolute grid position
/// (`row % block_rows`, `col % block_cols`). Cells the block has no text for
/// (ragged rows) are left as they were.
fn tile_text(draft: &mut Draft, block: &Matrix, dest: Rect) {
    let block_rows = block.len();
    let block_cols = tsv::reference_width(block);
    if block_rows == 0 || block_cols == 0 {
        return;
    }
    for pos in dest.cells() {
        let row = &block[pos.row % block_rows];
        if let Some(text) = row.get(pos.col % block_cols) {
            draft.set(pos.row, pos.col, text);
        }
    }
}

/// Fill `height`+1 x `width`+1 cells from `origin` with the source rectangle,
/// repeating it on both axes.
fn tile_source(
    draft: &mut Draft,
    source: &Matrix,
    src: Rect,
    origin: Position,
    height: usize,
    width: usize,
) {
    for dy in 0..=height {
        for dx in 0..=width {
            let text = &source[src.top + dy % src.rows()][src.left + dx % src.cols()];
            draft.set(origin.row + dy, origin.col + dx, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    fn editor(data: &[&[&str]]) -> Editor {
        let matrix = data
            .iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect();
        Editor::new(Grid::with_uniform_extents(matrix, "24px", "150px").unwrap())
    }

    fn row(ed: &Editor, r: usize) -> Vec<String> {
        ed.grid().matrix()[r].clone()
    }

    #[test]
    fn test_copy_single_cell_sets_copy_range() {
        let mut ed = editor(&[&["a", "b"], &["c", "d"]]);
        ed.selection.point_at(Position::new(1, 0));
        ed.copy(false);

        assert_eq!(ed.selection().copy_rect(), Some(Rect::new(1, 0, 1, 0)));
        assert!(!ed.selection().is_cutting());
        assert_eq!(ed.clipboard_mut().read_text().unwrap(), "c");
    }

    #[test]
    fn test_copy_prefers_existing_copy_range() {
        let mut ed = editor(&[&["a", "b"], &["c", "d"]]);
        ed.selection.set_copy(Rect::new(0, 1, 1, 1), false);
        ed.selection.set_drag(Range::from_rect(Rect::new(0, 0, 0, 1)));
        ed.copy(true);

        assert_eq!(ed.selection().copy_rect(), Some(Rect::new(0, 1, 1, 1)));
        assert!(ed.selection().is_cutting());
        assert_eq!(ed.clipboard_mut().read_text().unwrap(), "b\nd");
    }

    #[test]
    fn test_copy_detaches_focus_and_schedules_refocus() {
        let mut ed = editor(&[&["a"]]);
        ed.copy(false);

        assert_eq!(ed.selection().focus(), Focus::Detached);
        let pending = ed.selection().pending_refocus().unwrap();
        assert_eq!(pending.target, Position::new(0, 0));

        assert_eq!(ed.tick(pending.due), Some(Position::new(0, 0)));
        assert_eq!(ed.selection().focus(), Focus::Cell);
    }

    #[test]
    fn test_paste_text_clamped_at_edge() {
        let mut ed = editor(&[&["", ""], &["", ""]]);
        ed.selection.point_at(Position::new(1, 1));
        ed.paste("a\tb\nc\td");

        assert_eq!(row(&ed, 0), vec!["", ""]);
        assert_eq!(row(&ed, 1), vec!["", "a"]);
        assert_eq!(ed.selection().drag_rect(), Some(Rect::single(Position::new(1, 1))));
    }

    #[test]
    fn test_paste_internal_single_cell_keeps_drag() {
        let mut ed = editor(&[&["a", "", ""]]);
        ed.copy(false);
        ed.selection.point_at(Position::new(0, 2));
        ed.paste("ignored");

        assert_eq!(row(&ed, 0), vec!["a", "", "a"]);
        assert_eq!(ed.selection().drag(), Range::Inactive);
        assert_eq!(ed.selection().copy_range(), Range::Inactive);
    }

    #[test]
    fn test_paste_internal_clamps_and_clamps_drag() {
        let mut ed = editor(&[&["a", "b", ""]]);
        ed.selection.set_drag(Range::from_rect(Rect::new(0, 0, 0, 1)));
        ed.copy(false);
        ed.selection.click(Position::new(0, 2));
        ed.paste("");

        assert_eq!(row(&ed, 0), vec!["a", "b", "a"]);
        assert_eq!(ed.selection().drag_rect(), Some(Rect::new(0, 2, 0, 2)));
    }

    #[test]
    fn test_paste_text_tiles_by_grid_position() {
        let mut ed = editor(&[&["", "", "", "", ""]]);
        ed.selection.set_drag(Range::from_rect(Rect::new(0, 1, 0, 4)));
        ed.paste("x\ty");

        assert_eq!(row(&ed, 0), vec!["", "y", "x", "y", "x"]);
    }

    #[test]
    fn test_paste_text_tiling_off_origin_drag() {
        let mut ed = editor(&[&["", ""], &["", ""], &["", ""]]);
        ed.selection.click(Position::new(1, 0));
        ed.selection.extend_drag(1, 1);
        ed.paste("a\tb\nc\td");

        assert_eq!(ed.grid().to_tsv(), "\t\nc\td\na\tb");
    }

    #[test]
    fn test_paste_ragged_text_leaves_missing_cells() {
        let mut ed = editor(&[&["0", "0"], &["0", "0"]]);
        ed.selection.select_all();
        ed.paste("a\tb\nc");

        assert_eq!(row(&ed, 0), vec!["a", "b"]);
        assert_eq!(row(&ed, 1), vec!["c", "0"]);
    }

    #[test]
    fn test_overlapping_paste_reads_pre_paste_snapshot() {
        let mut ed = editor(&[&["a", "b", "", ""]]);
        ed.selection.set_drag(Range::from_rect(Rect::new(0, 0, 0, 1)));
        ed.copy(false);
        ed.selection.click(Position::new(0, 1));
        ed.paste("");

        assert_eq!(row(&ed, 0), vec!["a", "a", "b", ""]);
    }

    #[test]
    fn test_paste_without_pointed_is_noop() {
        let mut ed = editor(&[&["a"]]);
        ed.selection.blur();
        ed.paste("z");
        assert_eq!(ed.grid().revision(), 0);
    }

    #[test]
    fn test_paste_resets_cutting() {
        let mut ed = editor(&[&["a", ""]]);
        ed.cut();
        ed.selection.point_at(Position::new(0, 1));
        ed.paste("");
        assert!(!ed.selection().is_cutting());

        // A second paste is a plain text paste and clears nothing.
        ed.selection.click(Position::new(0, 0));
        ed.paste("q");
        assert_eq!(row(&ed, 0), vec!["q", "a"]);
    }
}
