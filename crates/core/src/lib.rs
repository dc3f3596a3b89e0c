pub mod labels;
pub mod range;

pub use labels::{cell_ref, col_to_letter, letter_to_col, parse_cell_ref};
pub use range::{Position, Range, Rect};
