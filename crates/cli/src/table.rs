// Aligned table rendering for `pgrid show`

use pastegrid_core::col_to_letter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Cells wider than this are truncated with "..".
pub const MAX_COL_WIDTH: usize = 40;

/// Render rows under A/B/C headers with a 1-based row gutter.
/// Widths use display columns so CJK and emoji stay aligned.
pub fn render(rows: &[Vec<String>]) -> String {
    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let gutter = rows.len().to_string().len();

    let widths: Vec<usize> = (0..cols)
        .map(|col| {
            let header = col_to_letter(col).len();
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| UnicodeWidthStr::width(cell.as_str()))
                .fold(header, usize::max)
                .min(MAX_COL_WIDTH)
        })
        .collect();

    let mut out = String::new();
    let mut line = " ".repeat(gutter);
    for (col, width) in widths.iter().enumerate() {
        line.push_str("  ");
        line.push_str(&pad_right(&col_to_letter(col), *width));
    }
    push_line(&mut out, &line);

    for (idx, row) in rows.iter().enumerate() {
        let mut line = format!("{:>gutter$}", idx + 1, gutter = gutter);
        for (col, width) in widths.iter().enumerate() {
            let cell = row.get(col).map(String::as_str).unwrap_or("");
            line.push_str("  ");
            line.push_str(&pad_right(cell, *width));
        }
        push_line(&mut out, &line);
    }
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Pad to exactly `width` display columns, truncating with ".." if longer.
fn pad_right(s: &str, width: usize) -> String {
    let sw = UnicodeWidthStr::width(s);
    if sw <= width {
        return format!("{}{}", s, " ".repeat(width - sw));
    }

    let budget = width.saturating_sub(2);
    let mut used = 0;
    let mut truncated = String::new();
    for ch in s.chars() {
        let cw = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        truncated.push(ch);
    }
    truncated.push_str("..");
    used += 2;
    if used < width {
        truncated.push_str(&" ".repeat(width - used));
    }
    truncated
}
