// Command scripts for `pgrid replay`
//
// One command per line. Blank lines and lines starting with # are skipped.
// Cells are A1 references, rows in select-row are 1-based, columns in
// select-column are letters. `write` and `paste` take the rest of the line
// as text, with \t, \n, \r and \\ escapes.
//
//   click B2
//   move 0 1 break
//   extend 1 1
//   copy
//   click D4
//   paste
//   tick

use std::fmt;

use pastegrid_core::{letter_to_col, parse_cell_ref};
use pastegrid_engine::Command;

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Run(Command),
    /// Let the refocus delay elapse.
    Tick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ScriptError {}

pub fn parse_script(text: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let step = parse_line(trimmed).map_err(|message| ScriptError { line: idx + 1, message })?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<Step, String> {
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb {
        "tick" => {
            expect_args(verb, &args, 0)?;
            return Ok(Step::Tick);
        }
        "click" => {
            expect_args(verb, &args, 1)?;
            let (row, col) = cell(args[0])?;
            Command::Click { row, col }
        }
        "drag-start" => {
            expect_args(verb, &args, 1)?;
            let (row, col) = cell(args[0])?;
            Command::DragStart { row, col }
        }
        "drag-enter" => {
            expect_args(verb, &args, 1)?;
            let (row, col) = cell(args[0])?;
            Command::DragEnter { row, col }
        }
        "drag-end" => bare(verb, &args, Command::DragEnd)?,
        "select-row" => {
            expect_args(verb, &args, 1)?;
            let row: usize = args[0]
                .parse()
                .ok()
                .filter(|r| *r > 0)
                .ok_or_else(|| format!("invalid row number '{}'", args[0]))?;
            Command::SelectRow(row - 1)
        }
        "select-column" => {
            expect_args(verb, &args, 1)?;
            let col = letter_to_col(args[0])
                .ok_or_else(|| format!("invalid column '{}'", args[0]))?;
            Command::SelectColumn(col)
        }
        "select" => {
            let breaking = break_flag(verb, &args, 1)?;
            let (row, col) = cell(args[0])?;
            Command::Select { row: row as isize, col: col as isize, breaking }
        }
        "move" => {
            let breaking = break_flag(verb, &args, 2)?;
            Command::Move { d_row: delta(args[0])?, d_col: delta(args[1])?, breaking }
        }
        "extend" => {
            expect_args(verb, &args, 2)?;
            Command::ExtendDrag { d_row: delta(args[0])?, d_col: delta(args[1])? }
        }
        "select-all" => bare(verb, &args, Command::SelectAll)?,
        "write" => Command::Write(unescape(rest)?),
        "copy" => bare(verb, &args, Command::Copy)?,
        "cut" => bare(verb, &args, Command::Cut)?,
        "paste" => Command::Paste(unescape(rest)?),
        "paste-clipboard" => bare(verb, &args, Command::PasteFromClipboard)?,
        "clear" => bare(verb, &args, Command::Clear)?,
        "escape" => bare(verb, &args, Command::Escape)?,
        "blur" => bare(verb, &args, Command::Blur)?,
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(Step::Run(command))
}

fn expect_args(verb: &str, args: &[&str], count: usize) -> Result<(), String> {
    if args.len() == count {
        Ok(())
    } else {
        Err(format!("'{}' takes {} argument(s), got {}", verb, count, args.len()))
    }
}

fn bare(verb: &str, args: &[&str], command: Command) -> Result<Command, String> {
    expect_args(verb, args, 0)?;
    Ok(command)
}

/// `count` positional args plus an optional trailing `break`.
fn break_flag(verb: &str, args: &[&str], count: usize) -> Result<bool, String> {
    match args.len() {
        n if n == count => Ok(false),
        n if n == count + 1 && args[count] == "break" => Ok(true),
        n if n == count + 1 => Err(format!("expected 'break', got '{}'", args[count])),
        n => Err(format!(
            "'{}' takes {} argument(s) and an optional 'break', got {}",
            verb, count, n
        )),
    }
}

fn cell(text: &str) -> Result<(usize, usize), String> {
    parse_cell_ref(text).ok_or_else(|| format!("invalid cell reference '{}'", text))
}

fn delta(text: &str) -> Result<isize, String> {
    text.parse().map_err(|_| format!("invalid offset '{}'", text))
}

fn unescape(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => return Err(format!("unknown escape '\\{}'", other)),
            None => return Err("trailing backslash".to_string()),
        }
    }
    Ok(out)
}
