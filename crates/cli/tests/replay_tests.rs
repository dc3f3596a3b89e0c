// End-to-end tests for the `pgrid` binary.
// Run with: cargo test -p pastegrid-cli --test replay_tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        // Keep tests away from the user's real settings file.
        fs::write(dir.path().join("settings.json"), "{}").unwrap();
        Self { dir }
    }

    fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn pgrid(&self, args: &[&str]) -> Output {
        self.pgrid_with_config(&self.path("settings.json"), args)
    }

    fn pgrid_with_config(&self, config: &Path, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_pgrid"))
            .arg("--config")
            .arg(config)
            .args(args)
            .output()
            .expect("run pgrid")
    }
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ---------------------------------------------------------------------------
// replay: grid output
// ---------------------------------------------------------------------------

#[test]
fn replay_cut_moves_block() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "a\tb\t\t\n\t\t\t\n\t\t\t\n");
    let script = ws.file(
        "moves.txt",
        "# cut A1:B1 and drop it at C3\nclick A1\nextend 0 1\ncut\nclick C3\npaste\n",
    );

    let output = ws.pgrid(&["replay", arg(&grid), arg(&script)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "\t\t\t\n\t\t\t\n\t\ta\tb\n");
}

#[test]
fn replay_tiles_internal_copy_over_drag() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "a\tb\t\t\t\n");
    let script = ws.file("tile.txt", "click A1\nextend 0 1\ncopy\nclick A1\nextend 0 4\npaste\n");

    let output = ws.pgrid(&["replay", arg(&grid), arg(&script)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "a\tb\ta\tb\ta\n");
}

#[test]
fn replay_writes_output_file() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "\t\n\t\n");
    let script = ws.file("paste.txt", "paste x\\ty\\nz\\tw\n");
    let out = ws.path("out.tsv");

    let output = ws.pgrid(&["replay", arg(&grid), arg(&script), "-o", arg(&out)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "");
    assert_eq!(fs::read_to_string(&out).unwrap(), "x\ty\nz\tw\n");
}

#[test]
fn replay_clear_blanks_pointed_cell() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "a\tb\nc\td\n");
    let script = ws.file("clear.txt", "click B2\nclear\nclick A1\nwrite new\n");

    let output = ws.pgrid(&["replay", arg(&grid), arg(&script)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "new\tb\nc\t\n");
}

#[test]
fn replay_ignores_move_past_isize_range() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "a\tb\nc\td\n");
    let script = ws.file("far.txt", "click B1\nmove 0 9223372036854775807\nwrite x\n");

    let output = ws.pgrid(&["replay", arg(&grid), arg(&script)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "a\tx\nc\td\n");
}

// ---------------------------------------------------------------------------
// replay: clipboard output
// ---------------------------------------------------------------------------

#[test]
fn replay_prints_clipboard() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "a\tb\nc\td\n");
    let script = ws.file("copy.txt", "select-all\ncopy\ntick\n");

    let output = ws.pgrid(&["replay", arg(&grid), arg(&script), "--clipboard"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "a\tb\nc\td\n");
}

#[test]
fn replay_empty_clipboard_is_an_error() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "a\n");
    let script = ws.file("noop.txt", "# nothing\n");

    let output = ws.pgrid(&["replay", arg(&grid), arg(&script), "--clipboard"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("clipboard is empty"));
}

// ---------------------------------------------------------------------------
// replay: session JSON
// ---------------------------------------------------------------------------

#[test]
fn replay_json_reports_selection_and_marks() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "a\tb\nc\td\n");
    let script = ws.file("copy.txt", "click A2\nextend 0 1\ncopy\n");

    let output = ws.pgrid(&["replay", arg(&grid), arg(&script), "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let state: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(state["pointed"], "A2");
    assert_eq!(state["copy"]["state"], "active");
    assert_eq!(state["cutting"], false);
    assert_eq!(state["heights"], serde_json::json!(["24px", "24px"]));

    let marked: Vec<&str> = state["marked"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["cell"].as_str().unwrap())
        .collect();
    assert_eq!(marked, vec!["A2", "B2"]);
    assert_eq!(state["marked"][1]["clip"], "copying");
}

#[test]
fn replay_json_and_clipboard_conflict() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "a\n");
    let script = ws.file("s.txt", "copy\n");

    let output = ws.pgrid(&["replay", arg(&grid), arg(&script), "--json", "--clipboard"]);

    assert_eq!(output.status.code(), Some(2));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_init_writes_loadable_settings() {
    let ws = Workspace::new();
    let path = ws.path("nested").join("settings.json");

    let output = ws.pgrid_with_config(&path, &["config", "--init"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(path.exists());

    let output = ws.pgrid_with_config(&path, &["config"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let settings: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(settings["clipboard.backend"], "memory");
    assert_eq!(settings["clipboard.refocusDelayMs"], 100);
}

#[test]
fn config_path_prints_explicit_path() {
    let ws = Workspace::new();
    let path = ws.path("settings.json");

    let output = ws.pgrid(&["config", "--path"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim_end(), arg(&path));
}

// ---------------------------------------------------------------------------
// exit codes
// ---------------------------------------------------------------------------

#[test]
fn script_parse_error_exits_4() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "a\n");
    let script = ws.file("bad.txt", "click A1\nteleport B2\n");

    let output = ws.pgrid(&["replay", arg(&grid), arg(&script)]);

    assert_eq!(output.status.code(), Some(4));
    let err = stderr(&output);
    assert!(err.contains("line 2: unknown command 'teleport'"), "stderr: {}", err);
    assert!(err.contains("hint:"));
}

#[test]
fn missing_grid_exits_3() {
    let ws = Workspace::new();
    let script = ws.file("s.txt", "copy\n");
    let missing = ws.path("missing.tsv");

    let output = ws.pgrid(&["replay", arg(&missing), arg(&script)]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("missing.tsv"));
}

#[test]
fn empty_grid_exits_1() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "");

    let output = ws.pgrid(&["show", arg(&grid)]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn bad_arguments_exit_2() {
    let ws = Workspace::new();
    let output = ws.pgrid(&["replay"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn help_exits_0() {
    let ws = Workspace::new();
    let output = ws.pgrid(&["replay", "--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Script lines"));
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

#[test]
fn show_prints_aligned_table() {
    let ws = Workspace::new();
    let grid = ws.file("grid.tsv", "name\tqty\nwidget\t3\n");

    let output = ws.pgrid(&["show", arg(&grid)]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "   A       B\n1  name    qty\n2  widget  3\n");
}
