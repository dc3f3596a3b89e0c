// pgrid - replay selection/clipboard command scripts against a TSV grid

mod exit_codes;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use pastegrid_cli::input::parse_grid;
use pastegrid_cli::script::{parse_script, Step};
use pastegrid_cli::state::SessionState;
use pastegrid_cli::table;
use pastegrid_config::{ClipboardBackend, Settings};
use pastegrid_engine::{ClipboardError, ClipboardService, Editor, Grid, MemoryClipboard};

use exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_SCRIPT_PARSE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "pgrid")]
#[command(about = "Grid selection, clipboard and paste-tiling engine (headless)")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log command dispatch and paste decisions to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command script against a TSV grid and print the result
    #[command(after_help = "\
Examples:
  pgrid replay data.tsv moves.txt
  pgrid replay data.tsv moves.txt -o out.tsv
  pgrid replay data.tsv copy-block.txt --clipboard
  pgrid replay data.tsv moves.txt --json

Script lines (# starts a comment):
  click B2 | select B2 [break] | move 0 1 [break] | extend 1 1
  drag-start A1 | drag-enter C3 | drag-end | select-row 2 | select-column B
  select-all | write TEXT | copy | cut | paste [TEXT] | paste-clipboard
  clear | escape | blur | tick")]
    Replay {
        /// Grid file (tab-separated, one row per line)
        grid: PathBuf,

        /// Command script
        script: PathBuf,

        /// Write the resulting grid here instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the final clipboard text instead of the grid
        #[arg(long, conflicts_with = "json")]
        clipboard: bool,

        /// Print the final session (cells, extents, selection, marks) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a TSV grid as an aligned table
    Show {
        /// Grid file (tab-separated, one row per line)
        grid: PathBuf,
    },

    /// Print the effective settings as JSON
    #[command(after_help = "\
Examples:
  pgrid config
  pgrid config --path
  pgrid --config ./settings.json config --init")]
    Config {
        /// Print the settings file path only
        #[arg(long, conflicts_with = "init")]
        path: bool,

        /// Write the effective settings to the settings file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn script(msg: impl Into<String>) -> Self {
        Self { code: EXIT_SCRIPT_PARSE, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too
            let code = if e.use_stderr() { EXIT_USAGE } else { EXIT_SUCCESS };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    let result = match cli.command {
        Commands::Replay { grid, script, output, clipboard, json } => {
            let format = if clipboard {
                ReplayOutput::Clipboard
            } else if json {
                ReplayOutput::Json
            } else {
                ReplayOutput::Grid
            };
            cmd_replay(&settings, &grid, &script, output.as_deref(), format)
        }
        Commands::Show { grid } => cmd_show(&settings, &grid),
        Commands::Config { path, init } => {
            cmd_config(&settings, cli.config.as_deref(), path, init)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplayOutput {
    Grid,
    Clipboard,
    Json,
}

fn cmd_replay(
    settings: &Settings,
    grid_path: &Path,
    script_path: &Path,
    output: Option<&Path>,
    format: ReplayOutput,
) -> Result<(), CliError> {
    let grid = load_grid(settings, grid_path)?;

    let script_text = fs::read_to_string(script_path)
        .map_err(|e| CliError::io(format!("{}: {}", script_path.display(), e)))?;
    let steps = parse_script(&script_text).map_err(|e| {
        CliError::script(format!("{}: {}", script_path.display(), e))
            .with_hint("run `pgrid replay --help` for the script syntax")
    })?;

    let delay = settings.refocus_delay();
    let mut editor = Editor::with_clipboard(grid, open_clipboard(settings.clipboard_backend))
        .with_refocus_delay(delay);

    log::debug!("replaying {} steps from {}", steps.len(), script_path.display());
    for step in steps {
        match step {
            Step::Run(command) => editor.dispatch(command),
            Step::Tick => {
                editor.tick(Instant::now() + delay);
            }
        }
    }

    let text = match format {
        ReplayOutput::Grid => editor.grid().to_tsv(),
        ReplayOutput::Clipboard => match editor.clipboard_mut().read_text() {
            Ok(text) => text,
            Err(ClipboardError::Empty) => {
                return Err(CliError::general("clipboard is empty")
                    .with_hint("the script never ran `copy` or `cut`"));
            }
            Err(e) => return Err(CliError::general(e.to_string())),
        },
        ReplayOutput::Json => serde_json::to_string_pretty(&SessionState::capture(&editor))
            .map_err(|e| CliError::general(e.to_string()))?,
    };

    write_output(output, &text)
}

fn cmd_show(settings: &Settings, grid_path: &Path) -> Result<(), CliError> {
    let grid = load_grid(settings, grid_path)?;
    print!("{}", table::render(grid.matrix()));
    Ok(())
}

fn cmd_config(
    settings: &Settings,
    config: Option<&Path>,
    print_path: bool,
    init: bool,
) -> Result<(), CliError> {
    let display = match config {
        Some(path) => path.display().to_string(),
        None => Settings::config_path_display(),
    };

    if print_path {
        println!("{}", display);
        return Ok(());
    }

    if init {
        let saved = match config {
            Some(path) => settings.save_to(path),
            None => settings.save(),
        };
        saved.map_err(|e| CliError::io(format!("{}: {}", display, e)))?;
        eprintln!("wrote {}", display);
        return Ok(());
    }

    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| CliError::general(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn load_grid(settings: &Settings, path: &Path) -> Result<Grid, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?;
    parse_grid(&text, &settings.default_row_height, &settings.default_column_width)
        .map_err(|e| CliError::general(format!("{}: {}", path.display(), e)))
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, format!("{}\n", text))
            .map_err(|e| CliError::io(format!("{}: {}", path.display(), e))),
        None => {
            println!("{}", text);
            Ok(())
        }
    }
}

fn open_clipboard(backend: ClipboardBackend) -> Box<dyn ClipboardService> {
    match backend {
        ClipboardBackend::Memory => Box::new(MemoryClipboard::new()),
        ClipboardBackend::System => system_clipboard(),
    }
}

#[cfg(feature = "system-clipboard")]
fn system_clipboard() -> Box<dyn ClipboardService> {
    Box::new(pastegrid_engine::SystemClipboard)
}

#[cfg(not(feature = "system-clipboard"))]
fn system_clipboard() -> Box<dyn ClipboardService> {
    log::warn!("built without the system-clipboard feature; using the in-memory clipboard");
    Box::new(MemoryClipboard::new())
}
