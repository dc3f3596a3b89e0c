//! CLI Exit Code Registry
//!
//! Single source of truth for `pgrid` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (invalid grid, empty clipboard)  |
//! | 2    | Usage error (bad arguments)                    |
//! | 3    | I/O error (unreadable input, unwritable output)|
//! | 4    | Script parse error                             |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - the input parsed but could not be used.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
/// clap exits with this code on its own parse failures.
pub const EXIT_USAGE: u8 = 2;

/// Reading the grid/script or writing the output failed.
pub const EXIT_IO: u8 = 3;

/// The command script contains a line that is not a command.
pub const EXIT_SCRIPT_PARSE: u8 = 4;
