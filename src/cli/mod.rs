//! CLI module for the Cadence syntax front end
//!
//! This module provides the command-line interface for the lexer and declaration parser.
//!
//! ## Commands
//!
//! - `tokens <file>` - Print the token stream
//! - `parse <file>` - Print the parsed declarations
//! - `check <file>` - Parse and report errors only
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Input was unreadable or not valid Cadence syntax.
    pub const INVALID_INPUT: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Lexer and declaration parser for the Cadence smart contract language
#[derive(Parser, Debug)]
#[command(name = "cadence")]
#[command(version = VERSION)]
#[command(about = "Lexer and declaration parser for the Cadence smart contract language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream, one token per line
    Tokens {
        /// Source file to tokenize
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the parsed declarations
    Parse {
        /// Source file to parse
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print only the declaration kinds and their source ranges
        #[arg(short, long)]
        summary: bool,
    },

    /// Parse a file and report errors and warnings only
    Check {
        /// Source files to check
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
        /// Treat string literal warnings as errors
        #[arg(long)]
        deny_warnings: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Some(Command::Tokens { file }) => commands::lex_file(&file.to_string_lossy()),
        Some(Command::Parse { file, summary }) => commands::parse_file(&file.to_string_lossy(), summary),
        Some(Command::Check { files, deny_warnings }) => {
            // Keep going after a failing file so every file gets reported
            let mut failed = 0;
            for file in &files {
                if let Err(e) = commands::check_file(&file.to_string_lossy(), deny_warnings) {
                    eprintln!("{}", e.message);
                    failed += 1;
                }
            }
            if failed == 0 {
                Ok(ExitCode::SUCCESS)
            } else {
                Err(CliError::new(
                    format!("{failed} of {} file(s) failed to check", files.len()),
                    ExitCode::INVALID_INPUT,
                ))
            }
        }
        None => {
            // Default: check the file if provided
            if let Some(file) = cli.file {
                commands::check_file(&file.to_string_lossy(), false)
            } else {
                // No command and no file - show help
                Err(CliError::new(
                    "error: no input file (run `cadence --help` for usage)",
                    ExitCode::FAILURE,
                ))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
