//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;

use cadence_core::limits::MAX_SOURCE_SIZE;
use cadence_syntax::ast::{Access, Declaration, Program, Span};
use cadence_syntax::lexer::{self, Token};
use cadence_syntax::parser;
use miette::{Diagnostic, NamedSource, Report};

use super::{CliError, CliResult, ExitCode};

// ============================================================================
// Source loading and rendering
// ============================================================================

/// Read a source file, with size validation.
///
/// ## Errors
/// - The file cannot be accessed or is not valid UTF-8
/// - The file exceeds [`MAX_SOURCE_SIZE`]
pub fn read_source(file_path: &str) -> CliResult<String> {
    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::new(
            format!(
                "Source file '{}' is too large ({} bytes, max {} bytes)",
                file_path,
                metadata.len(),
                MAX_SOURCE_SIZE
            ),
            ExitCode::INVALID_INPUT,
        ));
    }

    fs::read_to_string(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Render diagnostics as miette reports pointing into `source`.
pub fn render_diagnostics<D>(file_path: &str, source: &str, diagnostics: impl IntoIterator<Item = D>) -> String
where
    D: Diagnostic + Send + Sync + 'static,
{
    let mut msg = String::new();
    for diagnostic in diagnostics {
        let report =
            Report::new(diagnostic).with_source_code(NamedSource::new(file_path, source.to_string()));
        msg.push_str(&format!("{report:?}\n"));
    }
    msg
}

/// Lex `source`, turning lexical errors into a rendered [`CliError`].
pub fn lex_source(file_path: &str, source: &str) -> CliResult<Vec<Token>> {
    lexer::lex(source).map_err(|errs| {
        let msg = render_diagnostics(file_path, source, errs);
        CliError::new(msg.trim_end(), ExitCode::INVALID_INPUT)
    })
}

/// Lex and parse `source`, turning the first fatal error into a rendered [`CliError`].
pub fn parse_source(file_path: &str, source: &str) -> CliResult<Program> {
    let tokens = lex_source(file_path, source)?;
    parser::parse(&tokens).map_err(|err| {
        tracing::debug!(internal = err.is_internal(), "parse failed");
        let msg = render_diagnostics(file_path, source, [err]);
        CliError::new(msg.trim_end(), ExitCode::INVALID_INPUT)
    })
}

/// Print the soft diagnostics of a parsed program to stderr and return how many there were.
fn report_warnings(file_path: &str, source: &str, program: &Program) -> usize {
    if !program.diagnostics.is_empty() {
        let msg = render_diagnostics(file_path, source, program.diagnostics.iter().cloned());
        eprintln!("{}", msg.trim_end());
    }
    program.diagnostics.len()
}

// ============================================================================
// Commands
// ============================================================================

/// Print the token stream, one `line:column<TAB>token` per line.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lex_source(file_path, &source)?;

    for tok in &tokens {
        println!("{}\t{}", tok.span.start, tok.kind);
    }
    Ok(ExitCode::SUCCESS)
}

/// Print the parsed declarations, either as the full AST or as one summary line per declaration.
pub fn parse_file(file_path: &str, summary: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let program = parse_source(file_path, &source)?;
    report_warnings(file_path, &source, &program);

    if summary {
        for decl in &program.declarations {
            println!("{}", summary_line(&decl.node, decl.span));
        }
    } else {
        println!("{:#?}", program.declarations);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse a file and report the outcome.
///
/// With `deny_warnings`, string literal warnings make the check fail.
pub fn check_file(file_path: &str, deny_warnings: bool) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let program = parse_source(file_path, &source)?;
    let warnings = report_warnings(file_path, &source, &program);

    if deny_warnings && warnings > 0 {
        return Err(CliError::new(
            format!("{file_path}: {warnings} warning(s) treated as errors"),
            ExitCode::INVALID_INPUT,
        ));
    }

    println!(
        "✓ {file_path}: {} declaration(s), {warnings} warning(s)",
        program.declarations.len()
    );
    Ok(ExitCode::SUCCESS)
}

/// `kind  start-end  [access]` for one declaration.
fn summary_line(decl: &Declaration, span: Span) -> String {
    let mut line = format!("{:<8}{}-{}", decl.kind_name(), span.start, span.end);
    if let Some(access) = decl.access().map(Access::keyword).filter(|k| !k.is_empty()) {
        line.push_str("  ");
        line.push_str(access);
    }
    line
}
