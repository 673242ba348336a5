//! Parse the inputs and report on them.
//!
//! Files are read and parsed in parallel; everything written afterwards
//! follows the order the files were named in.

use std::io::{self, IsTerminal, Write};

use rayon::prelude::*;
use shade_diagnostic::{Diagnostic, DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use shade_ir::SourceFile;
use shade_parse::{ParseResult, ParserOptions};
use tracing::{debug, info};

use crate::{CliError, CliOptions, OutputFormat};

/// Overall result of a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Success,
    /// Some file had an error or could not be read.
    Failure,
}

/// One input after parsing.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: String,
    pub parsed: Result<ParseResult, CliError>,
}

/// Parse `content` as the file `path`.
pub fn parse_source(path: &str, content: String, options: ParserOptions) -> ParseResult {
    let file = SourceFile::shared(path, content);
    let result = shade_parse::parse_with_options(&file, options);
    debug!(
        path,
        errors = result.diagnostics.error_count(),
        warnings = result.diagnostics.warning_count(),
        "parsed"
    );
    result
}

fn parse_file(path: &str, options: ParserOptions) -> Result<ParseResult, CliError> {
    let content = std::fs::read_to_string(path).map_err(|error| CliError::read(path, error))?;
    Ok(parse_source(path, content, options))
}

/// Read and parse every file. Results are in the same order as `files`.
pub fn parse_files(files: &[String], options: ParserOptions) -> Vec<FileOutcome> {
    files
        .par_iter()
        .map(|path| FileOutcome {
            path: path.clone(),
            parsed: parse_file(path, options),
        })
        .collect()
}

/// Run a check over the files named in `options`, writing to the process's
/// stdout and stderr.
pub fn run(options: &CliOptions) -> Result<Status, CliError> {
    info!(files = options.files.len(), "checking");
    let outcomes = parse_files(&options.files, options.parser);
    let is_tty = io::stderr().is_terminal();
    report(
        options,
        &outcomes,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
        is_tty,
    )
}

/// Write diagnostics and reprinted programs for `outcomes`.
///
/// Text diagnostics and read failures go to `err`; JSON diagnostics and
/// `--print` output go to `out`.
pub fn report<O: Write, E: Write>(
    options: &CliOptions,
    outcomes: &[FileOutcome],
    out: &mut O,
    err: &mut E,
    is_tty: bool,
) -> Result<Status, CliError> {
    let mut totals = Totals::default();
    match options.format {
        OutputFormat::Text => {
            for outcome in outcomes {
                let Some(result) = totals.record(outcome, err)? else {
                    continue;
                };
                let mut emitter =
                    TerminalEmitter::with_color_mode(&mut *err, options.color, is_tty);
                for diagnostic in result.diagnostics.iter().filter(|d| shown(options, d)) {
                    emitter.emit(diagnostic);
                }
                emitter.flush();

                if options.print && !result.has_error() {
                    shade_fmt::write_program(&result.program, &mut *out)?;
                }
            }
            if !options.quiet {
                let mut emitter =
                    TerminalEmitter::with_color_mode(&mut *err, options.color, is_tty);
                emitter.emit_summary(totals.errors, totals.warnings);
                emitter.flush();
            }
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(&mut *out);
            emitter.begin();
            for outcome in outcomes {
                let Some(result) = totals.record(outcome, err)? else {
                    continue;
                };
                for diagnostic in result.diagnostics.iter().filter(|d| shown(options, d)) {
                    emitter.emit(diagnostic);
                }
            }
            emitter.end();
            emitter.flush();
        }
    }

    debug!(
        errors = totals.errors,
        warnings = totals.warnings,
        unreadable = totals.unreadable,
        "report finished"
    );
    if totals.unreadable || totals.errors > 0 {
        Ok(Status::Failure)
    } else {
        Ok(Status::Success)
    }
}

fn shown(options: &CliOptions, diagnostic: &Diagnostic) -> bool {
    !options.quiet || diagnostic.is_error()
}

#[derive(Default)]
struct Totals {
    errors: usize,
    warnings: usize,
    unreadable: bool,
}

impl Totals {
    /// Count `outcome`, reporting a read failure to `err` as it goes.
    fn record<'a, E: Write>(
        &mut self,
        outcome: &'a FileOutcome,
        err: &mut E,
    ) -> Result<Option<&'a ParseResult>, CliError> {
        match &outcome.parsed {
            Ok(result) => {
                self.errors += result.diagnostics.error_count();
                self.warnings += result.diagnostics.warning_count();
                Ok(Some(result))
            }
            Err(error) => {
                writeln!(err, "error: {error}")?;
                self.unreadable = true;
                Ok(None)
            }
        }
    }
}
