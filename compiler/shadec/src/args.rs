//! Command line parsing.
//!
//! Flags take their value after `=` (`--max-errors=10`). Anything that does
//! not start with `-`, and everything after `--`, is an input file.

use shade_diagnostic::ColorMode;
use shade_parse::ParserOptions;

use crate::CliError;

/// What the invocation asks for.
#[derive(Debug, PartialEq)]
pub enum Command {
    Check(CliOptions),
    Help,
    Version,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Caret diagnostics on stderr.
    #[default]
    Text,
    /// One JSON array of diagnostics on stdout.
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CliOptions {
    pub files: Vec<String>,
    pub parser: ParserOptions,
    pub format: OutputFormat,
    pub color: ColorMode,
    /// Reprint every file that parsed without errors.
    pub print: bool,
    /// Report errors only, and no summary line.
    pub quiet: bool,
}

pub const USAGE: &str = "\
Usage: shadec [options] <file>...

Parses each file and reports syntax errors.

Options:
  --max-errors=N         Stop a file after N errors (default: 25)
  --max-depth=N          Maximum expression nesting (default: 128)
  --format=text|json     Diagnostic output format (default: text)
  --color=auto|always|never
                         Colored diagnostics (default: auto)
  --print                Print each file back out in canonical form
  -q, --quiet            Report errors only
  -h, --help             Show this help message
  -V, --version          Show the version

Environment:
  SHADE_LOG=<filter>     Enable logging, e.g. SHADE_LOG=shade_parse=debug
  SHADE_LOG_TREE=1       Log as an indented call tree";

/// Parse the arguments after the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Command, CliError> {
    let mut options = CliOptions::default();
    let mut only_files = false;

    for arg in args {
        let arg = arg.as_ref();
        if only_files || !arg.starts_with('-') {
            options.files.push(arg.to_string());
            continue;
        }
        match arg {
            "--" => only_files = true,
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--print" => options.print = true,
            "-q" | "--quiet" => options.quiet = true,
            _ => {
                let Some((name, value)) = arg.split_once('=') else {
                    return Err(CliError::UnknownOption(arg.to_string()));
                };
                match name {
                    "--max-errors" => options.parser.max_errors = positive(name, value)?,
                    "--max-depth" => options.parser.max_depth = positive(name, value)?,
                    "--format" => {
                        options.format = OutputFormat::from_name(value)
                            .ok_or_else(|| invalid(name, value))?;
                    }
                    "--color" => {
                        options.color =
                            ColorMode::from_name(value).ok_or_else(|| invalid(name, value))?;
                    }
                    _ => return Err(CliError::UnknownOption(name.to_string())),
                }
            }
        }
    }

    if options.files.is_empty() {
        return Err(CliError::NoInput);
    }
    if options.print && options.format == OutputFormat::Json {
        return Err(CliError::Conflict {
            first: "--print",
            second: "--format=json",
        });
    }
    Ok(Command::Check(options))
}

fn invalid(option: &str, value: &str) -> CliError {
    CliError::InvalidValue {
        option: option.to_string(),
        value: value.to_string(),
    }
}

/// A count of at least one.
fn positive<T: std::str::FromStr + PartialOrd + Default>(
    option: &str,
    value: &str,
) -> Result<T, CliError> {
    match value.parse::<T>() {
        Ok(n) if n > T::default() => Ok(n),
        _ => Err(invalid(option, value)),
    }
}
