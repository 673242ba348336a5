//! The `shadec` driver.
//!
//! Reads shader sources, runs them through `shade_parse`, and reports the
//! diagnostics. Optionally reprints each program in canonical form.

mod args;
mod driver;
mod error;
mod logging;

pub use args::{parse_args, CliOptions, Command, OutputFormat, USAGE};
pub use driver::{parse_files, parse_source, report, run, FileOutcome, Status};
pub use error::CliError;
pub use logging::init_tracing;
