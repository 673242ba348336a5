//! Shade Formatter
//!
//! Prints a parsed [`Program`] back out as canonical source text.
//!
//! The output is a fixed point: parsing it and printing again gives the same
//! text. Comments and the original layout are not preserved, and `for`
//! loops come back in the `loop` form the parser lowers them to.
//!
//! # Modules
//!
//! - [`emitter`]: where text goes (a `String` or any `io::Write`)
//! - [`context`]: indentation state
//! - [`printer`]: the tree walk

pub mod context;
pub mod emitter;
pub mod printer;

use std::io;

use shade_ir::Program;

pub use context::FormatContext;
pub use emitter::{Emitter, StringEmitter, WriterEmitter, INDENT_WIDTH};
pub use printer::Printer;

/// Print every global declaration of `program`.
///
/// An empty program prints as the empty string; anything else ends in a
/// single newline.
pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::new(program);
    printer.print_module();
    printer.into_context().finalize()
}

/// Stream `program` to `writer`.
///
/// # Errors
///
/// Returns the first error `writer` reports.
pub fn write_program<W: io::Write>(program: &Program, writer: W) -> io::Result<W> {
    let ctx = FormatContext::with_emitter(WriterEmitter::new(writer));
    let mut printer = Printer::with_context(program, ctx);
    printer.print_module();
    printer.into_context().into_emitter().finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
