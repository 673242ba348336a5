//! Diagnostic entries and the append-only list a parse reports into.

use std::fmt;
use std::sync::Arc;

use shade_ir::{Range, Source, SourceFile};

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Severity {
    Note,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// Errors and fatal errors make a parse fail; notes and warnings never do.
    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error | Severity::Fatal)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => write!(f, "note"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// One reported problem.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub source: Source,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, source: Source, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            source,
            message: message.into(),
        }
    }

    pub fn error(source: Source, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, source, message)
    }

    pub fn warning(source: Source, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, source, message)
    }

    pub fn note(source: Source, message: impl Into<String>) -> Self {
        Self::new(Severity::Note, source, message)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.source.range
    }

    pub fn file(&self) -> Option<&Arc<SourceFile>> {
        self.source.file.as_ref()
    }
}

/// Ordered, append-only diagnostic sink with a running error count.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagnosticList {
    entries: Vec<Diagnostic>,
    error_count: usize,
}

impl DiagnosticList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diag: Diagnostic) {
        if diag.is_error() {
            self.error_count += 1;
        }
        self.entries.push(diag);
    }

    pub fn add_error(&mut self, source: Source, message: impl Into<String>) {
        self.add(Diagnostic::error(source, message));
    }

    pub fn add_warning(&mut self, source: Source, message: impl Into<String>) {
        self.add(Diagnostic::warning(source, message));
    }

    pub fn add_note(&mut self, source: Source, message: impl Into<String>) {
        self.add(Diagnostic::note(source, message));
    }

    /// Append every entry of `other`, preserving order.
    pub fn extend(&mut self, other: DiagnosticList) {
        self.error_count += other.error_count;
        self.entries.extend(other.entries);
    }

    /// `true` if any entry has error severity.
    #[inline]
    pub fn contains_errors(&self) -> bool {
        self.error_count > 0
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a DiagnosticList {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
