//! Source buffers and line/column locations.
//!
//! Every token and AST node carries a [`Range`] of 1-based [`Location`]s.
//! A range whose begin line is `0` is [`Range::EMPTY`]: the node was
//! synthesized (for example by `for` loop desugaring) and has no source text.

use std::fmt;
use std::sync::Arc;

/// A 1-based line and column. Columns count characters, not bytes.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Location { line, column }
    }

    /// The same location shifted `n` columns to the right.
    #[inline]
    #[must_use]
    pub const fn advanced(self, n: u32) -> Self {
        Location {
            line: self.line,
            column: self.column + n,
        }
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open `[begin, end)` span of source.
///
/// Invariant: `end >= begin` in (line, column) order.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Range {
    pub begin: Location,
    pub end: Location,
}

impl Range {
    /// Range of synthesized nodes.
    pub const EMPTY: Range = Range {
        begin: Location { line: 0, column: 0 },
        end: Location { line: 0, column: 0 },
    };

    #[inline]
    pub fn new(begin: Location, end: Location) -> Self {
        debug_assert!(end >= begin, "range end {end:?} precedes begin {begin:?}");
        Range { begin, end }
    }

    /// A zero-width range at `at`.
    #[inline]
    pub const fn point(at: Location) -> Self {
        Range { begin: at, end: at }
    }

    /// Returns `true` for synthesized ranges that have no source text.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.begin.line == 0
    }

    /// Smallest range covering both `self` and `other`.
    ///
    /// Empty ranges are ignored so that covering a synthesized node
    /// does not drag the result back to line 0.
    #[must_use]
    pub fn cover(self, other: Range) -> Range {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        Range {
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.begin, self.end)
    }
}

/// Pre-computed byte offsets of each line start.
///
/// Built once per file so that [`SourceFile::line`] is a slice lookup
/// instead of a scan from the beginning of the buffer.
#[derive(Clone, Debug, Default)]
struct LineOffsetTable {
    /// `offsets[0] = 0`, `offsets[n]` is the byte after the n-th `\n`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        #[allow(
            clippy::cast_possible_truncation,
            reason = "source files larger than 4GiB are not supported"
        )]
        offsets.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, byte)| byte == b'\n')
                .map(|(i, _)| (i + 1) as u32),
        );
        LineOffsetTable { offsets }
    }

    fn line_bounds(&self, line: u32, len: usize) -> Option<(usize, usize)> {
        if line == 0 {
            return None;
        }
        let idx = (line - 1) as usize;
        let start = *self.offsets.get(idx)? as usize;
        let end = self
            .offsets
            .get(idx + 1)
            .map_or(len, |&next| next as usize - 1);
        Some((start, end))
    }

    fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// An immutable, named source buffer.
#[derive(Debug)]
pub struct SourceFile {
    path: String,
    content: String,
    lines: LineOffsetTable,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        let lines = LineOffsetTable::build(&content);
        SourceFile {
            path: path.into(),
            content,
            lines,
        }
    }

    /// Convenience for the common case of sharing the file with diagnostics.
    pub fn shared(path: impl Into<String>, content: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(path, content))
    }

    /// Logical file name used when rendering diagnostics.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Text of the 1-based `line`, without its line terminator.
    pub fn line(&self, line: u32) -> Option<&str> {
        let (start, end) = self.lines.line_bounds(line, self.content.len())?;
        let text = self.content.get(start..end)?;
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }
}

/// A range together with the file it refers to.
#[derive(Clone, Debug, Default)]
pub struct Source {
    pub range: Range,
    pub file: Option<Arc<SourceFile>>,
}

impl Source {
    pub fn new(range: Range, file: Option<Arc<SourceFile>>) -> Self {
        Source { range, file }
    }

    /// A source that names a file but no particular location in it.
    pub fn whole_file(file: Arc<SourceFile>) -> Self {
        Source {
            range: Range::EMPTY,
            file: Some(file),
        }
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        let same_file = match (&self.file, &other.file) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a.path == b.path,
            (None, None) => true,
            _ => false,
        };
        same_file && self.range == other.range
    }
}
