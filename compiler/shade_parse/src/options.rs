//! Parser limits.

/// Policy knobs for one parse.
///
/// None of these change what the grammar accepts; they bound how much work
/// the parser does on malformed or adversarial input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    /// Error diagnostics filed before parsing stops with
    /// `stopping after N errors`.
    pub max_errors: usize,
    /// Nesting of sync scopes and unary operators before the parser
    /// reports `maximum parser recursive depth reached`.
    pub max_depth: u32,
    /// Tokens scanned ahead when looking for a resynchronization point.
    pub resync_lookahead: usize,
}

impl ParserOptions {
    pub const DEFAULT_MAX_ERRORS: usize = 25;
    pub const DEFAULT_MAX_DEPTH: u32 = 128;
    pub const DEFAULT_RESYNC_LOOKAHEAD: usize = 32;

    pub const fn new() -> Self {
        ParserOptions {
            max_errors: Self::DEFAULT_MAX_ERRORS,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            resync_lookahead: Self::DEFAULT_RESYNC_LOOKAHEAD,
        }
    }

    #[must_use]
    pub const fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub const fn with_resync_lookahead(mut self, lookahead: usize) -> Self {
        self.resync_lookahead = lookahead;
        self
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}
