//! Grammar rule results.
//!
//! Every rule returns one of two shapes:
//!
//! | Type | States | Used when |
//! |------|--------|-----------|
//! | [`Expect<T>`] | value, errored | the production must be present |
//! | [`Maybe<T>`] | matched, no match, errored | the production is optional |
//!
//! "Errored" always means a diagnostic has already been filed. A rule that
//! has seen its leading token is committed: past that point it returns
//! errored, never "no match". That is what lets an alternation try rules in
//! order on "no match" without swallowing a real error from a later branch.
//!
//! ## Usage
//!
//! ```ignore
//! fn if_stmt(&mut self) -> Maybe<StmtId> {
//!     let Some(range) = self.eat(TokenKind::If) else {
//!         return Maybe::NoMatch;
//!     };
//!     let condition = committed!(self.expect_paren_expr());
//!     let body = committed!(self.expect_body());
//!     ...
//! }
//! ```

/// Marker for "this rule failed and has already reported why".
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Errored;

/// Result of a rule that must match.
pub type Expect<T> = Result<T, Errored>;

/// Result of a rule that may be absent.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Maybe<T> {
    Matched(T),
    /// The leading token did not match; nothing was consumed or reported.
    NoMatch,
    Errored,
}

impl<T> Maybe<T> {
    #[inline]
    pub fn is_matched(&self) -> bool {
        matches!(self, Maybe::Matched(_))
    }

    #[inline]
    pub fn is_errored(&self) -> bool {
        matches!(self, Maybe::Errored)
    }

    /// The value, if matched.
    #[inline]
    pub fn matched(self) -> Option<T> {
        match self {
            Maybe::Matched(value) => Some(value),
            Maybe::NoMatch | Maybe::Errored => None,
        }
    }

    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self {
            Maybe::Matched(value) => Maybe::Matched(f(value)),
            Maybe::NoMatch => Maybe::NoMatch,
            Maybe::Errored => Maybe::Errored,
        }
    }

    /// Try `alternative` only when `self` did not match.
    #[inline]
    pub fn or_else(self, alternative: impl FnOnce() -> Maybe<T>) -> Maybe<T> {
        match self {
            Maybe::NoMatch => alternative(),
            other => other,
        }
    }
}

impl<T> From<Expect<T>> for Maybe<T> {
    #[inline]
    fn from(result: Expect<T>) -> Self {
        match result {
            Ok(value) => Maybe::Matched(value),
            Err(Errored) => Maybe::Errored,
        }
    }
}

impl<T> From<Errored> for Maybe<T> {
    #[inline]
    fn from(_: Errored) -> Self {
        Maybe::Errored
    }
}

/// Either rule result shape, so helpers like `sync` and the macros below
/// work for both.
pub trait Outcome {
    fn errored() -> Self;

    fn is_errored(&self) -> bool;
}

impl<T> Outcome for Maybe<T> {
    #[inline]
    fn errored() -> Self {
        Maybe::Errored
    }

    #[inline]
    fn is_errored(&self) -> bool {
        Maybe::is_errored(self)
    }
}

impl<T> Outcome for Expect<T> {
    #[inline]
    fn errored() -> Self {
        Err(Errored)
    }

    #[inline]
    fn is_errored(&self) -> bool {
        self.is_err()
    }
}

/// Unwrap an [`Expect`], returning errored from the enclosing rule on
/// failure. Works in rules returning either shape.
macro_rules! committed {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err($crate::outcome::Errored) => return $crate::outcome::Outcome::errored(),
        }
    };
}

/// Evaluate a [`Maybe`] to `Option<T>`, returning errored from the
/// enclosing rule if it errored.
macro_rules! try_match {
    ($maybe:expr) => {
        match $maybe {
            $crate::outcome::Maybe::Matched(value) => Some(value),
            $crate::outcome::Maybe::NoMatch => None,
            $crate::outcome::Maybe::Errored => return $crate::outcome::Outcome::errored(),
        }
    };
}

/// Evaluate a [`Maybe`] that must match. "No match" files an error at the
/// next token with the formatted message.
macro_rules! require {
    ($parser:expr, $maybe:expr, $($message:tt)+) => {
        match $maybe {
            $crate::outcome::Maybe::Matched(value) => value,
            $crate::outcome::Maybe::NoMatch => {
                $parser.add_error_at_peek(format!($($message)+));
                return $crate::outcome::Outcome::errored();
            }
            $crate::outcome::Maybe::Errored => return $crate::outcome::Outcome::errored(),
        }
    };
}

/// Try alternatives in order while they return "no match".
macro_rules! one_of {
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let outcome = $first;
        $(
            let outcome = match outcome {
                $crate::outcome::Maybe::NoMatch => $rest,
                other => other,
            };
        )*
        outcome
    }};
}

pub(crate) use committed;
pub(crate) use one_of;
pub(crate) use require;
pub(crate) use try_match;
