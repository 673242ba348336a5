//! Lexer for the Shade shader language.
//!
//! [`Lexer`] turns source text into [`Token`]s one at a time; the parser
//! reads them through a [`TokenStream`], which buffers look-ahead so that
//! `peek(k)` never consumes. Malformed input never stops lexing: it becomes
//! a [`TokenKind::Error`] token carrying a [`LexError`].

mod cursor;
mod keywords;
mod lexer;
mod number;
mod stream;
mod token;

pub use lexer::{tokenize, Lexer};
pub use stream::TokenStream;
pub use token::{LexError, Token, TokenKind, TokenValue};
