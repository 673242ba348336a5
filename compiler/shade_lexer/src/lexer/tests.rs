use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shade_ir::{Location, TexelFormat};

use super::*;
use crate::TokenValue;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

fn single(source: &str) -> Token<'_> {
    let mut tokens = tokenize(source);
    assert_eq!(tokens.len(), 2, "{source:?} lexed to {tokens:?}");
    tokens.swap_remove(0)
}

fn loc(line: u32, column: u32) -> Location {
    Location::new(line, column)
}

#[test]
fn empty_source_is_eof() {
    let tokens = tokenize("");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_eof());
    assert_eq!(tokens[0].range, Range::point(loc(1, 1)));
}

#[test]
fn eof_repeats() {
    let mut lexer = Lexer::new("x");
    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    assert!(lexer.next_token().is_eof());
    assert!(lexer.next_token().is_eof());
}

#[test]
fn ranges_track_lines_and_columns() {
    let tokens = tokenize("fn main() {\n  return;\n}");
    let ranges: Vec<_> = tokens
        .iter()
        .map(|t| (t.kind, t.range.begin, t.range.end))
        .collect();
    assert_eq!(
        ranges,
        vec![
            (TokenKind::Fn, loc(1, 1), loc(1, 3)),
            (TokenKind::Identifier, loc(1, 4), loc(1, 8)),
            (TokenKind::ParenLeft, loc(1, 8), loc(1, 9)),
            (TokenKind::ParenRight, loc(1, 9), loc(1, 10)),
            (TokenKind::BraceLeft, loc(1, 11), loc(1, 12)),
            (TokenKind::Return, loc(2, 3), loc(2, 9)),
            (TokenKind::Semicolon, loc(2, 9), loc(2, 10)),
            (TokenKind::BraceRight, loc(3, 1), loc(3, 2)),
            (TokenKind::Eof, loc(3, 2), loc(3, 2)),
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        kinds("a // b c\n/* d /* e */ f */ g"),
        vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]
    );
    let tokens = tokenize("/* x */ y");
    assert_eq!(tokens[0].text, "y");
    assert_eq!(tokens[0].range.begin, loc(1, 9));
}

#[test]
fn unterminated_block_comment_is_not_an_error() {
    assert_eq!(kinds("x /* never closed"), vec![TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn identifiers() {
    for source in ["a", "abc", "a_b", "_a", "A0", "snake_case_9"] {
        let token = single(source);
        assert_eq!(token.kind, TokenKind::Identifier, "{source}");
        assert_eq!(token.text, source);
    }
}

#[test]
fn lone_and_double_underscores_are_not_identifiers() {
    assert_eq!(kinds("_"), vec![TokenKind::Underscore, TokenKind::Eof]);
    let tokens = tokenize("__a");
    assert_eq!(tokens[0].kind, TokenKind::Underscore);
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].text, "_a");
}

#[test]
fn keywords_and_texel_formats() {
    assert_eq!(single("struct").kind, TokenKind::Struct);
    assert_eq!(single("storage_buffer").kind, TokenKind::Storage);
    assert_eq!(
        single("rgba8unorm_srgb").kind,
        TokenKind::TexelFormat(TexelFormat::Rgba8UnormSrgb)
    );
    assert_eq!(single("structs").kind, TokenKind::Identifier);
}

#[test]
fn punctuation_longest_match() {
    assert_eq!(
        kinds("[[ ]] >>= <<= -> -- ++ || && != == @ ^ %"),
        vec![
            TokenKind::AttrLeft,
            TokenKind::AttrRight,
            TokenKind::ShiftRight,
            TokenKind::Equal,
            TokenKind::ShiftLeft,
            TokenKind::Equal,
            TokenKind::Arrow,
            TokenKind::MinusMinus,
            TokenKind::PlusPlus,
            TokenKind::OrOr,
            TokenKind::AndAnd,
            TokenKind::NotEqual,
            TokenKind::EqualEqual,
            TokenKind::At,
            TokenKind::Xor,
            TokenKind::Mod,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("a[b[1]]"),
        vec![
            TokenKind::Identifier,
            TokenKind::BracketLeft,
            TokenKind::Identifier,
            TokenKind::BracketLeft,
            TokenKind::SintLiteral,
            TokenKind::AttrRight,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn literals() {
    let token = single("1.5");
    assert_eq!(token.kind, TokenKind::FloatLiteral);
    assert_eq!(token.float(), Some(1.5));

    let token = single("-7");
    assert_eq!(token.kind, TokenKind::SintLiteral);
    assert_eq!(token.sint(), Some(-7));
    assert_eq!(token.range.end, loc(1, 3));

    let token = single("0x10u");
    assert_eq!(token.kind, TokenKind::UintLiteral);
    assert_eq!(token.uint(), Some(16));

    assert_eq!(single("true").kind, TokenKind::True);
    assert!(single("false").kind.is_literal());
}

#[test]
fn minus_before_space_is_punctuation() {
    assert_eq!(
        kinds("a - 1"),
        vec![
            TokenKind::Identifier,
            TokenKind::Minus,
            TokenKind::SintLiteral,
            TokenKind::Eof
        ]
    );
}

#[test]
fn literal_errors_become_error_tokens() {
    let token = single("2147483648");
    assert_eq!(token.kind, TokenKind::Error);
    assert_eq!(token.to_string(), "i32 (2147483648) too large");
    assert_eq!(token.range, Range::new(loc(1, 1), loc(1, 11)));

    let tokens = tokenize("1.0u x");
    assert_eq!(tokens[0].to_string(), "float literals must not be suffixed with 'u'");
    assert_eq!(tokens[1].text, "x");
}

#[test]
fn unexpected_character() {
    let tokens = tokenize("a $ b");
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].lex_error(), Some(&LexError::UnexpectedToken));
    assert_eq!(tokens[1].to_string(), "unexpected token");
    assert_eq!(tokens[1].range, Range::new(loc(1, 3), loc(1, 4)));
    assert_eq!(tokens[2].text, "b");
}

#[test]
fn unexpected_multibyte_character_spans_one_column() {
    let tokens = tokenize("é x");
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert_eq!(tokens[0].text, "é");
    assert_eq!(tokens[0].range, Range::new(loc(1, 1), loc(1, 2)));
    assert_eq!(tokens[1].range.begin, loc(1, 3));
}

#[test]
fn token_display_uses_kind_name() {
    assert_eq!(single(";").to_string(), ";");
    assert_eq!(single("x").to_string(), "identifier");
    assert_eq!(TokenKind::Eof.to_string(), "EOF");
    assert_eq!(TokenKind::UintLiteral.name(), "unsigned integer literal");
    assert!(matches!(single("1u").value, TokenValue::Uint(1)));
}

proptest! {
    #[test]
    fn lexing_always_terminates_in_eof(source in "\\PC{0,64}") {
        let tokens = tokenize(&source);
        prop_assert!(tokens.last().is_some_and(Token::is_eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
    }

    #[test]
    fn tokens_advance_and_never_overlap(source in "[ -~\\n\\t]{0,64}") {
        let tokens = tokenize(&source);
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].range.end <= pair[1].range.begin);
        }
        for token in &tokens[..tokens.len() - 1] {
            prop_assert!(!token.text.is_empty());
            prop_assert!(token.range.begin < token.range.end);
        }
    }
}
