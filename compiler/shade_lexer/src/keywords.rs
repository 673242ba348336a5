//! Keyword resolution.
//!
//! Identifiers are checked against the keyword table after they are
//! scanned. Texel formats resolve to [`TokenKind::TexelFormat`], and the
//! obsolete `storage_buffer` spelling resolves to [`TokenKind::Storage`].

use shade_ir::TexelFormat;

use crate::TokenKind;

/// Longest keyword, `texture_storage_2d_array`/`texture_depth_cube_array`.
const MAX_KEYWORD_LEN: usize = 24;

/// Look up a keyword by text.
///
/// Returns `None` for ordinary identifiers. Keywords are 2 to 24 ASCII
/// characters starting with a letter, so anything else is rejected without
/// a table lookup.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let len = text.len();
    if !(2..=MAX_KEYWORD_LEN).contains(&len) {
        return None;
    }
    if !text.as_bytes()[0].is_ascii_alphabetic() {
        return None;
    }

    if text == "storage_buffer" {
        return Some(TokenKind::Storage);
    }
    TokenKind::from_keyword(text).or_else(|| TexelFormat::from_name(text).map(TokenKind::TexelFormat))
}

#[cfg(test)]
mod tests;
