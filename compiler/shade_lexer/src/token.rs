//! Token kinds and tokens.

use std::fmt;

use shade_ir::{Range, TexelFormat};

/// Declares [`TokenKind`] together with its display names and the keyword
/// spelling table.
macro_rules! token_kinds {
    (
        special { $($sv:ident => $sn:literal),* $(,)? }
        punctuation { $($pv:ident => $pn:literal),* $(,)? }
        keywords { $($kv:ident => $kn:literal),* $(,)? }
    ) => {
        /// Kind of a lexed token.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum TokenKind {
            $($sv,)*
            $($pv,)*
            $($kv,)*
            /// A storage texture format keyword such as `rgba8unorm`.
            TexelFormat(TexelFormat),
        }

        impl TokenKind {
            /// Name used in diagnostics, e.g. `expected ';' for ...`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$sv => $sn,)*
                    $(TokenKind::$pv => $pn,)*
                    $(TokenKind::$kv => $kn,)*
                    TokenKind::TexelFormat(format) => format.as_str(),
                }
            }

            pub const fn is_punctuation(self) -> bool {
                matches!(self, $(TokenKind::$pv)|*)
            }

            pub const fn is_keyword(self) -> bool {
                matches!(self, $(TokenKind::$kv)|* | TokenKind::TexelFormat(_))
            }

            /// Exact keyword match, texel formats and aliases excluded.
            pub(crate) fn from_keyword(text: &str) -> Option<TokenKind> {
                match text {
                    $($kn => Some(TokenKind::$kv),)*
                    _ => None,
                }
            }
        }
    };
}

token_kinds! {
    special {
        Error => "kError",
        Eof => "EOF",
        Identifier => "identifier",
        FloatLiteral => "float literal",
        SintLiteral => "signed integer literal",
        UintLiteral => "unsigned integer literal",
    }
    punctuation {
        At => "@",
        AttrLeft => "[[",
        AttrRight => "]]",
        ParenLeft => "(",
        ParenRight => ")",
        BracketLeft => "[",
        BracketRight => "]",
        BraceLeft => "{",
        BraceRight => "}",
        AndAnd => "&&",
        And => "&",
        ForwardSlash => "/",
        NotEqual => "!=",
        Bang => "!",
        Colon => ":",
        Comma => ",",
        EqualEqual => "==",
        Equal => "=",
        GreaterThanEqual => ">=",
        ShiftRight => ">>",
        GreaterThan => ">",
        LessThanEqual => "<=",
        ShiftLeft => "<<",
        LessThan => "<",
        Mod => "%",
        Arrow => "->",
        MinusMinus => "--",
        Minus => "-",
        Period => ".",
        PlusPlus => "++",
        Plus => "+",
        OrOr => "||",
        Or => "|",
        Semicolon => ";",
        Star => "*",
        Tilde => "~",
        Underscore => "_",
        Xor => "^",
    }
    keywords {
        Array => "array",
        Bitcast => "bitcast",
        Bool => "bool",
        Break => "break",
        Case => "case",
        Const => "const",
        Continue => "continue",
        Continuing => "continuing",
        Default => "default",
        Discard => "discard",
        Else => "else",
        ElseIf => "elseif",
        F32 => "f32",
        Fallthrough => "fallthrough",
        False => "false",
        Fn => "fn",
        For => "for",
        Function => "function",
        I32 => "i32",
        If => "if",
        Image => "image",
        In => "in",
        Let => "let",
        Loop => "loop",
        Mat2x2 => "mat2x2",
        Mat2x3 => "mat2x3",
        Mat2x4 => "mat2x4",
        Mat3x2 => "mat3x2",
        Mat3x3 => "mat3x3",
        Mat3x4 => "mat3x4",
        Mat4x2 => "mat4x2",
        Mat4x3 => "mat4x3",
        Mat4x4 => "mat4x4",
        Out => "out",
        Private => "private",
        Ptr => "ptr",
        Return => "return",
        Sampler => "sampler",
        ComparisonSampler => "sampler_comparison",
        Storage => "storage",
        Struct => "struct",
        Switch => "switch",
        TextureSampled1d => "texture_1d",
        TextureSampled2d => "texture_2d",
        TextureSampled2dArray => "texture_2d_array",
        TextureSampled3d => "texture_3d",
        TextureSampledCube => "texture_cube",
        TextureSampledCubeArray => "texture_cube_array",
        TextureDepth2d => "texture_depth_2d",
        TextureDepth2dArray => "texture_depth_2d_array",
        TextureDepthCube => "texture_depth_cube",
        TextureDepthCubeArray => "texture_depth_cube_array",
        TextureExternal => "texture_external",
        TextureMultisampled2d => "texture_multisampled_2d",
        TextureStorage1d => "texture_storage_1d",
        TextureStorage2d => "texture_storage_2d",
        TextureStorage2dArray => "texture_storage_2d_array",
        TextureStorage3d => "texture_storage_3d",
        True => "true",
        Type => "type",
        U32 => "u32",
        Uniform => "uniform",
        Var => "var",
        Vec2 => "vec2",
        Vec3 => "vec3",
        Vec4 => "vec4",
        Void => "void",
        Workgroup => "workgroup",
    }
}

impl TokenKind {
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::FloatLiteral
                | TokenKind::SintLiteral
                | TokenKind::UintLiteral
                | TokenKind::True
                | TokenKind::False
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why the lexer produced a [`TokenKind::Error`] token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexError {
    /// A character that starts no token.
    UnexpectedToken,
    /// `1.0u`
    FloatSuffixedU,
    /// `1e` or `1e+`; carries the scanned text.
    IncompleteExponent(Box<str>),
    FloatTooSmall(Box<str>),
    FloatTooLarge { text: Box<str>, negative: bool },
    HexMantissaTooLarge,
    HexExponentTooLarge,
    HexExponentMissing,
    /// Carries the accepted prefix of the literal.
    TooManyDigits(Box<str>),
    LeadingZeros(Box<str>),
    I32TooSmall(Box<str>),
    I32TooLarge(Box<str>),
    U32TooLarge(Box<str>),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedToken => f.write_str("unexpected token"),
            LexError::FloatSuffixedU => f.write_str("float literals must not be suffixed with 'u'"),
            LexError::IncompleteExponent(text) => {
                write!(f, "incomplete exponent for floating point literal: {text}")
            }
            LexError::FloatTooSmall(text) => {
                write!(f, "f32 ({text}) magnitude too small, not representable")
            }
            LexError::FloatTooLarge { text, negative } => {
                let sign = if *negative { "negative" } else { "positive" };
                write!(f, "f32 ({text}) too large ({sign})")
            }
            LexError::HexMantissaTooLarge => f.write_str("mantissa is too large for hex float"),
            LexError::HexExponentTooLarge => f.write_str("exponent is too large for hex float"),
            LexError::HexExponentMissing => {
                f.write_str("expected an exponent value for hex float")
            }
            LexError::TooManyDigits(prefix) => {
                write!(f, "integer literal ({prefix}...) has too many digits")
            }
            LexError::LeadingZeros(prefix) => {
                write!(f, "integer literal ({prefix}...) has leading 0s")
            }
            LexError::I32TooSmall(text) => write!(f, "i32 ({text}) too small"),
            LexError::I32TooLarge(text) => write!(f, "i32 ({text}) too large"),
            LexError::U32TooLarge(text) => write!(f, "u32 ({text}) too large"),
        }
    }
}

/// Decoded payload of a token.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    None,
    Sint(i32),
    Uint(u32),
    Float(f32),
    Error(LexError),
}

/// A lexed token borrowing its text from the source buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub range: Range,
    /// Source text; empty for [`TokenKind::Eof`].
    pub text: &'src str,
    pub value: TokenValue,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, range: Range, text: &'src str) -> Self {
        Token {
            kind,
            range,
            text,
            value: TokenValue::None,
        }
    }

    pub fn with_value(kind: TokenKind, range: Range, text: &'src str, value: TokenValue) -> Self {
        Token {
            kind,
            range,
            text,
            value,
        }
    }

    pub fn error(range: Range, text: &'src str, error: LexError) -> Self {
        Token::with_value(TokenKind::Error, range, text, TokenValue::Error(error))
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    #[inline]
    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn lex_error(&self) -> Option<&LexError> {
        match &self.value {
            TokenValue::Error(error) => Some(error),
            _ => None,
        }
    }

    pub fn sint(&self) -> Option<i32> {
        match self.value {
            TokenValue::Sint(v) => Some(v),
            _ => None,
        }
    }

    pub fn uint(&self) -> Option<u32> {
        match self.value {
            TokenValue::Uint(v) => Some(v),
            _ => None,
        }
    }

    pub fn float(&self) -> Option<f32> {
        match self.value {
            TokenValue::Float(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    /// Error tokens render their message, everything else its kind's name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::Error(error) => write!(f, "{error}"),
            _ => f.write_str(self.kind.name()),
        }
    }
}
