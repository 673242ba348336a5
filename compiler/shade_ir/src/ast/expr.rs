//! Expression nodes.

use std::fmt;

use crate::{ExprId, ExprRange, Range, Symbol, TypeId};

#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub range: Range,
}

impl Expr {
    pub fn new(kind: ExprKind, range: Range) -> Self {
        Expr { kind, range }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Identifier(Symbol),
    /// Scalar constant: `true`, `1`, `2u`, `1.5`.
    Literal(Literal),
    /// `vec3<f32>(1.0, 2.0, 3.0)`
    TypeConstructor { ty: TypeId, args: ExprRange },
    /// `f(a, b)`; `callee` is always an [`ExprKind::Identifier`].
    Call { callee: ExprId, args: ExprRange },
    /// `bitcast<T>(e)`
    Bitcast { ty: TypeId, expr: ExprId },
    /// `base[index]`
    Index { base: ExprId, index: ExprId },
    /// `base.member`
    Member { base: ExprId, member: Symbol },
    Unary { op: UnaryOp, operand: ExprId },
    Binary { op: BinaryOp, lhs: ExprId, rhs: ExprId },
}

/// Literal value. Floats are stored as `f32` exactly as the lexer decoded them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Literal {
    Bool(bool),
    Sint(i32),
    Uint(u32),
    Float(f32),
}

impl Literal {
    /// `true` for the literal kinds accepted as `case` selectors.
    pub fn is_integer(&self) -> bool {
        matches!(self, Literal::Sint(_) | Literal::Uint(_))
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Sint(v) => write!(f, "{v}"),
            Literal::Uint(v) => write!(f, "{v}u"),
            Literal::Float(v) => write_float(*v, f),
        }
    }
}

/// Shortest decimal text when it reads back as a float literal, hex-float
/// text otherwise.
///
/// Debug formatting of f32 is the shortest text that rounds to the same
/// bits and always contains `.` or an exponent. Decimal literals must lie
/// in the normal binary32 range before rounding, so subnormals, infinities
/// and the few values whose shortest text falls just outside that range are
/// written as hex floats, which are exact.
fn write_float(v: f32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = format!("{v:?}");
    let in_range = |d: f64| {
        let magnitude = d.abs();
        let too_small = magnitude > 0.0 && magnitude < f64::from(f32::MIN_POSITIVE);
        magnitude <= f64::from(f32::MAX) && !too_small
    };
    if v.is_finite() && !v.is_subnormal() && text.parse::<f64>().is_ok_and(in_range) {
        return f.write_str(&text);
    }
    write_hex_float(v, f)
}

fn write_hex_float(v: f32, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    const MANTISSA_MASK: u32 = 0x7F_FFFF;

    let bits = v.to_bits();
    let sign = if bits >> 31 == 1 { "-" } else { "" };
    let exponent = (bits >> 23) & 0xFF;
    let mantissa = bits & MANTISSA_MASK;
    match exponent {
        // Subnormal: mantissa * 2^-149, with no implicit one.
        0 => write!(f, "{sign}0x{mantissa:x}p-149"),
        // The lexer never produces NaN; overflow is the only way here.
        0xFF => write!(f, "{sign}0x1p128"),
        _ => {
            let exponent = i64::from(exponent) - 127;
            if mantissa == 0 {
                return write!(f, "{sign}0x1p{exponent}");
            }
            // 23 fraction bits padded to 24 fill six hex digits.
            let digits = format!("{:06x}", mantissa << 1);
            write!(f, "{sign}0x1.{}p{exponent}", digits.trim_end_matches('0'))
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-`
    Negation,
    /// `!`
    Not,
    /// `~`
    Complement,
    /// `*`
    Indirection,
    /// `&`
    AddressOf,
}

impl UnaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Negation => "-",
            UnaryOp::Not => "!",
            UnaryOp::Complement => "~",
            UnaryOp::Indirection => "*",
            UnaryOp::AddressOf => "&",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    LogicalOr,
    LogicalAnd,
    Or,
    Xor,
    And,
    Equal,
    NotEqual,
    LessThan,
    GreaterThan,
    LessThanEqual,
    GreaterThanEqual,
    ShiftLeft,
    ShiftRight,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    pub const fn as_str(self) -> &'static str {
        match self {
            BinaryOp::LogicalOr => "||",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::And => "&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::LessThan => "<",
            BinaryOp::GreaterThan => ">",
            BinaryOp::LessThanEqual => "<=",
            BinaryOp::GreaterThanEqual => ">=",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
        }
    }
}
