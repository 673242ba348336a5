//! Numeric literal scanning.
//!
//! Each scanner looks at the unconsumed input and either declines (`None`,
//! the input is not that kind of literal) or returns how many bytes the
//! literal spans together with its decoded value or the reason it is
//! malformed. The lexer tries them in the order hex float, hex integer,
//! decimal float, decimal integer.

use crate::{LexError, TokenKind, TokenValue};

/// Result of scanning one literal.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Scan {
    /// Bytes consumed, including sign and suffixes.
    pub len: usize,
    pub value: Result<TokenValue, LexError>,
}

impl Scan {
    fn ok(len: usize, value: TokenValue) -> Option<Scan> {
        Some(Scan {
            len,
            value: Ok(value),
        })
    }

    fn err(len: usize, error: LexError) -> Option<Scan> {
        Some(Scan {
            len,
            value: Err(error),
        })
    }
}

/// Token kind for a successfully decoded literal value.
pub(crate) fn literal_kind(value: &TokenValue) -> TokenKind {
    match value {
        TokenValue::Sint(_) => TokenKind::SintLiteral,
        TokenValue::Uint(_) => TokenKind::UintLiteral,
        TokenValue::Float(_) => TokenKind::FloatLiteral,
        TokenValue::None | TokenValue::Error(_) => TokenKind::Error,
    }
}

#[inline]
fn at(s: &[u8], i: usize) -> Option<u8> {
    s.get(i).copied()
}

#[inline]
fn is_digit_at(s: &[u8], i: usize) -> bool {
    at(s, i).is_some_and(|b| b.is_ascii_digit())
}

#[inline]
fn is_hex_at(s: &[u8], i: usize) -> bool {
    at(s, i).is_some_and(|b| b.is_ascii_hexdigit())
}

fn scan_digits(s: &[u8], mut i: usize, pred: fn(&[u8], usize) -> bool) -> usize {
    while pred(s, i) {
        i += 1;
    }
    i
}

fn hex_value(b: u8) -> u32 {
    match b {
        b'0'..=b'9' => u32::from(b - b'0'),
        b'a'..=b'f' => u32::from(b - b'a') + 10,
        b'A'..=b'F' => u32::from(b - b'A') + 10,
        _ => 0,
    }
}

fn text(s: &[u8], end: usize) -> Box<str> {
    String::from_utf8_lossy(&s[..end]).into()
}

/// Length of an optional leading `-` followed by `0x`, or `None`.
fn hex_prefix(s: &[u8]) -> Option<usize> {
    let sign = usize::from(at(s, 0) == Some(b'-'));
    s[sign..].starts_with(b"0x").then_some(sign + 2)
}

/// `-?0x(hex*.hex+ | hex+.?hex*)(p[+-]?dec+f?)?`, where a literal without
/// `.` needs the exponent to be a float at all.
///
/// The value is assembled directly as IEEE binary32 bits so that it is
/// exact: no decimal conversion is involved. Values that overflow become
/// infinity, values that underflow become subnormal or zero.
#[allow(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "exponent arithmetic mirrors binary32 field widths and is range checked"
)]
pub(crate) fn hex_float(s: &[u8]) -> Option<Scan> {
    const TOTAL_MSB: u32 = 31;
    const MANTISSA_BITS: u32 = 23;
    const MANTISSA_MSB: u32 = MANTISSA_BITS - 1;
    const MANTISSA_SHIFT_RIGHT: u32 = 32 - MANTISSA_BITS;
    const EXPONENT_BIAS: u32 = 127;
    const EXPONENT_MAX: i32 = 255;
    const EXPONENT_MASK: u32 = 0xFF;

    let negative = at(s, 0) == Some(b'-');
    let int_start = hex_prefix(s)?;
    let int_end = scan_digits(s, int_start, is_hex_at);
    let hex_point = at(s, int_end) == Some(b'.');
    let frac_start = int_end + usize::from(hex_point);
    let frac_end = scan_digits(s, frac_start, is_hex_at);
    if int_start == int_end && frac_start == frac_end {
        return None;
    }
    let has_exponent = matches!(at(s, frac_end), Some(b'p' | b'P'));
    if !has_exponent && !hex_point {
        return None;
    }

    // From here on the input is a hex float or a malformed one. Find the
    // full extent first so that errors consume the whole literal.
    let mut end = frac_end;
    let mut exponent_digits = end..end;
    let mut exponent_negative = false;
    if has_exponent {
        end += 1;
        match at(s, end) {
            Some(b'+') => end += 1,
            Some(b'-') => {
                exponent_negative = true;
                end += 1;
            }
            _ => {}
        }
        let digits_start = end;
        end = scan_digits(s, end, is_digit_at);
        exponent_digits = digits_start..end;
        if at(s, end) == Some(b'f') {
            end += 1;
        }
        if exponent_digits.is_empty() {
            return Scan::err(end, LexError::HexExponentMissing);
        }
    }

    let mut mantissa: u32 = 0;
    let mut exponent: u32 = 0;
    // Next mantissa bit to fill, from the MSB down. Wraps below zero, which
    // is how overflow is detected.
    let mut next_bit: u32 = TOTAL_MSB;
    let mut set_next_bit = |mantissa: &mut u32, set: bool, integer_part: bool| -> bool {
        if (integer_part || set) && next_bit > TOTAL_MSB {
            return false;
        }
        if set {
            *mantissa |= 1 << next_bit;
        }
        next_bit = next_bit.wrapping_sub(1);
        true
    };

    let mut has_zero_integer = true;
    let mut seen_one = false;
    for &digit in &s[int_start..int_end] {
        let nibble = hex_value(digit);
        if nibble != 0 {
            has_zero_integer = false;
        }
        for bit in (0..4).rev() {
            let v = (nibble >> bit) & 1;
            if seen_one {
                // The leading one is implicit and never stored.
                if !set_next_bit(&mut mantissa, v != 0, true) {
                    return Scan::err(end, LexError::HexMantissaTooLarge);
                }
                exponent = exponent.wrapping_add(1);
            } else if v == 1 {
                seen_one = true;
            }
        }
    }
    for &digit in &s[frac_start..frac_end] {
        let nibble = hex_value(digit);
        for bit in (0..4).rev() {
            let v = (nibble >> bit) & 1;
            if v == 1 {
                seen_one = true;
            }
            if !seen_one {
                exponent = exponent.wrapping_sub(1);
            } else if !set_next_bit(&mut mantissa, v != 0, false) {
                return Scan::err(end, LexError::HexMantissaTooLarge);
            }
        }
    }
    let is_zero = !seen_one;

    let mut input_exponent: u32 = 0;
    for &digit in &s[exponent_digits] {
        let next = input_exponent
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(digit - b'0')));
        input_exponent = match next {
            Some(v) => v,
            // A zero mantissa ignores the exponent entirely.
            None if is_zero => input_exponent.wrapping_mul(10),
            None => return Scan::err(end, LexError::HexExponentTooLarge),
        };
    }

    if is_zero {
        exponent = 0;
    } else {
        if input_exponent > i32::MAX as u32 - EXPONENT_BIAS {
            return Scan::err(end, LexError::HexExponentTooLarge);
        }
        let signed_input = if exponent_negative {
            -(input_exponent as i32)
        } else {
            input_exponent as i32
        };
        exponent = exponent.wrapping_add(signed_input as u32);
        exponent = exponent.wrapping_add(EXPONENT_BIAS);
        // A fractional leading one was stored explicitly; drop it.
        if has_zero_integer {
            mantissa <<= 1;
            exponent = exponent.wrapping_sub(1);
        }
    }

    let mut signed_exponent = exponent as i32;
    mantissa >>= MANTISSA_SHIFT_RIGHT;

    if !is_zero {
        // Subnormal: restore the implicit one and shift until the exponent
        // reaches zero.
        if signed_exponent <= 0 {
            mantissa >>= 1;
            mantissa |= 1 << MANTISSA_MSB;
        }
        while signed_exponent < 0 {
            mantissa >>= 1;
            signed_exponent += 1;
            if mantissa == 0 {
                signed_exponent = 0;
            }
        }
    }

    if signed_exponent > EXPONENT_MAX {
        signed_exponent = EXPONENT_MAX;
        mantissa = 0;
    } else if signed_exponent == EXPONENT_MAX && mantissa != 0 {
        mantissa = 0;
    }

    let bits = (u32::from(negative) << 31)
        | mantissa
        | ((signed_exponent as u32 & EXPONENT_MASK) << MANTISSA_BITS);
    Scan::ok(end, TokenValue::Float(f32::from_bits(bits)))
}

/// Range-check an integer literal. `text` excludes the `u` suffix.
fn integer_value(value: i64, unsigned: bool, text: Box<str>) -> Result<TokenValue, LexError> {
    if unsigned {
        return u32::try_from(value)
            .map(TokenValue::Uint)
            .map_err(|_| LexError::U32TooLarge(text));
    }
    if value < i64::from(i32::MIN) {
        return Err(LexError::I32TooSmall(text));
    }
    i32::try_from(value)
        .map(TokenValue::Sint)
        .map_err(|_| LexError::I32TooLarge(text))
}

/// `-?0x[0-9a-fA-F]{1,8}u?`
pub(crate) fn hex_integer(s: &[u8]) -> Option<Scan> {
    const MAX_DIGITS: usize = 8;

    let first = hex_prefix(s)?;
    let digits_end = scan_digits(s, first, is_hex_at);
    if digits_end == first {
        return None;
    }
    let unsigned = at(s, digits_end) == Some(b'u');
    let len = digits_end + usize::from(unsigned);
    if digits_end - first > MAX_DIGITS {
        return Scan::err(len, LexError::TooManyDigits(text(s, first + MAX_DIGITS)));
    }

    let digits = std::str::from_utf8(&s[first..digits_end]).ok()?;
    let magnitude = i64::from_str_radix(digits, 16).ok()?;
    let value = if at(s, 0) == Some(b'-') {
        -magnitude
    } else {
        magnitude
    };
    Some(Scan {
        len,
        value: integer_value(value, unsigned, text(s, digits_end)),
    })
}

/// `-?digits` with optional fraction, exponent and `f` suffix. Declines
/// plain integers.
pub(crate) fn decimal_float(s: &[u8]) -> Option<Scan> {
    let mut end = usize::from(at(s, 0) == Some(b'-'));
    let int_end = scan_digits(s, end, is_digit_at);
    let mut has_mantissa_digits = int_end > end;
    end = int_end;

    let has_point = at(s, end) == Some(b'.');
    if has_point {
        end += 1;
        let frac_end = scan_digits(s, end, is_digit_at);
        has_mantissa_digits |= frac_end > end;
        end = frac_end;
    }
    if !has_mantissa_digits {
        return None;
    }

    let mut has_exponent = false;
    if matches!(at(s, end), Some(b'e' | b'E')) {
        end += 1;
        if matches!(at(s, end), Some(b'+' | b'-')) {
            end += 1;
        }
        let exp_end = scan_digits(s, end, is_digit_at);
        has_exponent = exp_end > end;
        end = exp_end;
        if !has_exponent {
            return Scan::err(end, LexError::IncompleteExponent(text(s, end)));
        }
    }

    let number_end = end;
    let has_f_suffix = at(s, end) == Some(b'f');
    if has_f_suffix {
        end += 1;
    }
    if !has_point && !has_exponent && !has_f_suffix {
        return None;
    }
    if at(s, end) == Some(b'u') {
        return Scan::err(end + 1, LexError::FloatSuffixedU);
    }

    let number = std::str::from_utf8(&s[..number_end]).ok()?;
    let value: f64 = number.parse().ok()?;
    let literal = text(s, end);
    let magnitude = value.abs();
    if magnitude > 0.0 && magnitude < f64::from(f32::MIN_POSITIVE) {
        return Scan::err(end, LexError::FloatTooSmall(literal));
    }
    if value < f64::from(f32::MIN) {
        return Scan::err(
            end,
            LexError::FloatTooLarge {
                text: literal,
                negative: true,
            },
        );
    }
    if value > f64::from(f32::MAX) {
        return Scan::err(
            end,
            LexError::FloatTooLarge {
                text: literal,
                negative: false,
            },
        );
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "range checked above; rounding to nearest binary32 is intended"
    )]
    let value = value as f32;
    Scan::ok(end, TokenValue::Float(value))
}

/// `-?(0|[1-9][0-9]{0,9})u?`
pub(crate) fn decimal_integer(s: &[u8]) -> Option<Scan> {
    const MAX_DIGITS: usize = 10;

    let first = usize::from(at(s, 0) == Some(b'-'));
    if !is_digit_at(s, first) {
        return None;
    }
    let digits_end = scan_digits(s, first, is_digit_at);
    let unsigned = at(s, digits_end) == Some(b'u');
    let len = digits_end + usize::from(unsigned);

    if at(s, first) == Some(b'0') && digits_end - first > 1 {
        return Scan::err(len, LexError::LeadingZeros(text(s, first + 1)));
    }
    if digits_end - first > MAX_DIGITS {
        return Scan::err(len, LexError::TooManyDigits(text(s, first + MAX_DIGITS)));
    }

    // At most 10 digits and a sign: always fits in i64.
    let number = std::str::from_utf8(&s[..digits_end]).ok()?;
    let value: i64 = number.parse().ok()?;
    Some(Scan {
        len,
        value: integer_value(value, unsigned, text(s, digits_end)),
    })
}

#[cfg(test)]
mod tests;
