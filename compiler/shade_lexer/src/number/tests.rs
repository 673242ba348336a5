use pretty_assertions::assert_eq;

use super::*;

fn value(scan: Option<Scan>) -> (usize, TokenValue) {
    let scan = scan.unwrap_or_else(|| panic!("literal not recognized"));
    match scan.value {
        Ok(value) => (scan.len, value),
        Err(error) => panic!("unexpected error: {error}"),
    }
}

fn error(scan: Option<Scan>) -> (usize, String) {
    let scan = scan.unwrap_or_else(|| panic!("literal not recognized"));
    match scan.value {
        Ok(value) => panic!("expected an error, got {value:?}"),
        Err(error) => (scan.len, error.to_string()),
    }
}

fn float(s: &str) -> f32 {
    match value(hex_float(s.as_bytes()).or_else(|| decimal_float(s.as_bytes()))) {
        (len, TokenValue::Float(v)) => {
            assert_eq!(len, s.len(), "{s} not fully consumed");
            v
        }
        (_, other) => panic!("{s} is not a float: {other:?}"),
    }
}

// === Hex floats ===

#[test]
fn hex_float_values() {
    assert_eq!(float("0x1p4"), 16.0);
    assert_eq!(float("0x1.8p1"), 3.0);
    assert_eq!(float("-0x1p-1"), -0.5);
    assert_eq!(float("0x.8p0"), 0.5);
    assert_eq!(float("0x0.1p0"), 0.0625);
    assert_eq!(float("0x1.8"), 1.5);
    assert_eq!(float("0x1p4f"), 16.0);
    assert_eq!(float("0xAp0"), 10.0);
}

#[test]
fn hex_float_zero_ignores_exponent() {
    assert_eq!(float("0x0p0").to_bits(), 0);
    assert_eq!(float("0x0.0p99999999999").to_bits(), 0);
    assert_eq!(float("-0x0p0").to_bits(), 0x8000_0000);
}

#[test]
fn hex_float_subnormal_and_overflow() {
    assert_eq!(float("0x1p-149"), f32::from_bits(1));
    assert_eq!(float("0x1p-127"), f32::from_bits(0x0040_0000));
    assert_eq!(float("0x1p-200"), 0.0);
    assert_eq!(float("0x1p128"), f32::INFINITY);
    assert_eq!(float("-0x1p200"), f32::NEG_INFINITY);
}

#[test]
fn hex_float_errors() {
    assert_eq!(
        error(hex_float(b"0x1p")),
        (4, "expected an exponent value for hex float".to_string())
    );
    assert_eq!(
        error(hex_float(b"0x1234567890p0")),
        (14, "mantissa is too large for hex float".to_string())
    );
    assert_eq!(
        error(hex_float(b"0x1p99999999999")),
        (15, "exponent is too large for hex float".to_string())
    );
}

#[test]
fn hex_float_declines_integers() {
    assert_eq!(hex_float(b"0x1f"), None);
    assert_eq!(hex_float(b"0x"), None);
    assert_eq!(hex_float(b"12.5"), None);
}

// === Hex integers ===

#[test]
fn hex_integer_values() {
    assert_eq!(value(hex_integer(b"0x1f")), (4, TokenValue::Sint(31)));
    assert_eq!(value(hex_integer(b"0x1fu")), (5, TokenValue::Uint(31)));
    assert_eq!(
        value(hex_integer(b"0xFFFFFFFFu")),
        (11, TokenValue::Uint(u32::MAX))
    );
    assert_eq!(
        value(hex_integer(b"-0x80000000")),
        (11, TokenValue::Sint(i32::MIN))
    );
    assert_eq!(hex_integer(b"0x"), None);
    assert_eq!(hex_integer(b"123"), None);
}

#[test]
fn hex_integer_errors() {
    assert_eq!(
        error(hex_integer(b"0xFFFFFFFF")).1,
        "i32 (0xFFFFFFFF) too large"
    );
    assert_eq!(
        error(hex_integer(b"0x100000000000000")),
        (17, "integer literal (0x10000000...) has too many digits".to_string())
    );
    assert_eq!(
        error(hex_integer(b"-0x100000000000000")).1,
        "integer literal (-0x10000000...) has too many digits"
    );
}

// === Decimal floats ===

#[test]
fn decimal_float_values() {
    assert_eq!(float("1.5"), 1.5);
    assert_eq!(float("1."), 1.0);
    assert_eq!(float(".25"), 0.25);
    assert_eq!(float("-2.5e2"), -250.0);
    assert_eq!(float("1E3"), 1000.0);
    assert_eq!(float("1f"), 1.0);
    assert_eq!(float("2.5e-1f"), 0.25);
    assert_eq!(float("1e-400"), 0.0);
}

#[test]
fn decimal_float_declines_integers() {
    assert_eq!(decimal_float(b"12"), None);
    assert_eq!(decimal_float(b"-"), None);
    assert_eq!(decimal_float(b"."), None);
    assert_eq!(decimal_float(b"x1.0"), None);
}

#[test]
fn decimal_float_errors() {
    assert_eq!(
        error(decimal_float(b"1e")),
        (2, "incomplete exponent for floating point literal: 1e".to_string())
    );
    assert_eq!(
        error(decimal_float(b"1.2e+;")),
        (5, "incomplete exponent for floating point literal: 1.2e+".to_string())
    );
    assert_eq!(
        error(decimal_float(b"1e39")),
        (4, "f32 (1e39) too large (positive)".to_string())
    );
    assert_eq!(
        error(decimal_float(b"-1e39f")),
        (6, "f32 (-1e39f) too large (negative)".to_string())
    );
    assert_eq!(
        error(decimal_float(b"1e-39")),
        (5, "f32 (1e-39) magnitude too small, not representable".to_string())
    );
    assert_eq!(
        error(decimal_float(b"1.0u")),
        (4, "float literals must not be suffixed with 'u'".to_string())
    );
}

// === Decimal integers ===

#[test]
fn decimal_integer_values() {
    assert_eq!(value(decimal_integer(b"0")), (1, TokenValue::Sint(0)));
    assert_eq!(value(decimal_integer(b"-2")), (2, TokenValue::Sint(-2)));
    assert_eq!(value(decimal_integer(b"123u")), (4, TokenValue::Uint(123)));
    assert_eq!(
        value(decimal_integer(b"2147483647")),
        (10, TokenValue::Sint(i32::MAX))
    );
    assert_eq!(
        value(decimal_integer(b"-2147483648")),
        (11, TokenValue::Sint(i32::MIN))
    );
    assert_eq!(
        value(decimal_integer(b"4294967295u")),
        (11, TokenValue::Uint(u32::MAX))
    );
    assert_eq!(value(decimal_integer(b"7;")), (1, TokenValue::Sint(7)));
}

#[test]
fn decimal_integer_range_errors() {
    assert_eq!(
        error(decimal_integer(b"2147483648")).1,
        "i32 (2147483648) too large"
    );
    assert_eq!(
        error(decimal_integer(b"-2147483649")).1,
        "i32 (-2147483649) too small"
    );
    assert_eq!(
        error(decimal_integer(b"4294967296u")),
        (11, "u32 (4294967296) too large".to_string())
    );
    assert_eq!(error(decimal_integer(b"-1u")).1, "u32 (-1) too large");
}

#[test]
fn decimal_integer_digit_errors() {
    assert_eq!(
        error(decimal_integer(b"10000000000000000000000u")),
        (
            24,
            "integer literal (1000000000...) has too many digits".to_string()
        )
    );
    assert_eq!(
        error(decimal_integer(b"-10000000000000000")).1,
        "integer literal (-1000000000...) has too many digits"
    );
    assert_eq!(
        error(decimal_integer(b"01234")),
        (5, "integer literal (0...) has leading 0s".to_string())
    );
    assert_eq!(
        error(decimal_integer(b"-00")).1,
        "integer literal (-0...) has leading 0s"
    );
    assert_eq!(error(decimal_integer(b"00u")).0, 3);
}
