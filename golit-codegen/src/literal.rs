//! Lexical formatting of Go constants.
//!
//! Numbers are written the way `fmt.Sprint` prints them and strings the way
//! `strconv.Quote` does, so the text parses back to the same value.

use std::fmt::Write;

/// Strings at most this many bytes long are always quoted.
pub const RAW_STRING_THRESHOLD: usize = 40;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Format a float as Go's `%v` verb does, at the given bit size (32 or 64).
///
/// The shortest decimal that round-trips at that size is used. Exponent form
/// is chosen when the decimal exponent is below -4 or at least 6.
///
/// ```
/// use golit_codegen::literal::format_float;
///
/// assert_eq!(format_float(1.5, 64), "1.5");
/// assert_eq!(format_float(1e6, 64), "1e+06");
/// assert_eq!(format_float(0.00001, 64), "1e-05");
/// assert_eq!(format_float(f64::from(1.34f32), 32), "1.34");
/// ```
pub fn format_float(value: f64, bits: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let sci = if bits == 32 {
        format!("{:e}", value as f32)
    } else {
        format!("{value:e}")
    };
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let negative = mantissa.starts_with('-');
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    if exp < -4 || exp >= 6 {
        out.push_str(&digits[..1]);
        if digits.len() > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let sign = if exp < 0 { '-' } else { '+' };
        let _ = write!(out, "e{sign}{:02}", exp.unsigned_abs());
    } else if exp >= 0 {
        let int_len = exp as usize + 1;
        if digits.len() <= int_len {
            out.push_str(&digits);
            out.extend(std::iter::repeat_n('0', int_len - digits.len()));
        } else {
            out.push_str(&digits[..int_len]);
            out.push('.');
            out.push_str(&digits[int_len..]);
        }
    } else {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-exp - 1) as usize));
        out.push_str(&digits);
    }
    out
}

/// Format a complex number as Go's `%v` verb does, e.g. `(1.34+0i)`.
pub fn format_complex(re: f64, im: f64, bits: u32) -> String {
    let part_bits = bits / 2;
    let imag = format_float(im, part_bits);
    let sign = if imag.starts_with('-') || imag.starts_with('+') {
        ""
    } else {
        "+"
    };
    format!("({}{sign}{imag}i)", format_float(re, part_bits))
}

/// Reports whether `s` reads better as a raw string literal.
///
/// Long multi-line text qualifies unless it holds a backtick, which cannot
/// appear in a raw literal, or a carriage return, which Go drops from one.
pub fn prefers_raw(s: &str) -> bool {
    s.len() > RAW_STRING_THRESHOLD && s.contains('\n') && !s.contains('`') && !s.contains('\r')
}

/// Quote `s` as a Go interpreted string literal, like `strconv.Quote`.
///
/// ```
/// use golit_codegen::literal::quote;
///
/// assert_eq!(quote("hello"), r#""hello""#);
/// assert_eq!(quote("a\"b\n"), r#""a\"b\n""#);
/// assert_eq!(quote("\u{1}"), r#""\x01""#);
/// ```
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            c if is_print(c) => out.push(c),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let b = c as u32 as usize;
                out.push_str("\\x");
                out.push(HEX[b >> 4] as char);
                out.push(HEX[b & 0xf] as char);
            }
            c if (c as u32) < 0x10000 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => {
                let _ = write!(out, "\\U{:08x}", c as u32);
            }
        }
    }
    out.push('"');
    out
}

/// Wrap `s` in backticks. Callers check [`prefers_raw`] first.
pub fn raw(s: &str) -> String {
    format!("`{s}`")
}

/// Approximates `unicode.IsPrint`: letters, marks, numbers, punctuation,
/// symbols and the ASCII space.
fn is_print(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c,
        '\u{ad}'
            | '\u{600}'..='\u{605}'
            | '\u{61c}'
            | '\u{6dd}'
            | '\u{70f}'
            | '\u{180e}'
            | '\u{200b}'..='\u{200f}'
            | '\u{202a}'..='\u{202e}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206f}'
            | '\u{e000}'..='\u{f8ff}'
            | '\u{feff}'
            | '\u{fff9}'..='\u{fffb}'
            | '\u{fffe}'..='\u{ffff}'
            | '\u{e0001}'
            | '\u{e0020}'..='\u{e007f}'
            | '\u{f0000}'..='\u{10ffff}'
    )
}
