//! Format application for captured literals.
//!
//! When a field's metadata carries a format string, every literal captured
//! for that field is rendered through a type-specific formatter before it
//! becomes a parameter: a fixed-point pattern formatter for numbers, strftime
//! for timestamps, and a `{}` template fallback for other formattable
//! scalars. Rendering is culture-invariant: `.` is always the decimal
//! separator and `,` always the group separator.
//!
//! Numbers never pass through a float. The pattern formatter works on the
//! decimal digit string directly, so arbitrary-precision values survive
//! formatting, and rounding is exact (half away from zero).

use dynamap_model::{DeclaredType, PropertyMetadata, Value};

/// Errors raised by format application.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The captured literal is not a decimal number.
    #[error("value is not a decimal number")]
    NotANumber,

    /// The format pattern is not supported.
    #[error("unsupported format pattern: {pattern}")]
    InvalidPattern {
        /// The rejected pattern.
        pattern: String,
    },

    /// The captured literal is not an RFC 3339 timestamp.
    #[error("value is not an RFC 3339 timestamp: {reason}")]
    InvalidTimestamp {
        /// Parse failure detail.
        reason: String,
    },

    /// A template format string has no `{}` placeholder.
    #[error("format template has no {{}} placeholder")]
    MissingPlaceholder,

    /// The captured literal has no scalar text rendering.
    #[error("value of type {type_descriptor} is not formattable")]
    Unformattable {
        /// The store type descriptor of the rejected value.
        type_descriptor: &'static str,
    },
}

/// Apply a field's format string (if any) to a captured literal.
///
/// Fields with no format string pass their literals through untouched. The
/// formatter is chosen by the field's declared type, not by the runtime
/// shape of the value, so behavior is fully determined by the metadata
/// table.
pub fn apply(value: Value, meta: &PropertyMetadata) -> Result<Value, FormatError> {
    let Some(pattern) = meta.format.as_deref() else {
        return Ok(value);
    };

    match meta.declared_type {
        DeclaredType::Number => {
            let raw = value.as_n().ok_or(FormatError::NotANumber)?;
            Ok(Value::N(format_number(raw, pattern)?))
        }
        DeclaredType::Timestamp => {
            let raw = value.as_s().ok_or_else(|| FormatError::InvalidTimestamp {
                reason: "timestamp values are carried as strings".to_owned(),
            })?;
            Ok(Value::S(format_timestamp(raw, pattern)?))
        }
        _ => {
            if !pattern.contains("{}") {
                return Err(FormatError::MissingPlaceholder);
            }
            let text = scalar_text(&value).ok_or(FormatError::Unformattable {
                type_descriptor: value.type_descriptor(),
            })?;
            Ok(Value::S(pattern.replacen("{}", &text, 1)))
        }
    }
}

/// Scalar text rendering used by the template fallback.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::S(s) => Some(s.clone()),
        Value::N(n) => Some(n.clone()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Timestamp formatting
// ---------------------------------------------------------------------------

fn format_timestamp(raw: &str, pattern: &str) -> Result<String, FormatError> {
    use chrono::format::{Item, StrftimeItems};

    // StrftimeItems yields Item::Error for bad specifiers; formatting one
    // would abort mid-render, so reject the pattern up front.
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(FormatError::InvalidPattern {
            pattern: pattern.to_owned(),
        });
    }

    let dt = chrono::DateTime::parse_from_rfc3339(raw).map_err(|e| {
        FormatError::InvalidTimestamp {
            reason: e.to_string(),
        }
    })?;

    Ok(dt.format_with_items(items.into_iter()).to_string())
}

// ---------------------------------------------------------------------------
// Numeric pattern formatting
// ---------------------------------------------------------------------------

/// Parsed shape of a numeric format pattern like `"0.00"` or `"#,##0.##"`.
///
/// `0` forces a digit, `#` allows one, `,` in the integer part enables
/// thousands grouping, and a single `.` separates the fraction pattern.
struct NumericPattern {
    min_int_digits: usize,
    min_scale: usize,
    max_scale: usize,
    grouping: bool,
}

impl NumericPattern {
    fn parse(pattern: &str) -> Result<Self, FormatError> {
        let invalid = || FormatError::InvalidPattern {
            pattern: pattern.to_owned(),
        };

        let (int_pat, frac_pat) = match pattern.split_once('.') {
            Some((i, f)) => (i, f),
            None => (pattern, ""),
        };
        if frac_pat.contains('.') {
            return Err(invalid());
        }

        let mut min_int_digits = 0;
        for ch in int_pat.chars() {
            match ch {
                '0' => min_int_digits += 1,
                '#' | ',' => {}
                _ => return Err(invalid()),
            }
        }

        let mut min_scale = 0;
        let mut max_scale = 0;
        for ch in frac_pat.chars() {
            match ch {
                '0' => {
                    min_scale += 1;
                    max_scale += 1;
                }
                '#' => max_scale += 1,
                _ => return Err(invalid()),
            }
        }

        Ok(Self {
            min_int_digits,
            min_scale,
            max_scale,
            grouping: int_pat.contains(','),
        })
    }
}

fn format_number(raw: &str, pattern: &str) -> Result<String, FormatError> {
    let spec = NumericPattern::parse(pattern)?;

    let (negative, rest) = match raw.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, raw),
    };
    let (int_digits, frac_digits) = split_decimal(rest)?;

    let (int_digits, frac_digits) = round_half_away(int_digits, frac_digits, spec.max_scale);

    let mut frac_out = frac_digits;
    while frac_out.len() > spec.min_scale && frac_out.ends_with('0') {
        frac_out.pop();
    }
    while frac_out.len() < spec.min_scale {
        frac_out.push('0');
    }

    let trimmed = int_digits.trim_start_matches('0');
    let mut int_out = trimmed.to_owned();
    while int_out.len() < spec.min_int_digits.max(1) {
        int_out.insert(0, '0');
    }
    if spec.grouping {
        int_out = group_thousands(&int_out);
    }

    // Rounding can collapse a small negative to zero; zero carries no sign.
    let is_zero =
        int_out.chars().all(|c| c == '0' || c == ',') && frac_out.chars().all(|c| c == '0');

    let mut out = String::new();
    if negative && !is_zero {
        out.push('-');
    }
    out.push_str(&int_out);
    if !frac_out.is_empty() {
        out.push('.');
        out.push_str(&frac_out);
    }
    Ok(out)
}

/// Split an unsigned decimal string into integer and fraction digit strings.
fn split_decimal(raw: &str) -> Result<(String, String), FormatError> {
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, f),
        None => (raw, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(FormatError::NotANumber);
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(FormatError::NotANumber);
    }
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    Ok((int_part.to_owned(), frac_part.to_owned()))
}

/// Round a digit-string decimal to `scale` fraction digits, half away from
/// zero. Works directly on the digits so precision is never lost.
fn round_half_away(int_part: String, frac_part: String, scale: usize) -> (String, String) {
    if frac_part.len() <= scale {
        return (int_part, frac_part);
    }

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(scale))
        .collect();
    let round_up = frac_part.as_bytes()[scale] >= b'5';

    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let int_len = digits.len() - scale;
    let int_out = digits[..int_len].iter().map(|b| *b as char).collect();
    let frac_out = digits[int_len..].iter().map(|b| *b as char).collect();
    (int_out, frac_out)
}

/// Insert `,` group separators every three digits, from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
