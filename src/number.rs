/// Coerces free-text hours the way a browser converts a string to a number,
/// then clamps anything that is not a finite positive amount to zero.
pub fn parse_hours(raw: &str) -> f64 {
    let value = parse_number_from_string(raw);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

pub(crate) fn parse_number_from_string(src: &str) -> f64 {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if trimmed == "Infinity" || trimmed == "+Infinity" {
        return f64::INFINITY;
    }
    if trimmed == "-Infinity" {
        return f64::NEG_INFINITY;
    }

    if let Some(rest) = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix('-'))
    {
        let lower = rest.get(..2).map(str::to_ascii_lowercase);
        if matches!(lower.as_deref(), Some("0x" | "0o" | "0b")) {
            return f64::NAN;
        }
    }

    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let upper = prefix.to_ascii_uppercase();
        if let Some(digits) = trimmed
            .strip_prefix(prefix)
            .or_else(|| trimmed.strip_prefix(upper.as_str()))
        {
            return parse_prefixed_radix_to_f64(digits, radix);
        }
    }

    // Rust accepts spellings such as "inf" and "nan" that a browser rejects.
    if trimmed
        .chars()
        .any(|ch| ch.is_ascii_alphabetic() && ch != 'e' && ch != 'E')
    {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_prefixed_radix_to_f64(src: &str, radix: u32) -> f64 {
    if src.is_empty() {
        return f64::NAN;
    }
    let mut out = 0.0f64;
    for ch in src.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            return f64::NAN;
        };
        out = out * (radix as f64) + (digit as f64);
    }
    out
}

/// Shortest round-trip rendering, as a browser writes a number back into an input.
pub(crate) fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == f64::INFINITY {
        return "Infinity".to_string();
    }
    if value == f64::NEG_INFINITY {
        return "-Infinity".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
        let integer = value as i64;
        if (integer as f64) == value {
            return integer.to_string();
        }
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        return exponential(value);
    }
    format!("{value}")
}

// Shortest digits in exponent form with an explicit sign: `2.6e+301`, `1e-7`.
fn exponential(value: f64) -> String {
    let raw = format!("{value:e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let exponent = exponent.parse::<i32>().unwrap_or(0);
    format!("{mantissa}e{exponent:+}")
}

const MAX_EXACT_TIE_DIGITS: usize = 20;

/// Fixed-point rendering with `fraction_digits` decimals.
///
/// `format!("{:.N}")` settles exact ties to even; browsers pick the larger
/// magnitude instead, so a value exactly halfway between two outputs is
/// rounded away from zero here.
pub(crate) fn to_fixed(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return format_number(value);
    }
    let value = if value == 0.0 { 0.0 } else { value };

    if let Some(rounded) = round_exact_tie(value, fraction_digits) {
        return rounded;
    }
    format!("{:.*}", fraction_digits, value)
}

// A tie at `digits` decimals is exactly `odd / 2^(digits + 1)`.
fn round_exact_tie(value: f64, digits: usize) -> Option<String> {
    if digits > MAX_EXACT_TIE_DIGITS {
        return None;
    }
    let scaled = value.abs() * 2f64.powi(digits as i32 + 1);
    if scaled.fract() != 0.0 || scaled >= 2f64.powi(53) {
        return None;
    }
    let odd = scaled as u128;
    if odd % 2 == 0 {
        return None;
    }

    let units = (odd * 5u128.pow(digits as u32) + 1) / 2;
    let divisor = 10u128.pow(digits as u32);
    let sign = if value < 0.0 { "-" } else { "" };
    let int_part = units / divisor;
    if digits == 0 {
        return Some(format!("{sign}{int_part}"));
    }
    let frac_part = units % divisor;
    Some(format!("{sign}{int_part}.{frac_part:0digits$}"))
}

/// Two decimals, comma separator, trailing euro sign: `140.0` renders as `140,00 €`.
pub fn format_currency(value: f64) -> String {
    format!("{} €", to_fixed(value, 2).replace('.', ","))
}
