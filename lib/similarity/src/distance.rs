//! Per-attribute similarity functions
//!
//! Every function is total and returns a similarity in [0.0, 1.0] where 1.0
//! means identical. Unparseable numbers and unknown ordinal labels degrade to
//! a defined value instead of failing.

use casex_core::{Attribute, AttributeKind, RankTable};

/// Parse a raw numeric value, accepting either a decimal comma or point
///
/// The first comma is read as the decimal point, then the longest leading
/// number is taken (`"0,5%"` is 0.5, `"1,2,3"` is 1.2). Returns `None` when
/// no digits lead the text or the result is not finite.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replacen(',', ".", 1);
    let prefix = &normalized[..numeric_prefix_len(normalized.as_bytes())];
    let value: f64 = prefix.parse().ok()?;
    value.is_finite().then_some(value)
}

/// Length of the leading `[+-]digits[.digits][(e|E)[+-]digits]` run
fn numeric_prefix_len(bytes: &[u8]) -> usize {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    end
}

/// Linear distance over the attribute's fixed range: `1 - |a - b| / (max - min)`
///
/// Either side failing to parse gives 0. A degenerate range (`max == min`)
/// gives 1.
pub fn numeric_similarity(new_value: &str, base_value: &str, min: f64, max: f64) -> f64 {
    let (a, b) = match (parse_decimal(new_value), parse_decimal(base_value)) {
        (Some(a), Some(b)) => (a, b),
        _ => return 0.0,
    };

    let range = max - min;
    if range == 0.0 {
        return 1.0;
    }

    (1.0 - (a - b).abs() / range).clamp(0.0, 1.0)
}

/// Linear distance between ranks: `1 - |rank(a) - rank(b)| / max_rank`
pub fn ordinal_similarity(new_value: &str, base_value: &str, scale: &RankTable) -> f64 {
    let max_rank = scale.max_rank();
    if max_rank == 0 {
        return 1.0;
    }

    let a = scale.rank(new_value) as f64;
    let b = scale.rank(base_value) as f64;
    (1.0 - (a - b).abs() / max_rank as f64).clamp(0.0, 1.0)
}

/// Exact match: 1 if equal (two empty values included), 0 otherwise
#[inline]
pub fn nominal_similarity(new_value: &str, base_value: &str) -> f64 {
    if new_value == base_value { 1.0 } else { 0.0 }
}

/// Compare two raw values of `attribute` according to its kind
pub fn attribute_similarity(attribute: &Attribute, new_value: &str, base_value: &str) -> f64 {
    match &attribute.kind {
        AttributeKind::Numeric { min, max } => numeric_similarity(new_value, base_value, *min, *max),
        AttributeKind::Ordinal(scale) => ordinal_similarity(new_value, base_value, scale),
        AttributeKind::Nominal => nominal_similarity(new_value, base_value),
    }
}
