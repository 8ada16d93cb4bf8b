//! Formatting helpers for presenting metrics.

/// Placeholder shown for values that cannot be rendered (NaN, ±inf).
pub const MISSING: &str = "—";

/// Fixed-point rendering with exactly `digits` fractional digits.
///
/// Rounds half away from zero on the shortest decimal form of `value`, so
/// `0.8765` becomes `"0.877"` even though the nearest `f64` sits just below it.
pub fn format_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }

    let shortest = format!("{}", value.abs());
    let (int_part, frac_part) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .collect();

    let round_up = frac_part.as_bytes().get(digits).is_some_and(|d| *d >= b'5');
    if round_up && !increment_digits(&mut kept) {
        kept.insert(0, b'1');
    }

    let split = kept.len() - digits;
    let (whole, frac) = kept.split_at(split);
    let whole = String::from_utf8_lossy(whole);
    let frac = String::from_utf8_lossy(frac);

    // `-0.0001` keeps its sign as `-0.000`; only a true `-0.0` prints unsigned.
    let sign = if value < 0.0 { "-" } else { "" };

    if digits == 0 {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{frac}")
    }
}

/// Adds one to an ASCII digit string in place. Returns `false` when the carry overflows.
fn increment_digits(digits: &mut [u8]) -> bool {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return true;
        }
    }
    false
}

/// The headline scalar format (three decimals).
pub fn format_metric(value: f64) -> String {
    format_fixed(value, 3)
}

pub fn format_turns(count: usize) -> String {
    count.to_string()
}

/// Axis tick label: integers without a fraction, otherwise up to three decimals.
pub fn format_tick(value: f64) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    if (value - value.round()).abs() < 1e-9 {
        return format_fixed(value.round(), 0);
    }
    let fixed = format_fixed(value, 3);
    match fixed.trim_end_matches('0').trim_end_matches('.') {
        "-0" => "0".to_string(),
        trimmed => trimmed.to_string(),
    }
}
