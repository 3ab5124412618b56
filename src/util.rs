// Utility helpers for parsing, basic statistics and number formatting.
//
// This module centralizes the "dirty" cell handling so the rest of the code
// can work with `Option<f64>` values: a missing or unparseable cell is `None`
// and every aggregate below simply skips it.
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues common in warehouse exports (commas, spaces, text).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Trimmed text cell, `None` when missing or blank.
pub fn clean_text(s: Option<String>) -> Option<String> {
    let s = s?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `numerator / denominator`, or `None` when either side is missing or the
/// denominator is zero.
pub fn safe_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let (n, d) = (numerator?, denominator?);
    if d == 0.0 {
        return None;
    }
    let q = n / d;
    q.is_finite().then_some(q)
}

/// Percentage change from `from` to `to`; `None` for a zero or missing base.
pub fn pct_change(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    let delta = to? - from?;
    safe_div(Some(delta), from).map(|r| r * 100.0)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Arithmetic mean of the defined values, `None` if there are none.
pub fn mean_defined<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Sum of the defined values; an all-missing input sums to zero.
pub fn sum_defined<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    values.into_iter().flatten().sum()
}

/// Index and value of the largest defined key. Ties keep the earliest item.
pub fn argmax_by<T, F>(items: &[T], key: F) -> Option<(usize, f64)>
where
    F: Fn(&T) -> Option<f64>,
{
    pick_first(items, key, |candidate, best| candidate > best)
}

/// Index and value of the smallest defined key. Ties keep the earliest item.
pub fn argmin_by<T, F>(items: &[T], key: F) -> Option<(usize, f64)>
where
    F: Fn(&T) -> Option<f64>,
{
    pick_first(items, key, |candidate, best| candidate < best)
}

fn pick_first<T, F, B>(items: &[T], key: F, better: B) -> Option<(usize, f64)>
where
    F: Fn(&T) -> Option<f64>,
    B: Fn(f64, f64) -> bool,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, item) in items.iter().enumerate() {
        let Some(value) = key(item) else { continue };
        match best {
            // strict comparison: an equal value never replaces the earlier one
            Some((_, current)) if !better(value, current) => {}
            _ => best = Some((idx, value)),
        }
    }
    best
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg && res.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("-{}", res)
    } else {
        res
    }
}

/// [`format_number`] for optional values; missing values render as `N/A`.
pub fn format_opt(n: Option<f64>, decimals: usize) -> String {
    n.map(|v| format_number(v, decimals))
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Used for counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_thousands_separators_and_rejects_text() {
        assert_eq!(parse_f64_safe(Some(" 1,234.5 ")), Some(1234.5));
        assert_eq!(parse_f64_safe(Some("free")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn safe_div_guards_zero_denominator() {
        assert_eq!(safe_div(Some(100.0), Some(0.0)), None);
        assert_eq!(safe_div(Some(100.0), None), None);
        assert_eq!(safe_div(Some(9.0), Some(3.0)), Some(3.0));
    }

    #[test]
    fn pct_change_from_zero_is_undefined() {
        assert_eq!(pct_change(Some(0.0), Some(10.0)), None);
        assert_eq!(pct_change(Some(100.0), Some(40.0)), Some(-60.0));
    }

    #[test]
    fn mean_skips_missing_values() {
        assert_eq!(mean_defined([Some(2.0), None, Some(4.0)]), Some(3.0));
        assert_eq!(mean_defined([None, None]), None);
        assert_eq!(sum_defined([Some(1.5), None, Some(2.5)]), 4.0);
    }

    #[test]
    fn argmax_and_argmin_keep_first_on_ties() {
        let values = [Some(1.0), Some(3.0), None, Some(3.0), Some(1.0)];
        assert_eq!(argmax_by(&values, |v| *v), Some((1, 3.0)));
        assert_eq!(argmin_by(&values, |v| *v), Some((0, 1.0)));
        let empty: [Option<f64>; 2] = [None, None];
        assert_eq!(argmax_by(&empty, |v| *v), None);
    }

    #[test]
    fn numbers_get_thousands_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-60.0, 1), "-60.0");
        assert_eq!(format_number(-0.01, 1), "0.0");
        assert_eq!(format_opt(None, 2), "N/A");
        assert_eq!(format_int(9855), "9,855");
    }

    #[test]
    fn rounding_to_one_decimal() {
        assert_eq!(round_to(-33.333, 1), -33.3);
        assert_eq!(round_to(12.25, 0), 12.0);
    }
}
