//! Formatting helpers for presenting metric values.

/// Sentinel for a missing or unparseable cell. Never produced by real data.
pub const ABSENT: f64 = f64::NEG_INFINITY;

pub fn is_absent(value: f64) -> bool {
    value == ABSENT
}

/// Unit inferred from a metric's base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Percent,
    Currency,
    Count,
}

impl Unit {
    pub fn infer(base: &str) -> Self {
        let lower = base.to_lowercase();
        let has = |needles: &[&str]| needles.iter().any(|needle| lower.contains(needle));

        if has(&["percent", "rate", "yield"]) {
            Unit::Percent
        } else if has(&["price", "tuition", "fees", "aid", "loans"]) {
            Unit::Currency
        } else {
            Unit::Count
        }
    }
}

/// Raw cell or already-numeric input (axis labels, tooltips).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(value: &'a str) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue<'_> {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions<'a> {
    /// Returned for empty input.
    pub empty: &'a str,
}

pub fn format_value<'a>(raw: impl Into<RawValue<'a>>, base: &str, options: FormatOptions<'_>) -> String {
    let number = match raw.into() {
        RawValue::Text(text) if text.is_empty() => return options.empty.to_string(),
        RawValue::Text(text) => match coerce_number(text) {
            Some(number) => number,
            None => return text.to_string(),
        },
        RawValue::Number(number) if number.is_nan() => return options.empty.to_string(),
        RawValue::Number(number) => number,
    };

    match Unit::infer(base) {
        Unit::Percent => {
            let pct = if number.abs() <= 1.0 { number * 100.0 } else { number };
            format!("{pct:.2}%")
        }
        Unit::Currency => format!("${}", group_thousands(number)),
        Unit::Count => group_thousands(number),
    }
}

/// Cell text to a plottable number, or [`ABSENT`].
pub fn parse_value(raw: &str) -> f64 {
    if raw.is_empty() {
        return ABSENT;
    }
    coerce_number(raw).unwrap_or(ABSENT)
}

/// Keep digits, `.` and `-`, then read the longest numeric prefix.
fn coerce_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect();
    leading_float(&cleaned)
}

fn leading_float(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    text[..end].trim_end_matches('.').parse().ok()
}

/// Thousands separators with at most three fraction digits, trailing zeros trimmed.
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (int_part != "0" || !frac_part.is_empty());
    let sign = if negative { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_metrics_scale_fractions() {
        assert_eq!(format_value("0.42", "Admission Rate", FormatOptions::default()), "42.00%");
        assert_eq!(format_value("55", "Admission Rate", FormatOptions::default()), "55.00%");
        assert_eq!(format_value(0.5, "Admissions yield", FormatOptions::default()), "50.00%");
    }

    #[test]
    fn currency_metrics_get_dollar_and_grouping() {
        assert_eq!(
            format_value("18000", "Total Price for in-state students", FormatOptions::default()),
            "$18,000"
        );
        assert_eq!(
            format_value("$1,234,567.5", "Average amount of student loans", FormatOptions::default()),
            "$1,234,567.5"
        );
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_value("12345", "Enrollment", FormatOptions::default()), "12,345");
        assert_eq!(format_value(-9876.54321, "Enrollment", FormatOptions::default()), "-9,876.543");
    }

    #[test]
    fn empty_input_uses_placeholder() {
        assert_eq!(format_value("", "Enrollment", FormatOptions { empty: "—" }), "—");
        assert_eq!(format_value("", "Enrollment", FormatOptions::default()), "");
    }

    #[test]
    fn unparseable_text_is_returned_unchanged() {
        assert_eq!(format_value("n/a", "Enrollment", FormatOptions::default()), "n/a");
        assert_eq!(format_value("-", "Admission Rate", FormatOptions::default()), "-");
    }

    #[test]
    fn parse_value_marks_missing_cells_absent() {
        assert!(is_absent(parse_value("")));
        assert!(is_absent(parse_value("PrivacySuppressed")));
        assert_eq!(parse_value("1,250"), 1250.0);
        assert_eq!(parse_value("45%"), 45.0);
        assert_eq!(parse_value("-3.5"), -3.5);
        assert_eq!(parse_value("1.2.3"), 1.2);
        assert_eq!(parse_value(".5"), 0.5);
    }

    #[test]
    fn grouping_handles_small_and_round_values() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(0.1), "0.1");
        assert_eq!(group_thousands(-0.0001), "0");
    }
}
