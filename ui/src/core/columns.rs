//! Metric column classification.
//!
//! Wide-format headers carry the measured quantity and the year in one loosely
//! structured string, e.g. `"Percent admitted - total (ADM2021)"` or
//! `"Graduation rate 2019-20"`. Year extraction is an ordered list of
//! [`YearRule`]s; the first rule that matches wins and is recorded on the
//! result so ambiguous headers can be audited after the fact.
//!
//! Known ambiguity: [`YearRule::CodeTwoDigitYear`] reads the first two digits
//! of any 4-digit token in a code as a year when they fall in `19..=30`, so a
//! code such as `(C2215)` is read as 2022 even if the digits are not a year.
//!
//! Word boundaries are ASCII-only, so a year glued to an accented letter
//! (`"é2020"`) still counts as a standalone token.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ACADEMIC_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)(20[0-9]{2})\s*-\s*([0-9]{2})(?-u:\b)").expect("valid regex"));
static BARE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)(20[0-9]{2})(?-u:\b)").expect("valid regex"));
static PAREN_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]*)\)").expect("valid regex"));
static CODE_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(20[0-9]{2})").expect("valid regex"));
static FOUR_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").expect("valid regex"));
static CODE_CONTENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z0-9_]+$").expect("valid regex"));
static TWO_DIGIT_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?-u:\b)[0-9]{2}\s*-\s*[0-9]{2}(?-u:\b)").expect("valid regex"));
static DASH_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*-\s*[0-9]{2}(?-u:\b)").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Year extraction rules in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearRule {
    /// `2019-20` style academic range; the first year is used.
    AcademicRange,
    /// A standalone `20NN` token anywhere in the name.
    BareYear,
    /// A `20NN` run inside the last parenthesised code (or the whole name).
    CodeYear,
    /// A 4-digit run inside the code whose first two digits are read as `20NN`.
    CodeTwoDigitYear,
}

impl YearRule {
    pub const ORDER: [YearRule; 4] = [
        YearRule::AcademicRange,
        YearRule::BareYear,
        YearRule::CodeYear,
        YearRule::CodeTwoDigitYear,
    ];

    /// Returns a confident year or declines.
    pub fn extract(self, column: &str) -> Option<i32> {
        match self {
            YearRule::AcademicRange => ACADEMIC_RANGE
                .captures(column)
                .and_then(|caps| capture_year(&caps)),
            YearRule::BareYear => BARE_YEAR.captures(column).and_then(|caps| capture_year(&caps)),
            YearRule::CodeYear => CODE_YEAR
                .captures(code_segment(column))
                .and_then(|caps| capture_year(&caps)),
            YearRule::CodeTwoDigitYear => {
                let last = FOUR_DIGITS.find_iter(code_segment(column)).last()?;
                let prefix: i32 = last.as_str()[..2].parse().ok()?;
                (19..=30).contains(&prefix).then_some(2000 + prefix)
            }
        }
    }
}

fn capture_year(caps: &Captures<'_>) -> Option<i32> {
    caps.get(1).and_then(|m| m.as_str().parse().ok())
}

/// Contents of the last parenthesised group, or the whole name when there is none.
fn code_segment(column: &str) -> &str {
    PAREN_GROUP
        .captures_iter(column)
        .last()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(column)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricColumn {
    pub base: String,
    pub year: Option<i32>,
    pub rule: Option<YearRule>,
}

pub fn parse_metric_column(column: &str) -> MetricColumn {
    let matched = YearRule::ORDER
        .iter()
        .find_map(|rule| rule.extract(column).map(|year| (*rule, year)));

    MetricColumn {
        base: base_name(column),
        year: matched.map(|(_, year)| year),
        rule: matched.map(|(rule, _)| rule),
    }
}

/// Normalised metric name with years, year ranges and code groups removed.
pub fn base_name(column: &str) -> String {
    let base = PAREN_GROUP.replace_all(column, |caps: &Captures<'_>| {
        let inner = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        if inner.is_empty() || CODE_CONTENT.is_match(inner) {
            " ".to_string()
        } else {
            format!(" {inner} ")
        }
    });
    let base = BARE_YEAR.replace_all(&base, " ");
    let base = TWO_DIGIT_RANGE.replace_all(&base, " ");
    let base = DASH_SUFFIX.replace_all(&base, " ");
    WHITESPACE.replace_all(&base, " ").trim().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricEntry {
    pub year: Option<i32>,
    pub column: String,
}

/// A family of columns measuring the same quantity, ordered by year.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricGroup {
    pub entries: Vec<MetricEntry>,
}

impl MetricGroup {
    /// Years of dated entries, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.entries.iter().filter_map(|entry| entry.year).collect()
    }

    pub fn dated_entries(&self) -> impl Iterator<Item = &MetricEntry> {
        self.entries.iter().filter(|entry| entry.year.is_some())
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.years().into_iter().max()
    }

    pub fn is_static(&self) -> bool {
        self.entries.iter().all(|entry| entry.year.is_none())
    }
}

pub type MetricGroups = BTreeMap<String, MetricGroup>;

/// Partition header columns into metric groups keyed by base name.
///
/// Empty column names, the institution column and columns whose base name
/// normalises to nothing are left out.
pub fn classify(header: &[String], institution_column: &str) -> MetricGroups {
    let mut groups = MetricGroups::new();

    for column in header {
        if column.is_empty() || column == institution_column {
            continue;
        }
        let parsed = parse_metric_column(column);
        if parsed.base.is_empty() {
            continue;
        }
        groups
            .entry(parsed.base)
            .or_default()
            .entries
            .push(MetricEntry {
                year: parsed.year,
                column: column.clone(),
            });
    }

    for group in groups.values_mut() {
        group.entries.sort_by_key(|entry| entry.year.unwrap_or(0));
    }

    groups
}

/// Metric names for a selector, case-insensitively sorted.
pub fn sorted_metric_names(groups: &MetricGroups) -> Vec<String> {
    let mut names: Vec<String> = groups.keys().cloned().collect();
    names.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    names
}
