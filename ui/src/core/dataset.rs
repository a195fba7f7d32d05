//! The in-memory dataset: parsed rows plus their metric groups.

use std::collections::BTreeSet;

use tracing::info;

use super::columns::{classify, sorted_metric_names, MetricGroup, MetricGroups};
use super::config::Config;
use super::error::{LoadError, LoadResult};
use super::table::{self, Row};

/// Replaced wholesale on every successful load, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub header: Vec<String>,
    pub rows: Vec<Row>,
    pub groups: MetricGroups,
    pub metrics: Vec<String>,
    pub institution_column: String,
}

impl Dataset {
    pub fn from_text(text: &str, config: &Config) -> LoadResult<Self> {
        let parsed = table::parse(text);
        if parsed.is_empty() {
            return Err(LoadError::EmptyInput);
        }

        let groups = classify(&parsed.header, &config.institution_column);
        let metrics = sorted_metric_names(&groups);
        info!(
            rows = parsed.rows.len(),
            columns = parsed.header.len(),
            metrics = metrics.len(),
            "dataset parsed"
        );

        Ok(Self {
            header: parsed.header,
            rows: parsed.rows,
            groups,
            metrics,
            institution_column: config.institution_column.clone(),
        })
    }

    pub fn group(&self, metric: &str) -> Option<&MetricGroup> {
        self.groups.get(metric)
    }

    /// Institution name for a row; blank when the column is missing.
    pub fn institution<'a>(&self, row: &'a Row) -> &'a str {
        row.get(&self.institution_column)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Distinct non-blank institution names, sorted case-insensitively.
    pub fn institutions(&self) -> Vec<String> {
        let unique: BTreeSet<&str> = self
            .rows
            .iter()
            .map(|row| self.institution(row))
            .filter(|name| !name.trim().is_empty())
            .collect();
        let mut names: Vec<String> = unique.into_iter().map(str::to_string).collect();
        names.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "instnm,Applications (2020),Applications (2021),Carnegie\n\
        Wayne State University,100,120,R1\n\
        Oakland University,80,,R2\n\
        ,5,6,\n";

    #[test]
    fn builds_groups_and_institutions() {
        let dataset = Dataset::from_text(SAMPLE, &Config::default()).unwrap();
        assert_eq!(dataset.metrics, vec!["Applications", "Carnegie"]);
        assert_eq!(
            dataset.institutions(),
            vec!["Oakland University", "Wayne State University"]
        );
        assert_eq!(dataset.rows.len(), 3);
        assert_eq!(dataset.group("Applications").unwrap().years(), vec![2020, 2021]);
    }

    #[test]
    fn empty_text_is_rejected() {
        assert_eq!(
            Dataset::from_text("", &Config::default()),
            Err(LoadError::EmptyInput)
        );
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        assert_eq!(
            Dataset::from_text("  \t ", &Config::default()),
            Err(LoadError::EmptyInput)
        );
        assert_eq!(
            Dataset::from_text("\u{feff}   \r\n  ", &Config::default()),
            Err(LoadError::EmptyInput)
        );
    }

    #[test]
    fn trailing_blank_record_is_not_an_institution() {
        let dataset = Dataset::from_text("instnm,Rate 2020\nA,1\n   ", &Config::default()).unwrap();
        assert_eq!(dataset.rows.len(), 1);
    }

    #[test]
    fn custom_institution_column_is_excluded_from_metrics() {
        let config = Config {
            institution_column: "name".into(),
            ..Config::default()
        };
        let dataset = Dataset::from_text("name,Enrollment 2020\nA,1\n", &config).unwrap();
        assert_eq!(dataset.metrics, vec!["Enrollment"]);
        assert_eq!(dataset.institutions(), vec!["A"]);
    }
}
