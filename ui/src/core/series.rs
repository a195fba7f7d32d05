//! Per-institution value series and the comparison table derived from a dataset.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::dataset::Dataset;
use super::format::{format_value, is_absent, parse_value, FormatOptions, ABSENT};

/// One institution's values for a metric, aligned with the chart's year axis.
/// Missing cells hold [`ABSENT`].
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

impl Series {
    pub fn present_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied().filter(|value| !is_absent(*value))
    }
}

/// Everything the chart needs for one metric and selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    pub metric: String,
    pub subtitle: String,
    pub years: Vec<i32>,
    pub series: Vec<Series>,
}

/// Series for the selected institutions in dataset row order. Only dated
/// entries form the year axis.
pub fn chart_snapshot(dataset: &Dataset, metric: &str, selected: &BTreeSet<String>) -> ChartSnapshot {
    let entries: Vec<_> = dataset
        .group(metric)
        .map(|group| group.dated_entries().collect())
        .unwrap_or_default();
    let years: Vec<i32> = entries.iter().filter_map(|entry| entry.year).collect();

    let series = dataset
        .rows
        .iter()
        .filter(|row| selected.contains(dataset.institution(row)))
        .map(|row| Series {
            name: display_name(dataset.institution(row)),
            values: entries
                .iter()
                .map(|entry| row.get(&entry.column).map_or(ABSENT, |cell| parse_value(cell)))
                .collect(),
        })
        .collect();

    let subtitle = if years.is_empty() {
        "No year data".to_string()
    } else {
        let labels: Vec<String> = years.iter().map(i32::to_string).collect();
        format!("Years: {}", labels.join(" – "))
    };

    ChartSnapshot {
        metric: metric.to_string(),
        subtitle,
        years,
        series,
    }
}

fn display_name(name: &str) -> String {
    if name.is_empty() {
        "Unknown".to_string()
    } else {
        name.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Name,
    LatestValue,
}

impl SortMode {
    pub fn key(self) -> &'static str {
        match self {
            SortMode::Name => "name",
            SortMode::LatestValue => "value",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "value" => SortMode::LatestValue,
            _ => SortMode::Name,
        }
    }
}

/// Table column; `None` is the undated ("static") value.
pub type TableColumn = Option<i32>;

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub name: String,
    pub cells: Vec<String>,
    latest: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonTable {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

pub fn comparison_table(
    dataset: &Dataset,
    metric: &str,
    selected: &BTreeSet<String>,
    sort: SortMode,
) -> ComparisonTable {
    let Some(group) = dataset.group(metric) else {
        return ComparisonTable::default();
    };
    let columns: Vec<TableColumn> = group.entries.iter().map(|entry| entry.year).collect();
    let latest_column = group
        .entries
        .iter()
        .rev()
        .find(|entry| entry.year.is_some())
        .map(|entry| entry.column.as_str());

    let mut rows: Vec<TableRow> = dataset
        .rows
        .iter()
        .filter(|row| selected.contains(dataset.institution(row)))
        .map(|row| {
            let cell = |column: &str| row.get(column).map(String::as_str).unwrap_or_default();
            TableRow {
                name: display_name(dataset.institution(row)),
                cells: group
                    .entries
                    .iter()
                    .map(|entry| format_value(cell(&entry.column), metric, FormatOptions { empty: "—" }))
                    .collect(),
                latest: latest_column.map_or(ABSENT, |column| parse_value(cell(column))),
            }
        })
        .collect();

    match sort {
        SortMode::LatestValue if latest_column.is_some() => {
            rows.sort_by(|a, b| descending_value(a.latest, b.latest).then_with(|| by_name(&a.name, &b.name)))
        }
        _ => rows.sort_by(|a, b| by_name(&a.name, &b.name)),
    }

    ComparisonTable { columns, rows }
}

fn descending_value(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}
