//! Application state for the comparator.
//!
//! Components hold one [`ComparatorState`] in a signal and call the operations
//! below; nothing else mutates the dataset, the selection or the chart.

use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::chart::{ChartSession, HitSettings};

use super::config::Config;
use super::dataset::Dataset;
use super::error::{LoadError, LoadResult};
use super::glossary::{Definition, Glossary};
use super::series::{chart_snapshot, comparison_table, ComparisonTable, SortMode};

/// Status line shown under the loader. Only `Working` carries display text;
/// the other states are rendered in the active language by the loader.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Working(String),
    Done { institutions: usize, metrics: usize },
    Error(LoadError),
}

/// Identifies one load attempt. Only the most recently issued ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct ComparatorState {
    config: Config,
    dataset: Option<Dataset>,
    metric: Option<String>,
    selected: BTreeSet<String>,
    sort: SortMode,
    status: LoadStatus,
    glossary: Glossary,
    chart: ChartSession,
    issued: u64,
}

impl ComparatorState {
    pub fn new(config: Config) -> Self {
        let chart = ChartSession::new(
            config.max_ticks,
            HitSettings {
                line_threshold_px: config.line_hit_threshold_px,
                bar_padding_px: config.bar_hit_padding_px,
            },
        );
        Self {
            config,
            dataset: None,
            metric: None,
            selected: BTreeSet::new(),
            sort: SortMode::default(),
            status: LoadStatus::Idle,
            glossary: Glossary::default(),
            chart,
            issued: 0,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn metric(&self) -> Option<&str> {
        self.metric.as_deref()
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, institution: &str) -> bool {
        self.selected.contains(institution)
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn chart(&self) -> &ChartSession {
        &self.chart
    }

    pub fn chart_mut(&mut self) -> &mut ChartSession {
        &mut self.chart
    }

    pub fn begin_load(&mut self, message: impl Into<String>) -> LoadTicket {
        self.issued += 1;
        self.status = LoadStatus::Working(message.into());
        LoadTicket(self.issued)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply the outcome of a load. Returns `false` when the ticket was superseded.
    ///
    /// A failure leaves the previous dataset, selection and chart in place.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: LoadResult<Dataset>) -> bool {
        if !self.is_current(ticket) {
            warn!(ticket = ticket.0, latest = self.issued, "stale load discarded");
            return false;
        }
        match result {
            Ok(dataset) => {
                info!(
                    institutions = dataset.institutions().len(),
                    metrics = dataset.metrics.len(),
                    "dataset installed"
                );
                self.status = LoadStatus::Done {
                    institutions: dataset.rows.len(),
                    metrics: dataset.metrics.len(),
                };
                self.install(dataset);
            }
            Err(err) => {
                warn!(%err, "load failed");
                self.status = LoadStatus::Error(err);
            }
        }
        true
    }

    /// Give up on a load without reporting it, e.g. an unreachable default
    /// source. The status returns to idle so the user can pick a file.
    pub fn abandon_load(&mut self, ticket: LoadTicket) {
        if self.is_current(ticket) {
            self.status = LoadStatus::Idle;
        }
    }

    /// Surface an error that happened before a load could start.
    pub fn report_error(&mut self, err: LoadError) {
        self.status = LoadStatus::Error(err);
    }

    fn install(&mut self, dataset: Dataset) {
        self.selected = dataset.institutions().into_iter().collect();
        self.metric = dataset.metrics.first().cloned();
        self.dataset = Some(dataset);
        self.refresh_chart();
    }

    pub fn select_metric(&mut self, metric: &str) {
        let known = self
            .dataset
            .as_ref()
            .is_some_and(|dataset| dataset.group(metric).is_some());
        if known {
            self.metric = Some(metric.to_string());
            self.refresh_chart();
        }
    }

    pub fn toggle_institution(&mut self, institution: &str) {
        if !self.selected.remove(institution) {
            self.selected.insert(institution.to_string());
        }
        self.refresh_chart();
    }

    pub fn select_all(&mut self) {
        self.selected = self
            .dataset
            .as_ref()
            .map(|dataset| dataset.institutions().into_iter().collect())
            .unwrap_or_default();
        self.refresh_chart();
    }

    pub fn select_none(&mut self) {
        self.selected.clear();
        self.refresh_chart();
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
        self.refresh_chart();
    }

    pub fn set_glossary(&mut self, glossary: Glossary) {
        self.glossary = glossary;
    }

    /// Rows for the results table under the current metric, selection and sort.
    pub fn table(&self) -> ComparisonTable {
        match (&self.dataset, &self.metric) {
            (Some(dataset), Some(metric)) => comparison_table(dataset, metric, &self.selected, self.sort),
            _ => ComparisonTable::default(),
        }
    }

    pub fn definition(&self) -> Option<Definition> {
        self.metric.as_deref().map(|metric| self.glossary.describe(metric))
    }

    fn refresh_chart(&mut self) {
        let snapshot = match (&self.dataset, &self.metric) {
            (Some(dataset), Some(metric)) => Some(chart_snapshot(dataset, metric, &self.selected)),
            _ => None,
        };
        self.chart.show(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "instnm,Enrollment 2020,Enrollment 2021,Admission rate 2021\n\
        Oakland University,100,110,0.8\n\
        Wayne State University,200,210,0.7\n";

    fn dataset(text: &str) -> LoadResult<Dataset> {
        Dataset::from_text(text, &Config::default())
    }

    fn loaded() -> ComparatorState {
        let mut state = ComparatorState::new(Config::default());
        let ticket = state.begin_load("Loading…");
        assert!(state.finish_load(ticket, dataset(SAMPLE)));
        state
    }

    #[test]
    fn load_selects_everything_and_first_metric() {
        let state = loaded();
        assert_eq!(state.metric(), Some("Admission rate"));
        assert_eq!(state.selected().len(), 2);
        assert_eq!(
            state.status(),
            &LoadStatus::Done {
                institutions: 2,
                metrics: 2
            }
        );
        assert!(state.chart().snapshot().is_some());
    }

    #[test]
    fn stale_tickets_are_ignored() {
        let mut state = ComparatorState::new(Config::default());
        let first = state.begin_load("first");
        let second = state.begin_load("second");
        assert!(!state.finish_load(first, dataset(SAMPLE)));
        assert!(state.dataset().is_none());
        assert!(state.finish_load(second, dataset("instnm,Rate 2020\nA,1\n")));
        assert_eq!(state.metric(), Some("Rate"));
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = loaded();
        let ticket = state.begin_load("again");
        assert!(state.finish_load(ticket, Err(LoadError::EmptyInput)));
        assert!(state.dataset().is_some());
        assert_eq!(state.status(), &LoadStatus::Error(LoadError::EmptyInput));
    }

    #[test]
    fn abandoned_default_load_returns_to_idle() {
        let mut state = ComparatorState::new(Config::default());
        let ticket = state.begin_load("default");
        state.abandon_load(ticket);
        assert_eq!(state.status(), &LoadStatus::Idle);

        let stale = state.begin_load("default");
        let _manual = state.begin_load("file");
        state.abandon_load(stale);
        assert!(matches!(state.status(), LoadStatus::Working(_)));
    }

    #[test]
    fn selection_operations_update_the_chart() {
        let mut state = loaded();
        state.select_metric("Enrollment");
        state.toggle_institution("Oakland University");
        let snapshot = state.chart().snapshot().unwrap();
        assert_eq!(snapshot.metric, "Enrollment");
        assert_eq!(snapshot.series.len(), 1);

        state.select_none();
        assert!(state.chart().snapshot().unwrap().series.is_empty());
        state.select_all();
        assert_eq!(state.chart().snapshot().unwrap().series.len(), 2);

        state.toggle_institution("Oakland University");
        state.toggle_institution("Oakland University");
        assert!(state.is_selected("Oakland University"));
    }

    #[test]
    fn unknown_metric_is_ignored() {
        let mut state = loaded();
        state.select_metric("Nope");
        assert_eq!(state.metric(), Some("Admission rate"));
    }

    #[test]
    fn table_follows_sort_mode() {
        let mut state = loaded();
        state.select_metric("Enrollment");
        state.set_sort(SortMode::LatestValue);
        let names: Vec<_> = state.table().rows.into_iter().map(|row| row.name).collect();
        assert_eq!(names, vec!["Wayne State University", "Oakland University"]);
    }

    #[test]
    fn definition_uses_glossary_for_current_metric() {
        let state = loaded();
        let definition = state.definition().unwrap();
        assert_eq!(definition.title, "Admission rate");
        assert!(!definition.found);
    }
}
