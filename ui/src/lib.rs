//! Shared UI crate for Peerline: the metric comparator's logic, chart engine and views.

pub mod chart;
pub mod core;
pub mod i18n;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;

    mod chart_panel;
    pub use chart_panel::{ChartPanel, CHART_CANVAS_ID};

    mod controls;
    pub use controls::{MetricPicker, SortPicker};

    mod dataset_loader;
    pub use dataset_loader::DatasetLoader;

    mod definition_card;
    pub use definition_card::DefinitionCard;

    mod institution_list;
    pub use institution_list::InstitutionChecklist;

    mod results_table;
    pub use results_table::ResultsTable;
}
