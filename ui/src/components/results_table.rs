use dioxus::prelude::*;

use crate::core::state::ComparatorState;
use crate::t;

#[component]
pub fn ResultsTable(state: Signal<ComparatorState>) -> Element {
    let table = state.read().table();
    let static_label = t!("table-static");
    let headings: Vec<String> = table
        .columns
        .iter()
        .map(|column| match column {
            Some(year) => year.to_string(),
            None => static_label.clone(),
        })
        .collect();

    rsx! {
        section { class: "panel results",
            h2 { class: "panel__title", {t!("table-heading")} }
            if table.rows.is_empty() {
                p { class: "panel__placeholder", {t!("table-empty")} }
            } else {
                div { class: "results__scroll",
                    table { class: "results__table",
                        thead {
                            tr {
                                th { scope: "col", {t!("table-institution")} }
                                for heading in headings {
                                    th { scope: "col", class: "results__num", "{heading}" }
                                }
                            }
                        }
                        tbody {
                            for row in table.rows {
                                tr { key: "{row.name}",
                                    th { scope: "row", "{row.name}" }
                                    for cell in row.cells {
                                        td { class: "results__num", "{cell}" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
