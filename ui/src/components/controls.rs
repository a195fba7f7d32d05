use dioxus::prelude::*;

use crate::core::series::SortMode;
use crate::core::state::ComparatorState;
use crate::t;

#[component]
pub fn MetricPicker(state: Signal<ComparatorState>) -> Element {
    let mut state = state;
    let (metrics, current) = {
        let snapshot = state.read();
        let metrics = snapshot
            .dataset()
            .map(|dataset| dataset.metrics.clone())
            .unwrap_or_default();
        (metrics, snapshot.metric().unwrap_or_default().to_string())
    };

    rsx! {
        div { class: "field",
            label { class: "field__label", r#for: "metric-select", {t!("metric-label")} }
            select {
                id: "metric-select",
                class: "field__input",
                disabled: metrics.is_empty(),
                value: "{current}",
                onchange: move |evt: FormEvent| state.write().select_metric(&evt.value()),
                if metrics.is_empty() {
                    option { value: "", {t!("metric-placeholder")} }
                }
                for metric in metrics.clone() {
                    option {
                        key: "{metric}",
                        value: "{metric}",
                        selected: metric == current,
                        "{metric}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn SortPicker(state: Signal<ComparatorState>) -> Element {
    let mut state = state;
    let current = state.read().sort();

    rsx! {
        div { class: "field",
            label { class: "field__label", r#for: "sort-select", {t!("sort-label")} }
            select {
                id: "sort-select",
                class: "field__input",
                value: "{current.key()}",
                onchange: move |evt: FormEvent| state.write().set_sort(SortMode::from_key(&evt.value())),
                option {
                    value: SortMode::Name.key(),
                    selected: current == SortMode::Name,
                    {t!("sort-name")}
                }
                option {
                    value: SortMode::LatestValue.key(),
                    selected: current == SortMode::LatestValue,
                    {t!("sort-value")}
                }
            }
        }
    }
}
