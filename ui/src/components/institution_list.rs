use dioxus::prelude::*;

use crate::core::institutions::{code_for, color_for};
use crate::core::state::ComparatorState;
use crate::t;

#[component]
pub fn InstitutionChecklist(state: Signal<ComparatorState>) -> Element {
    let mut state = state;
    let entries: Vec<(String, bool)> = {
        let snapshot = state.read();
        snapshot
            .dataset()
            .map(|dataset| dataset.institutions())
            .unwrap_or_default()
            .into_iter()
            .map(|name| {
                let checked = snapshot.is_selected(&name);
                (name, checked)
            })
            .collect()
    };
    let total = entries.len();
    let selected = entries.iter().filter(|(_, checked)| *checked).count();

    rsx! {
        section { class: "panel institutions",
            div { class: "panel__header",
                h2 { class: "panel__title", {t!("institutions-heading")} }
                if total > 0 {
                    span { class: "panel__meta",
                        {t!("institutions-count", selected = selected, total = total)}
                    }
                }
            }
            div { class: "institutions__actions",
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: total == 0,
                    onclick: move |_| state.write().select_all(),
                    {t!("institutions-all")}
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    disabled: total == 0,
                    onclick: move |_| state.write().select_none(),
                    {t!("institutions-none")}
                }
            }
            if entries.is_empty() {
                p { class: "panel__placeholder", {t!("institutions-empty")} }
            } else {
                ul { class: "institutions__list",
                    for (name, checked) in entries {
                        {render_entry(name, checked, state)}
                    }
                }
            }
        }
    }
}

fn render_entry(name: String, checked: bool, mut state: Signal<ComparatorState>) -> Element {
    let color = color_for(&name);
    let code = code_for(&name).to_string();
    let item_class = if checked {
        "institutions__item institutions__item--selected"
    } else {
        "institutions__item"
    };
    let toggle_name = name.clone();

    rsx! {
        li { key: "{name}", class: "{item_class}",
            label { class: "institutions__label",
                input {
                    r#type: "checkbox",
                    checked,
                    onchange: move |_| state.write().toggle_institution(&toggle_name),
                }
                span {
                    class: "institutions__swatch",
                    style: "background-color: {color}",
                    aria_hidden: "true",
                }
                span { class: "institutions__name", "{name}" }
                span { class: "institutions__code", "{code}" }
            }
        }
    }
}
