use dioxus::prelude::*;

use crate::core::state::ComparatorState;
use crate::t;

#[component]
pub fn DefinitionCard(state: Signal<ComparatorState>) -> Element {
    let definition = state.read().definition();

    rsx! {
        section { class: "panel definition",
            h2 { class: "panel__title", {t!("definition-heading")} }
            if let Some(definition) = definition {
                h3 { class: "definition__title", "{definition.title}" }
                p { class: body_class(definition.found), "{definition.body}" }
                p { class: "definition__source",
                    {t!("definition-source", source = definition.source.clone())}
                }
            } else {
                p { class: "panel__placeholder", {t!("definition-placeholder")} }
            }
        }
    }
}

fn body_class(found: bool) -> &'static str {
    if found {
        "definition__body"
    } else {
        "definition__body definition__body--missing"
    }
}
