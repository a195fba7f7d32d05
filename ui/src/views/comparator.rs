use dioxus::prelude::*;
use tracing::info;

use crate::components::{
    ChartPanel, DatasetLoader, DefinitionCard, InstitutionChecklist, MetricPicker, ResultsTable,
    SortPicker,
};
use crate::core::config::config;
use crate::core::dataset::Dataset;
use crate::core::state::ComparatorState;
use crate::core::{glossary, source};
use crate::t;

const COMPARATOR_CSS: Asset = asset!("/assets/styling/comparator.css");

#[component]
pub fn Comparator() -> Element {
    // Subscribe to the global language code so localized chrome refreshes.
    let lang_code: Option<Signal<String>> = try_use_context::<Signal<String>>();
    let _lang_marker = lang_code.as_ref().map(|code| code()).unwrap_or_default();

    let state = use_signal(|| ComparatorState::new(config().clone()));
    use_startup_loads(state);

    rsx! {
        document::Link { rel: "stylesheet", href: COMPARATOR_CSS }
        main { class: "page comparator",
            div { style: "display:none", "{_lang_marker}" }
            aside { class: "comparator__sidebar",
                DatasetLoader { state }
                section { class: "panel controls",
                    MetricPicker { state }
                    SortPicker { state }
                }
                InstitutionChecklist { state }
            }
            div { class: "comparator__main",
                ChartPanel { state }
                DefinitionCard { state }
                ResultsTable { state }
            }
        }
    }
}

/// Fetch the default dataset and the glossary once, when the page mounts.
///
/// An unreachable default dataset is not reported; the loader simply waits
/// for a file.
fn use_startup_loads(state: Signal<ComparatorState>) {
    let mut state = state;
    use_hook(move || {
        if let Some(url) = config().default_dataset_url.as_deref() {
            let url = source::raw_content_url(url);
            spawn(async move {
                let ticket = state.write().begin_load(t!("loader-fetching"));
                match source::fetch_text(&url).await {
                    Ok(text) => {
                        state.write().finish_load(ticket, Dataset::from_text(&text, config()));
                    }
                    Err(err) => {
                        info!(%url, %err, "default dataset unavailable");
                        state.write().abandon_load(ticket);
                    }
                }
            });
        }

        spawn(async move {
            if let Some(found) = glossary::load_first(&config().glossary_sources).await {
                state.write().set_glossary(found);
            }
        });
    });
}
