use std::sync::Arc;

use dioxus::html::{FileEngine, HasFileData};
use dioxus::prelude::*;
use i18n_embed::fluent::FluentLanguageLoader;

use crate::core::config::config;
use crate::core::dataset::Dataset;
use crate::core::error::LoadError;
use crate::core::platform;
use crate::core::state::{ComparatorState, LoadStatus};
use crate::i18n::{fl, LOADER};
use crate::t;

/// File picker plus the load status line.
#[component]
pub fn DatasetLoader(state: Signal<ComparatorState>) -> Element {
    let mut state = state;
    let mut chosen = use_signal(|| Option::<Arc<dyn FileEngine>>::None);

    let on_pick = move |evt: FormEvent| {
        chosen.set(evt.files());
    };

    let on_load = move |_| {
        let picked = chosen().and_then(|files| {
            let name = files.files().into_iter().next()?;
            Some((files, name))
        });
        let Some((files, name)) = picked else {
            state.write().report_error(LoadError::NoFileSelected);
            return;
        };

        let ticket = state.write().begin_load(t!("loader-reading", name = name.clone()));
        platform::spawn_future(async move {
            let result = match files.read_file_to_string(&name).await {
                Some(text) => Dataset::from_text(&text, config()),
                None => Err(LoadError::Read(name)),
            };
            state.write().finish_load(ticket, result);
        });
    };

    let status_class = match state.read().status() {
        LoadStatus::Idle => "loader__status",
        LoadStatus::Working(_) => "loader__status loader__status--working",
        LoadStatus::Done { .. } => "loader__status loader__status--success",
        LoadStatus::Error(_) => "loader__status loader__status--error",
    };
    let status_text = status_message(&LOADER, state.read().status());
    let busy = matches!(state.read().status(), LoadStatus::Working(_));

    rsx! {
        section { class: "panel loader",
            h2 { class: "panel__title", {t!("loader-heading")} }
            div { class: "loader__controls",
                label { class: "visually-hidden", r#for: "dataset-file", {t!("loader-file-label")} }
                input {
                    id: "dataset-file",
                    r#type: "file",
                    accept: ".csv,text/csv",
                    onchange: on_pick,
                }
                button {
                    r#type: "button",
                    class: "button",
                    disabled: busy,
                    onclick: on_load,
                    {t!("loader-load")}
                }
            }
            p { class: "{status_class}", role: "status", "{status_text}" }
        }
    }
}

/// Status line text in the loader's current language.
pub(crate) fn status_message(loader: &FluentLanguageLoader, status: &LoadStatus) -> String {
    match status {
        LoadStatus::Idle => fl!(loader, "loader-idle"),
        LoadStatus::Working(label) => label.clone(),
        LoadStatus::Done { institutions, metrics } => fl!(
            loader,
            "loader-done",
            institutions = (*institutions),
            metrics = (*metrics)
        ),
        LoadStatus::Error(err) => format!("⚠️ {}", error_message(loader, err)),
    }
}

fn error_message(loader: &FluentLanguageLoader, err: &LoadError) -> String {
    match err {
        LoadError::EmptyInput => fl!(loader, "loader-error-empty"),
        LoadError::NoFileSelected => fl!(loader, "loader-error-no-file"),
        LoadError::Read(name) => fl!(loader, "loader-error-read", name = name.as_str()),
        LoadError::Fetch { url, reason } => fl!(
            loader,
            "loader-error-fetch",
            url = url.as_str(),
            reason = reason.as_str()
        ),
        LoadError::HttpStatus { url, status } => fl!(
            loader,
            "loader-error-http",
            url = url.as_str(),
            status = (*status)
        ),
        LoadError::Unsupported(feature) => fl!(loader, "loader-error-unsupported", feature = (*feature)),
        LoadError::Glossary(reason) => fl!(loader, "loader-error-glossary", reason = reason.as_str()),
    }
}
