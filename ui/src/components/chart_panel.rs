use dioxus::prelude::*;

use crate::chart::{Point, Surface, Tooltip};
use crate::core::state::ComparatorState;
use crate::core::throttle::{Throttle, ThrottleDecision};
use crate::core::{platform, timing};
use crate::t;

pub const CHART_CANVAS_ID: &str = "peerline-chart";

/// Canvas chart with hover tooltips.
///
/// The chart redraws when the snapshot changes or the window is resized.
/// Pointer moves are throttled; the trailing move in each window is always
/// handled so the tooltip settles on where the pointer stopped.
#[component]
pub fn ChartPanel(state: Signal<ComparatorState>) -> Element {
    let mut state = state;
    let mut tooltip = use_signal(|| Option::<Tooltip>::None);
    let throttle_ms = state.peek().config().hover_throttle_ms;
    let mut throttle = use_signal(move || Throttle::<Point>::new(throttle_ms));

    let snapshot = use_memo(move || state.read().chart().snapshot().cloned());
    use_effect(move || {
        let _ = snapshot.read();
        tooltip.set(None);
        with_surface(|surface| state.write().chart_mut().redraw(surface));
    });

    #[cfg(target_arch = "wasm32")]
    use_resize_redraw(state, tooltip);

    let on_move = move |evt: MouseEvent| {
        let coords = evt.element_coordinates();
        let decision = throttle.write().offer(timing::now_ms(), Point::new(coords.x, coords.y));
        match decision {
            ThrottleDecision::RunNow(pointer) => hover_at(state, tooltip, pointer),
            ThrottleDecision::Schedule { delay_ms } => {
                platform::spawn_future(async move {
                    timing::sleep_ms(delay_ms).await;
                    let pending = throttle.write().fire(timing::now_ms());
                    if let Some(pointer) = pending {
                        hover_at(state, tooltip, pointer);
                    }
                });
            }
            ThrottleDecision::Coalesced => {}
        }
    };

    let on_leave = move |_| {
        throttle.write().cancel();
        tooltip.set(None);
        with_surface(|surface| state.write().chart_mut().pointer_left(surface));
    };

    let heading = snapshot().map(|snapshot| (snapshot.metric, snapshot.subtitle));

    rsx! {
        section { class: "panel chart",
            if let Some((metric, subtitle)) = heading {
                div { class: "chart__header",
                    h2 { class: "chart__title", "{metric}" }
                    p { class: "chart__subtitle", "{subtitle}" }
                }
            } else {
                p { class: "panel__placeholder", {t!("chart-placeholder")} }
            }
            div { class: "chart__frame",
                canvas {
                    id: CHART_CANVAS_ID,
                    class: "chart__canvas",
                    role: "img",
                    aria_label: t!("chart-label"),
                    onmousemove: on_move,
                    onmouseleave: on_leave,
                }
                if let Some(tip) = tooltip() {
                    div {
                        class: "chart__tooltip",
                        style: "left: {tip.position.x}px; top: {tip.position.y}px;",
                        "{tip.text}"
                    }
                }
            }
        }
    }
}

fn hover_at(mut state: Signal<ComparatorState>, mut tooltip: Signal<Option<Tooltip>>, pointer: Point) {
    let next = with_surface(|surface| {
        let displayed = surface.logical_size();
        state.write().chart_mut().pointer_moved(surface, pointer, displayed)
    })
    .flatten();
    tooltip.set(next);
}

#[cfg(target_arch = "wasm32")]
fn with_surface<R>(draw: impl FnOnce(&mut dyn Surface) -> R) -> Option<R> {
    use crate::chart::canvas::CanvasSurface;

    match CanvasSurface::from_element_id(CHART_CANVAS_ID) {
        Ok(mut surface) => Some(draw(&mut surface)),
        Err(err) => {
            tracing::warn!(%err, "chart canvas unavailable");
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn with_surface<R>(_draw: impl FnOnce(&mut dyn Surface) -> R) -> Option<R> {
    None
}

/// Redraw the last chart on window resize.
#[cfg(target_arch = "wasm32")]
fn use_resize_redraw(mut state: Signal<ComparatorState>, mut tooltip: Signal<Option<Tooltip>>) {
    use std::rc::Rc;

    use futures_channel::mpsc::UnboundedSender;
    use futures_util::StreamExt;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    let resized = use_coroutine(move |mut rx: UnboundedReceiver<()>| async move {
        while rx.next().await.is_some() {
            tooltip.set(None);
            with_surface(|surface| state.write().chart_mut().redraw(surface));
        }
    });

    let listener = use_hook(move || {
        let tx: UnboundedSender<()> = resized.tx();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let _ = tx.unbounded_send(());
        });
        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("resize", AsRef::<JsValue>::as_ref(&closure).unchecked_ref());
        }
        Rc::new(closure)
    });

    use_drop(move || {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "resize",
                AsRef::<JsValue>::as_ref(&*listener).unchecked_ref(),
            );
        }
    });
}
