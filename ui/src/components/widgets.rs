//! Small presentational building blocks shared by the workspace views.

use dioxus::prelude::*;

use crate::analysis::Verdict;
use crate::results::{verdict_label, verdict_tone};
use crate::t;

#[component]
pub fn AppFooter() -> Element {
    let year = time::OffsetDateTime::now_utc().year();
    rsx! {
        footer { class: "app-footer",
            span { {t!("footer-copyright", year = year)} }
            span { class: "app-footer__note", {t!("footer-note")} }
        }
    }
}

#[component]
pub fn StatusBadge(verdict: Verdict) -> Element {
    let tone = verdict_tone(&verdict);
    let label = verdict_label(&verdict);
    rsx! {
        span { class: "status-badge status-badge--{tone}", "{label}" }
    }
}

/// Coloured tile with an icon, a label and a single figure.
#[component]
pub fn StatCard(label: String, value: String, icon: &'static str, tone: &'static str) -> Element {
    rsx! {
        div { class: "stat-card stat-card--{tone}",
            div { class: "stat-card__text",
                span { class: "stat-card__label", "{label}" }
                strong { class: "stat-card__value", "{value}" }
            }
            span { class: "stat-card__icon", aria_hidden: "true", "{icon}" }
        }
    }
}

#[component]
pub fn SearchBox(value: String, placeholder: String, on_input: EventHandler<String>) -> Element {
    rsx! {
        label { class: "search-box",
            span { class: "visually-hidden", "{placeholder}" }
            input {
                r#type: "search",
                class: "search-box__input",
                placeholder: "{placeholder}",
                value: "{value}",
                oninput: move |evt: FormEvent| on_input.call(evt.value()),
            }
        }
    }
}

/// Full-screen overlay shown while an analysis request is in flight.
#[component]
pub fn ProgressOverlay(progress: u8) -> Element {
    let width = progress.min(100);
    rsx! {
        div { class: "progress-overlay", role: "dialog", aria_modal: "true",
            div { class: "progress-overlay__card",
                div { class: "progress-overlay__spinner", aria_hidden: "true" }
                h3 { {t!("progress-title")} }
                p { {t!("progress-hint")} }
                div {
                    class: "progress-bar",
                    role: "progressbar",
                    aria_valuemin: "0",
                    aria_valuemax: "100",
                    aria_valuenow: "{width}",
                    div { class: "progress-bar__fill", style: "width: {width}%;" }
                }
                span { class: "progress-overlay__value", "{width}%" }
            }
        }
    }
}
