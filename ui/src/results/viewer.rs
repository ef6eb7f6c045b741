//! Embedded PDF preview driven through the `contractViewer` JavaScript bridge.
//!
//! Rust never talks to pdf.js directly. Every interaction is a small script
//! built from [`ViewerCommand`]s and run with `document::eval`; the bridge
//! queues scripts that arrive before it has loaded.

use std::rc::Rc;

use dioxus::prelude::*;

use crate::analysis::UploadedFile;
use crate::core::platform::DocumentUrl;
use crate::t;

const CONTAINER_ID: &str = "contract-viewer";

/// Colour family used for highlighted spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightTone {
    Compliant,
    #[default]
    NonCompliant,
}

impl HighlightTone {
    pub fn class(&self) -> &'static str {
        match self {
            HighlightTone::Compliant => "pdf-highlight-compliance",
            HighlightTone::NonCompliant => "pdf-highlight-non-compliance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerCommand {
    Open { url: String },
    Clear,
    Highlight { term: String },
}

/// Split a newline-joined clause selection into literal search terms:
/// any newline variant separates, lines are trimmed and blanks dropped.
pub fn highlight_terms(selection: &str) -> Vec<String> {
    selection
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\n', '\r']))
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Highlights are never additive: every selection change starts with a clear.
pub(crate) fn commands_for_selection(selection: &str) -> Vec<ViewerCommand> {
    std::iter::once(ViewerCommand::Clear)
        .chain(
            highlight_terms(selection)
                .into_iter()
                .map(|term| ViewerCommand::Highlight { term }),
        )
        .collect()
}

/// Opening starts a fresh bridge entry with no terms, so the current
/// selection is replayed right after it.
pub(crate) fn commands_for_open(url: &str, selection: &str) -> Vec<ViewerCommand> {
    std::iter::once(ViewerCommand::Open { url: url.to_string() })
        .chain(commands_for_selection(selection))
        .collect()
}

pub(crate) fn viewer_script(container: &str, commands: &[ViewerCommand]) -> String {
    let target = js_string(container);
    let body: String = commands
        .iter()
        .map(|command| match command {
            ViewerCommand::Open { url } => format!("viewer.open({target}, {});", js_string(url)),
            ViewerCommand::Clear => format!("viewer.clearHighlights({target});"),
            ViewerCommand::Highlight { term } => {
                format!("viewer.highlight({target}, {});", js_string(term))
            }
        })
        .collect();

    format!(
        "(function(run) {{ if (window.contractViewer) {{ run(window.contractViewer); }} \
         else {{ (window.__contractViewerPending = window.__contractViewerPending || []).push(run); }} }})\
         (function(viewer) {{ {body} }});"
    )
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}

fn run_commands(commands: &[ViewerCommand]) {
    let _ = document::eval(&viewer_script(CONTAINER_ID, commands));
}

#[component]
pub fn DocumentViewer(
    file: ReadOnlySignal<Option<UploadedFile>>,
    clause_selection: ReadOnlySignal<String>,
    tone: HighlightTone,
    contract_link: Option<String>,
    full_text: Option<String>,
) -> Element {
    // Dropping the previous value revokes its object URL.
    let preview = use_memo(move || {
        file().map(|file| DocumentUrl::for_bytes(&file.bytes, file.mime()).map(Rc::new))
    });

    use_effect(move || {
        if let Some(Ok(url)) = preview() {
            run_commands(&commands_for_open(url.as_str(), &clause_selection.peek()));
        }
    });

    use_effect(move || {
        run_commands(&commands_for_selection(&clause_selection()));
    });

    let file_name = file().map(|file| file.name);

    let body = match preview() {
        Some(Ok(_)) => rsx! {
            div { id: CONTAINER_ID, class: "document-viewer__pages" }
        },
        Some(Err(err)) => {
            tracing::warn!("PDF preview unavailable: {err}");
            fallback(full_text)
        }
        None => fallback(full_text),
    };

    rsx! {
        section { class: "document-viewer {tone.class()}",
            div { class: "document-viewer__header",
                h3 { class: "document-viewer__title",
                    {file_name.unwrap_or_else(|| t!("viewer-title"))}
                }
                if let Some(link) = contract_link {
                    a {
                        class: "document-viewer__link",
                        href: "{link}",
                        target: "_blank",
                        rel: "noopener noreferrer",
                        {t!("viewer-open-original")}
                    }
                }
            }
            {body}
        }
    }
}

fn fallback(full_text: Option<String>) -> Element {
    match full_text.filter(|text| !text.trim().is_empty()) {
        Some(text) => rsx! {
            pre { class: "document-viewer__text", "{text}" }
        },
        None => rsx! {
            div { class: "document-viewer__empty", {t!("viewer-no-pdf")} }
        },
    }
}
