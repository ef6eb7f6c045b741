use std::rc::Rc;

use dioxus::prelude::*;

use crate::{
    analysis::{AnalysisResult, UploadedFile, Verdict},
    components::StatCard,
    core::{config::ApiConfig, format, session::use_session},
    results::{
        summarize, DetailPanel, DocumentViewer, HealthGauge, HighlightTone, ObligationList,
        ReportActions, StatusDistribution, WorkspaceState,
    },
    t,
};

/// Dashboard for one completed analysis. The workspace selection is owned by
/// the caller, which clears it when the next run starts.
#[component]
pub fn ResultsView(
    result: Rc<AnalysisResult>,
    workspace: Signal<WorkspaceState>,
    contract: Option<UploadedFile>,
    elapsed_ms: Option<u64>,
    api: ApiConfig,
    on_reset: EventHandler<()>,
) -> Element {
    let session = use_session();
    let clause_selection = workspace.read().clause_selection.clone();

    let operator = session
        .read()
        .username()
        .map(str::to_string)
        .unwrap_or_else(|| t!("user-fallback"));
    let summary = summarize(&result.results);
    let processing = elapsed_ms
        .map(format::format_seconds)
        .unwrap_or_else(|| "—".to_string());

    let selected_verdict = workspace
        .read()
        .selected
        .and_then(|id| result.finding(id))
        .map(|finding| finding.is_present.clone());
    let tone = match selected_verdict {
        Some(Verdict::Compliant) => HighlightTone::Compliant,
        _ => HighlightTone::NonCompliant,
    };
    let contract_link = result.contract_url.as_deref().map(|link| api.resolve(link));

    rsx! {
        section { class: "results",
            div { class: "results__header",
                div {
                    h2 { class: "results__title", {t!("results-title")} }
                    span { class: "results__welcome", {t!("results-welcome", name = operator.clone())} }
                }
                div { class: "results__actions",
                    ReportActions { result: result.clone(), operator: operator.clone() }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        onclick: move |_| on_reset.call(()),
                        {t!("results-reset")}
                    }
                }
            }

            div { class: "results__overview",
                div { class: "results__stats",
                    StatCard { label: t!("stat-total"), value: summary.total.to_string(), icon: "📊", tone: "total" }
                    StatCard { label: t!("stat-compliant"), value: summary.compliant.to_string(), icon: "✓", tone: "compliant" }
                    StatCard { label: t!("stat-non-compliant"), value: summary.non_compliant.to_string(), icon: "⚠", tone: "non-compliant" }
                    StatCard { label: t!("stat-processing-time"), value: processing, icon: "⚡", tone: "time" }
                }
                HealthGauge { summary }
                StatusDistribution { summary }
            }

            div { class: "results__workspace",
                div { class: "results__column results__column--list",
                    ObligationList { result: result.clone(), workspace }
                }
                div { class: "results__column results__column--viewer",
                    DocumentViewer {
                        file: contract.clone(),
                        clause_selection,
                        tone,
                        contract_link,
                        full_text: result.full_text.clone(),
                    }
                }
                div { class: "results__column results__column--detail",
                    DetailPanel { result: result.clone(), workspace }
                }
            }
        }
    }
}
