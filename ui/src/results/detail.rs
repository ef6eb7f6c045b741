use std::rc::Rc;

use dioxus::prelude::*;

use crate::{
    analysis::{AnalysisResult, ObligationFinding, StepStatus},
    components::StatusBadge,
    core::format,
    results::{step_description, DetailTab, WorkspaceState},
    t,
};

#[component]
pub fn DetailPanel(result: Rc<AnalysisResult>, workspace: Signal<WorkspaceState>) -> Element {
    let state = workspace();
    let finding = selected_finding(&result, &state);

    rsx! {
        section { class: "results-card detail-panel",
            match finding {
                Some(finding) => render_finding(finding, state, workspace),
                None => rsx! {
                    div { class: "detail-panel__placeholder",
                        span { class: "detail-panel__placeholder-title", {t!("detail-no-selection")} }
                        p { {t!("detail-no-selection-hint")} }
                    }
                },
            }
        }
    }
}

fn render_finding(
    finding: ObligationFinding,
    state: WorkspaceState,
    mut workspace: Signal<WorkspaceState>,
) -> Element {
    let has_suggestion = finding.remediation().is_some();
    let tabs = [
        (DetailTab::Details, t!("tab-details")),
        (DetailTab::Evidence, t!("tab-evidence")),
        (DetailTab::Suggestion, t!("tab-suggestion")),
    ];

    let content = match state.active_tab {
        DetailTab::Details => render_details(&finding, &state, workspace),
        DetailTab::Evidence => render_evidence(&finding, &state, workspace),
        DetailTab::Suggestion => render_suggestion(&finding),
    };

    rsx! {
        div { class: "detail-panel__header",
            div { class: "detail-panel__meta",
                StatusBadge { verdict: finding.is_present.clone() }
                span { class: "detail-panel__id", "ID: {finding.id.label()}" }
            }
            h2 { class: "detail-panel__title", "{finding.obligation}" }
        }

        div { class: "detail-tabs", role: "tablist",
            for (tab, label) in tabs {
                button {
                    key: "{label}",
                    r#type: "button",
                    role: "tab",
                    aria_selected: state.active_tab == tab,
                    class: if state.active_tab == tab { "detail-tabs__tab detail-tabs__tab--active" } else { "detail-tabs__tab" },
                    onclick: move |_| workspace.with_mut(|ws| ws.switch_tab(tab)),
                    "{label}"
                    if tab == DetailTab::Suggestion && has_suggestion {
                        span { class: "detail-tabs__badge", "1" }
                    }
                }
            }
        }

        div { class: "detail-panel__content", {content} }
    }
}

fn render_details(
    finding: &ObligationFinding,
    state: &WorkspaceState,
    mut workspace: Signal<WorkspaceState>,
) -> Element {
    let confidence = format::format_optional_number(finding.confidence);
    let similarity = format::format_optional_number(finding.similarity_score);

    rsx! {
        div { class: "detail-reasoning",
            span { class: "detail-reasoning__label", {t!("detail-reasoning")} }
            p { class: "detail-reasoning__text", "{finding.reason}" }
            if !confidence.is_empty() || !similarity.is_empty() {
                dl { class: "detail-reasoning__scores",
                    if !confidence.is_empty() {
                        dt { {t!("detail-confidence")} }
                        dd { "{confidence}%" }
                    }
                    if !similarity.is_empty() {
                        dt { {t!("detail-similarity")} }
                        dd { "{similarity}" }
                    }
                }
            }
        }

        h4 { class: "detail-steps__title", {t!("detail-validation-steps")} }
        if finding.cot_steps.is_empty() {
            p { class: "results-card__placeholder", {t!("detail-no-steps")} }
        } else {
            ul { class: "detail-steps",
                for (index, step) in finding.cot_steps.iter().enumerate() {
                    li {
                        key: "{index}",
                        class: StepTone::of(&step.status).class(),
                        onclick: move |_| workspace.with_mut(|ws| ws.toggle_step(index)),
                        div { class: "detail-step__heading",
                            span { class: "detail-step__icon", aria_hidden: "true",
                                {StepTone::of(&step.status).icon()}
                            }
                            span { class: "detail-step__name", "{step.step_name}" }
                            if step.is_critical {
                                span { class: "detail-step__critical", {t!("detail-critical")} }
                            }
                            span {
                                class: "detail-step__info",
                                title: step_description(&step.step_name, &step.finding),
                                onclick: move |evt| evt.stop_propagation(),
                                "ⓘ"
                            }
                            span { class: "detail-step__chevron", aria_hidden: "true",
                                if state.is_step_expanded(index) { "▴" } else { "▾" }
                            }
                        }
                        if state.is_step_expanded(index) {
                            p { class: "detail-step__finding", "{step.finding}" }
                        }
                    }
                }
            }
        }
    }
}

fn render_evidence(
    finding: &ObligationFinding,
    state: &WorkspaceState,
    mut workspace: Signal<WorkspaceState>,
) -> Element {
    let entries = match evidence_view(finding, state) {
        EvidenceView::Empty => {
            return rsx! {
                div { class: "detail-empty", {t!("evidence-empty")} }
            }
        }
        EvidenceView::Clauses(entries) => entries,
    };

    rsx! {
        div { class: "detail-evidence",
            for entry in entries.into_iter() {
                {
                    let EvidenceEntry { number, text, target, is_active } = entry;
                    rsx! {
                        button {
                            key: "{number}",
                            r#type: "button",
                            class: if is_active { "evidence-clause evidence-clause--active" } else { "evidence-clause" },
                            onclick: move |_| workspace.with_mut(|ws| ws.select_clause(&target)),
                            span { class: "evidence-clause__label",
                                {t!("evidence-clause-reference", number = number)}
                            }
                            p { class: "evidence-clause__text", "“{text}”" }
                        }
                    }
                }
            }
        }
    }
}

fn render_suggestion(finding: &ObligationFinding) -> Element {
    match suggestion_view(finding) {
        SuggestionView::Remediation(text) => rsx! {
            div { class: "detail-suggestion",
                h4 { class: "detail-suggestion__title", {t!("suggestion-title")} }
                p { "{text}" }
            }
        },
        SuggestionView::FullyCompliant => rsx! {
            div { class: "detail-empty detail-empty--compliant",
                p { {t!("suggestion-none")} }
                p { {t!("suggestion-none-hint")} }
            }
        },
    }
}

/// The finding the panel shows; `None` renders the no-selection placeholder.
pub(crate) fn selected_finding(result: &AnalysisResult, state: &WorkspaceState) -> Option<ObligationFinding> {
    state.selected.and_then(|id| result.finding(id)).cloned()
}

/// How a validation step is drawn. Only `FAIL` is styled as a failure;
/// statuses the client does not know are shown neutrally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepTone {
    Pass,
    Fail,
    Other,
}

impl StepTone {
    pub(crate) fn of(status: &StepStatus) -> Self {
        match status {
            StepStatus::Pass => Self::Pass,
            StepStatus::Fail => Self::Fail,
            StepStatus::Other(_) => Self::Other,
        }
    }

    pub(crate) fn class(self) -> &'static str {
        match self {
            Self::Pass => "detail-step detail-step--pass",
            Self::Fail => "detail-step detail-step--fail",
            Self::Other => "detail-step detail-step--other",
        }
    }

    pub(crate) fn icon(self) -> &'static str {
        match self {
            Self::Pass => "✓",
            Self::Fail => "✕",
            Self::Other => "–",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EvidenceEntry {
    /// One-based clause number shown in the label.
    pub number: usize,
    pub text: String,
    /// Text handed to the viewer when the clause is clicked.
    pub target: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EvidenceView {
    Empty,
    Clauses(Vec<EvidenceEntry>),
}

pub(crate) fn evidence_view(finding: &ObligationFinding, state: &WorkspaceState) -> EvidenceView {
    if finding.supporting_clauses.is_empty() {
        return EvidenceView::Empty;
    }

    let entries = finding
        .supporting_clauses
        .iter()
        .enumerate()
        .map(|(index, clause)| {
            let target = finding.clause_search_text(index).unwrap_or(clause).to_string();
            EvidenceEntry {
                number: index + 1,
                text: clause.clone(),
                is_active: state.clause_selection == target,
                target,
            }
        })
        .collect();
    EvidenceView::Clauses(entries)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SuggestionView<'a> {
    Remediation(&'a str),
    FullyCompliant,
}

pub(crate) fn suggestion_view(finding: &ObligationFinding) -> SuggestionView<'_> {
    match finding.remediation() {
        Some(text) => SuggestionView::Remediation(text),
        None => SuggestionView::FullyCompliant,
    }
}
