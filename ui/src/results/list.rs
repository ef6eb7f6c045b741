use std::rc::Rc;

use dioxus::prelude::*;

use crate::{
    analysis::{AnalysisResult, ObligationFinding, Verdict},
    components::{SearchBox, StatusBadge},
    results::{filter_by_search, location_label, verdict_tone, WorkspaceState},
    t,
};

#[component]
pub fn ObligationList(result: Rc<AnalysisResult>, workspace: Signal<WorkspaceState>) -> Element {
    let mut search_target = workspace;
    let query = workspace.read().search.clone();
    let total = result.results.len();
    let entries = list_entries(&result.results, &query, &workspace.read());
    let shown = entries.len();

    rsx! {
        section { class: "results-card obligation-list",
            div { class: "results-card__header",
                h2 { {t!("list-title")} }
                span { class: "results-card__meta", {t!("list-count", shown = shown, total = total)} }
            }

            SearchBox {
                value: query.clone(),
                placeholder: t!("list-search-placeholder"),
                on_input: move |text: String| search_target.with_mut(|state| state.set_search(text)),
            }

            if entries.is_empty() {
                p { class: "results-card__placeholder", {t!("list-empty")} }
            } else {
                ul { class: "obligation-list__items",
                    for entry in entries.into_iter() {
                        {render_list_entry(entry, result.clone(), workspace)}
                    }
                }
            }
        }
    }
}

/// Rows left after the search filter; an empty list renders the
/// no-match placeholder.
fn list_entries(results: &[ObligationFinding], query: &str, state: &WorkspaceState) -> Vec<ListEntry> {
    filter_by_search(results, query)
        .into_iter()
        .map(|finding| ListEntry {
            index: finding.id.0,
            label: finding.id.label(),
            obligation: finding.obligation.clone(),
            verdict: finding.is_present.clone(),
            location: location_label(finding),
            is_active: state.is_selected(finding.id),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
struct ListEntry {
    index: usize,
    label: String,
    obligation: String,
    verdict: Verdict,
    location: Option<String>,
    is_active: bool,
}

fn render_list_entry(
    entry: ListEntry,
    result: Rc<AnalysisResult>,
    mut workspace: Signal<WorkspaceState>,
) -> Element {
    let ListEntry {
        index,
        label,
        obligation,
        verdict,
        location,
        is_active,
    } = entry;

    let tone = verdict_tone(&verdict);

    rsx! {
        li {
            key: "{label}",
            class: format!(
                "obligation-list__item obligation-list__item--{tone} {}",
                if is_active { "obligation-list__item--active" } else { "" }
            ),
            button {
                r#type: "button",
                class: "obligation-list__button",
                aria_pressed: is_active,
                onclick: move |_| {
                    if let Some(finding) = result.results.get(index) {
                        workspace.with_mut(|state| state.select_obligation(finding));
                    }
                },

                span { class: "obligation-list__heading",
                    span { class: "obligation-list__id", "{label}" }
                    StatusBadge { verdict: verdict.clone() }
                }
                span { class: "obligation-list__text", "{obligation}" }
                if let Some(location) = location.as_ref() {
                    span { class: "obligation-list__location", "{location}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{fixtures, FindingId};
    use pretty_assertions::assert_eq;

    #[test]
    fn no_results_or_no_matches_leave_the_list_empty() {
        let state = WorkspaceState::default();
        assert!(list_entries(&[], "", &state).is_empty());

        let result = fixtures::result(vec![
            fixtures::finding("Pay rent", "Yes"),
            fixtures::finding("Insure premises", "No"),
        ]);
        assert!(list_entries(&result.results, "indemnity", &state).is_empty());
    }

    #[test]
    fn entries_follow_filter_and_selection() {
        let result = fixtures::result(vec![
            fixtures::finding("Pay rent", "Yes"),
            fixtures::finding("Insure premises", "No"),
        ]);
        let mut state = WorkspaceState::default();
        state.selected = Some(FindingId(1));

        let entries = list_entries(&result.results, "insure", &state);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].index, 1);
        assert_eq!(entries[0].obligation, "Insure premises");
        assert_eq!(entries[0].verdict, Verdict::from("No"));
        assert!(entries[0].is_active);
    }
}
