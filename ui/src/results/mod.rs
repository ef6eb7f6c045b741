mod summary;
pub use summary::{summarize, ChartDatum, ComplianceSummary, COMPLIANT_FILL, NON_COMPLIANT_FILL};

mod filter;
pub use filter::filter_by_search;

mod export;
pub use export::{build_report, report_filename, ExportError, ReportActions, ReportDelivery, ReportMeta};

mod list;
pub use list::ObligationList;

mod detail;
pub use detail::DetailPanel;

mod charts;
pub use charts::{HealthGauge, StatusDistribution};

mod viewer;
pub use viewer::{highlight_terms, DocumentViewer, HighlightTone, ViewerCommand};

mod view;
pub use view::ResultsView;

mod utils;
pub(crate) use utils::*;

use std::collections::BTreeSet;

use crate::analysis::{FindingId, ObligationFinding};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Details,
    Evidence,
    Suggestion,
}

/// Page-level selection state shared by the list, the detail panel and the
/// document viewer. Discarded whenever a new analysis starts or the user
/// resets, and nowhere else.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkspaceState {
    pub selected: Option<FindingId>,
    /// Newline-joined text the viewer should highlight.
    pub clause_selection: String,
    pub active_tab: DetailTab,
    pub expanded_steps: BTreeSet<usize>,
    /// Obligation list filter text.
    pub search: String,
}

impl WorkspaceState {
    pub fn select_obligation(&mut self, finding: &ObligationFinding) {
        self.selected = Some(finding.id);
        self.clause_selection = finding.joined_clauses();
        self.active_tab = DetailTab::Details;
        self.expanded_steps = finding.failing_steps().collect();
    }

    pub fn switch_tab(&mut self, tab: DetailTab) {
        self.active_tab = tab;
        self.clause_selection.clear();
    }

    pub fn select_clause(&mut self, text: &str) {
        self.clause_selection = text.to_string();
    }

    pub fn set_search(&mut self, text: String) {
        self.search = text;
    }

    pub fn toggle_step(&mut self, index: usize) {
        if !self.expanded_steps.remove(&index) {
            self.expanded_steps.insert(index);
        }
    }

    pub fn is_step_expanded(&self, index: usize) -> bool {
        self.expanded_steps.contains(&index)
    }

    pub fn is_selected(&self, id: FindingId) -> bool {
        self.selected == Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{fixtures, StepStatus};
    use pretty_assertions::assert_eq;

    fn findings() -> Vec<ObligationFinding> {
        let mut first = fixtures::finding("Pay rent", "Yes");
        first.supporting_clauses = vec!["Clause one".into(), "Clause two".into()];
        first.cot_steps = vec![
            fixtures::step("Match Analysis", StepStatus::Pass),
            fixtures::step("Discretion Check", StepStatus::Fail),
            fixtures::step("Termination Check", StepStatus::Fail),
        ];
        let second = fixtures::finding("Insure premises", "No");
        fixtures::result(vec![first, second]).results
    }

    #[test]
    fn selecting_joins_clauses_and_expands_failures() {
        let findings = findings();
        let mut state = WorkspaceState::default();
        state.select_obligation(&findings[0]);

        assert_eq!(state.selected, Some(FindingId(0)));
        assert_eq!(state.clause_selection, "Clause one\nClause two");
        assert_eq!(state.active_tab, DetailTab::Details);
        assert_eq!(state.expanded_steps, BTreeSet::from([1, 2]));
    }

    #[test]
    fn switching_tabs_clears_clause_selection() {
        let findings = findings();
        let mut state = WorkspaceState::default();
        state.select_obligation(&findings[0]);

        state.switch_tab(DetailTab::Evidence);
        assert_eq!(state.active_tab, DetailTab::Evidence);
        assert!(state.clause_selection.is_empty());

        state.select_clause("Clause two");
        assert_eq!(state.clause_selection, "Clause two");
    }

    #[test]
    fn selecting_another_obligation_resets_tab() {
        let findings = findings();
        let mut state = WorkspaceState::default();
        state.select_obligation(&findings[0]);
        state.switch_tab(DetailTab::Suggestion);

        state.select_obligation(&findings[1]);
        assert_eq!(state.active_tab, DetailTab::Details);
        assert!(state.is_selected(FindingId(1)));
        assert!(state.clause_selection.is_empty());
        assert!(state.expanded_steps.is_empty());
    }

    #[test]
    fn toggling_a_step_twice_restores_it() {
        let findings = findings();
        let mut state = WorkspaceState::default();
        state.select_obligation(&findings[0]);
        let before = state.expanded_steps.clone();

        state.toggle_step(0);
        assert!(state.is_step_expanded(0));
        assert!(state.is_step_expanded(1));

        state.toggle_step(0);
        assert_eq!(state.expanded_steps, before);

        state.toggle_step(2);
        assert!(!state.is_step_expanded(2));
        assert!(state.is_step_expanded(1));
    }

    #[test]
    fn search_survives_selection_changes() {
        let findings = findings();
        let mut state = WorkspaceState::default();
        state.set_search("rent".into());

        state.select_obligation(&findings[0]);
        state.switch_tab(DetailTab::Evidence);
        state.select_clause("Clause one");

        assert_eq!(state.search, "rent");
    }
}
