use crate::analysis::{ObligationFinding, Verdict};
use crate::t;

/// CSS modifier shared by badges, list entries and the viewer highlight.
pub(crate) fn verdict_tone(verdict: &Verdict) -> &'static str {
    match verdict {
        Verdict::Compliant => "compliant",
        Verdict::NonCompliant => "non-compliant",
        Verdict::Other(_) => "unknown",
    }
}

/// Badge text: localized for the two known verdicts, verbatim otherwise.
pub(crate) fn verdict_label(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Compliant => t!("status-compliant"),
        Verdict::NonCompliant => t!("status-non-compliant"),
        Verdict::Other(raw) => raw.clone(),
    }
}

/// Tooltip for a validation step. Known pipeline steps get a short
/// explanation; anything else shows its own finding.
pub(crate) fn step_description(step_name: &str, finding: &str) -> String {
    match step_name {
        "Identify Obligation Purpose" => t!("step-desc-purpose"),
        "Analyze Clause Effect" => t!("step-desc-effect"),
        "Match Analysis" => t!("step-desc-match"),
        "Material Conflicts Check" => t!("step-desc-conflicts"),
        "Termination Check" => t!("step-desc-termination"),
        "Discretion Check" => t!("step-desc-discretion"),
        "Negative Obligation Check" => t!("step-desc-negative"),
        _ => finding.to_string(),
    }
}

pub(crate) fn location_label(finding: &ObligationFinding) -> Option<String> {
    match (finding.page, finding.line) {
        (Some(page), Some(line)) => Some(t!("location-page-line", page = page, line = line)),
        (Some(page), None) => Some(t!("location-page", page = page)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;

    #[test]
    fn tones_follow_verdict() {
        assert_eq!(verdict_tone(&Verdict::Compliant), "compliant");
        assert_eq!(verdict_tone(&Verdict::NonCompliant), "non-compliant");
        assert_eq!(verdict_tone(&Verdict::from("Partial")), "unknown");
    }

    #[test]
    fn unknown_verdicts_are_shown_verbatim() {
        crate::i18n::init();
        assert_eq!(verdict_label(&Verdict::from("Partial")), "Partial");
        assert!(!verdict_label(&Verdict::Compliant).is_empty());
    }

    #[test]
    fn unknown_steps_fall_back_to_their_finding() {
        crate::i18n::init();
        assert_eq!(step_description("Custom Step", "raw finding"), "raw finding");
        assert_ne!(step_description("Match Analysis", "raw finding"), "raw finding");
    }

    #[test]
    fn location_needs_a_page() {
        crate::i18n::init();
        let mut finding = fixtures::finding("x", "Yes");
        assert!(location_label(&finding).is_some());
        finding.page = None;
        assert_eq!(location_label(&finding), None);
    }
}
