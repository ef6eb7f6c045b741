//! Summary counts and chart series derived from a result list.

use crate::analysis::{ObligationFinding, Verdict};

pub const COMPLIANT_FILL: &str = "#00a63e";
pub const NON_COMPLIANT_FILL: &str = "#e7000b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ComplianceSummary {
    pub total: usize,
    pub compliant: usize,
    pub non_compliant: usize,
    /// `round(compliant / total * 100)`, 0 for an empty list.
    pub percentage: u8,
}

/// One bar or gauge value, with its fill colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartDatum {
    pub value: usize,
    pub fill: &'static str,
}

/// Verdicts other than exactly `Yes`/`No` count towards neither bucket.
pub fn summarize(results: &[ObligationFinding]) -> ComplianceSummary {
    let total = results.len();
    let compliant = results
        .iter()
        .filter(|finding| finding.is_present == Verdict::Compliant)
        .count();
    let non_compliant = results
        .iter()
        .filter(|finding| finding.is_present == Verdict::NonCompliant)
        .count();

    let percentage = if total == 0 {
        0
    } else {
        (compliant as f64 / total as f64 * 100.0).round() as u8
    };

    ComplianceSummary {
        total,
        compliant,
        non_compliant,
        percentage,
    }
}

impl ComplianceSummary {
    pub fn gauge(&self) -> ChartDatum {
        ChartDatum {
            value: usize::from(self.percentage),
            fill: COMPLIANT_FILL,
        }
    }

    /// Compliant bar first, non-compliant second.
    pub fn distribution(&self) -> [ChartDatum; 2] {
        [
            ChartDatum {
                value: self.compliant,
                fill: COMPLIANT_FILL,
            },
            ChartDatum {
                value: self.non_compliant,
                fill: NON_COMPLIANT_FILL,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(summarize(&[]), ComplianceSummary::default());
    }

    #[test]
    fn two_of_three_rounds_to_67() {
        let results = vec![
            fixtures::finding("a", "Yes"),
            fixtures::finding("b", "Yes"),
            fixtures::finding("c", "No"),
        ];
        assert_eq!(
            summarize(&results),
            ComplianceSummary {
                total: 3,
                compliant: 2,
                non_compliant: 1,
                percentage: 67,
            }
        );
    }

    #[test]
    fn chart_series_use_fixed_colours() {
        let summary = summarize(&[fixtures::finding("a", "Yes"), fixtures::finding("b", "No")]);
        assert_eq!(summary.gauge(), ChartDatum { value: 50, fill: "#00a63e" });
        let [ok, bad] = summary.distribution();
        assert_eq!((ok.value, ok.fill), (1, "#00a63e"));
        assert_eq!((bad.value, bad.fill), (1, "#e7000b"));
    }

    #[test]
    fn verdicts_are_case_sensitive() {
        let results = vec![fixtures::finding("a", "yes"), fixtures::finding("b", "NO")];
        let summary = summarize(&results);
        assert_eq!((summary.compliant, summary.non_compliant), (0, 0));
        assert_eq!(summary.percentage, 0);
    }

    fn verdict() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Yes".to_string()),
            Just("No".to_string()),
            Just("Partial".to_string()),
            "[A-Za-z]{0,6}",
        ]
    }

    proptest! {
        #[test]
        fn counts_never_exceed_total(verdicts in prop::collection::vec(verdict(), 0..40)) {
            let results: Vec<_> = verdicts.iter().map(|v| fixtures::finding("x", v)).collect();
            let summary = summarize(&results);
            let all_binary = verdicts.iter().all(|v| v == "Yes" || v == "No");

            prop_assert!(summary.compliant + summary.non_compliant <= summary.total);
            prop_assert_eq!(summary.compliant + summary.non_compliant == summary.total, all_binary);
            prop_assert!(summary.percentage <= 100);
        }
    }
}
