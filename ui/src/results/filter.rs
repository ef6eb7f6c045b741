use crate::analysis::ObligationFinding;

/// Case-insensitive substring match on the obligation text. Empty input keeps everything.
pub fn filter_by_search<'a>(results: &'a [ObligationFinding], text: &str) -> Vec<&'a ObligationFinding> {
    let needle = text.to_lowercase();
    if needle.is_empty() {
        return results.iter().collect();
    }
    results
        .iter()
        .filter(|finding| finding.obligation.to_lowercase().contains(&needle))
        .collect()
}
