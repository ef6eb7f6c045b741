//! Wire model for the analysis service response.

use serde::{Deserialize, Serialize};

use super::AnalysisError;

/// Compliance verdict as reported by the service.
///
/// Only the exact strings `"Yes"` and `"No"` are recognised; anything else is
/// kept verbatim so it can be displayed and exported unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Compliant,
    NonCompliant,
    Other(String),
}

impl Verdict {
    pub fn as_str(&self) -> &str {
        match self {
            Verdict::Compliant => "Yes",
            Verdict::NonCompliant => "No",
            Verdict::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, Verdict::Compliant)
    }
}

impl From<String> for Verdict {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Yes" => Verdict::Compliant,
            "No" => Verdict::NonCompliant,
            _ => Verdict::Other(raw),
        }
    }
}

impl From<&str> for Verdict {
    fn from(raw: &str) -> Self {
        Verdict::from(raw.to_string())
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> Self {
        verdict.as_str().to_string()
    }
}

/// Outcome of one validation step. Besides `PASS` and `FAIL` the service
/// reports values such as `N/A` for steps that do not apply; those are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StepStatus {
    Pass,
    Fail,
    Other(String),
}

impl StepStatus {
    pub fn as_str(&self) -> &str {
        match self {
            StepStatus::Pass => "PASS",
            StepStatus::Fail => "FAIL",
            StepStatus::Other(raw) => raw.as_str(),
        }
    }

    /// Only an explicit `FAIL` counts; it starts expanded and is styled red.
    pub fn is_failure(&self) -> bool {
        matches!(self, StepStatus::Fail)
    }
}

impl From<String> for StepStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PASS" => StepStatus::Pass,
            "FAIL" => StepStatus::Fail,
            _ => StepStatus::Other(raw),
        }
    }
}

impl From<StepStatus> for String {
    fn from(status: StepStatus) -> Self {
        status.as_str().to_string()
    }
}

/// One entry of the validation trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationStep {
    pub step_name: String,
    pub status: StepStatus,
    #[serde(default)]
    pub finding: String,
    #[serde(default)]
    pub is_critical: bool,
}

impl ValidationStep {
    /// `stepName: status - finding`, as used in the exported report.
    pub fn flatten(&self) -> String {
        format!("{}: {} - {}", self.step_name, self.status.as_str(), self.finding)
    }
}

/// Stable identifier assigned when a result is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FindingId(pub usize);

impl FindingId {
    pub fn label(&self) -> String {
        format!("OB-{:03}", self.0 + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObligationFinding {
    #[serde(skip)]
    pub id: FindingId,
    pub obligation: String,
    pub is_present: Verdict,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub similarity_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_position")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "lenient_position")]
    pub line: Option<u32>,
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub supporting_clauses: Vec<String>,
    #[serde(default)]
    pub supporting_clauses_original: Vec<String>,
    #[serde(default)]
    pub cot_steps: Vec<ValidationStep>,
}

impl ObligationFinding {
    /// Remediation text, treating an empty string as absent.
    pub fn remediation(&self) -> Option<&str> {
        self.suggestion.as_deref().filter(|text| !text.trim().is_empty())
    }

    /// Text used to locate clause `index` in the document: the raw original
    /// when the service sent one, otherwise the display text.
    pub fn clause_search_text(&self, index: usize) -> Option<&str> {
        let display = self.supporting_clauses.get(index)?;
        Some(
            self.supporting_clauses_original
                .get(index)
                .filter(|raw| !raw.is_empty())
                .unwrap_or(display)
                .as_str(),
        )
    }

    /// Every supporting clause joined by newlines, the highlight target used
    /// right after the obligation is selected.
    pub fn joined_clauses(&self) -> String {
        self.supporting_clauses.join("\n")
    }

    /// Step indices that start expanded: every failed step.
    pub fn failing_steps(&self) -> impl Iterator<Item = usize> + '_ {
        self.cot_steps
            .iter()
            .enumerate()
            .filter(|(_, step)| step.status.is_failure())
            .map(|(index, _)| index)
    }
}

/// Page and line numbers arrive as integers, numeric strings, or
/// placeholders like `"n/a"`. Anything that is not a non-negative integer
/// reads as absent.
fn lenient_position<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => {
            number.as_u64().and_then(|n| u32::try_from(n).ok())
        }
        Some(serde_json::Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

/// Full response body of the analysis endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub results: Vec<ObligationFinding>,
    #[serde(default)]
    pub contract_url: Option<String>,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub cache_stats: Option<serde_json::Value>,
    #[serde(default)]
    pub batch_processing_used: Option<bool>,
}

impl AnalysisResult {
    /// Decode a response body, assign finding ids and reject shapes the
    /// views cannot render faithfully.
    pub fn ingest(body: &str) -> Result<Self, AnalysisError> {
        let raw: serde_json::Value = serde_json::from_str(body)
            .map_err(|err| AnalysisError::MalformedResponse(err.to_string()))?;

        if raw.get("status").and_then(|status| status.as_str()) == Some("error") {
            let message = raw
                .get("message")
                .and_then(|message| message.as_str())
                .unwrap_or("analysis service reported an error");
            return Err(AnalysisError::Service(message.to_string()));
        }

        let mut result: AnalysisResult = serde_json::from_value(raw)
            .map_err(|err| AnalysisError::MalformedResponse(err.to_string()))?;

        for (index, finding) in result.results.iter_mut().enumerate() {
            finding.id = FindingId(index);
            let shown = finding.supporting_clauses.len();
            let raw = finding.supporting_clauses_original.len();
            if raw > 0 && raw != shown {
                return Err(AnalysisError::MalformedResponse(format!(
                    "finding {} has {shown} clauses but {raw} originals",
                    finding.id.label()
                )));
            }
        }

        Ok(result)
    }

    pub fn finding(&self, id: FindingId) -> Option<&ObligationFinding> {
        self.results.get(id.0)
    }
}
