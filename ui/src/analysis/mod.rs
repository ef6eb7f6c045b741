//! Upload intake, submission to the analysis service and the state machine
//! that ties them together.

mod client;
pub use client::AnalysisClient;

mod engine;
pub use engine::{AnalysisEngine, AnalysisPhase, Completion, Submission, TickOutcome};

mod model;
pub use model::{
    AnalysisResult, FindingId, ObligationFinding, StepStatus, ValidationStep, Verdict,
};

#[cfg(test)]
pub(crate) use model::fixtures;

mod uploads;
pub use uploads::{FileSlot, UploadSet, UploadedFile};

mod view;
pub use view::{use_analysis, use_analysis_provider, AnalysisHandle, AnalysisView};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("both the obligations file and the contract file are required")]
    MissingFiles,
    #[error("an analysis is already running")]
    AlreadyRunning,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("analysis service returned HTTP {0}")]
    Status(u16),
    #[error("analysis service reported an error: {0}")]
    Service(String),
    #[error("unexpected response shape: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Errors the user caused and can fix before resubmitting, as opposed to
    /// generic failures of the request itself.
    pub fn is_input_error(&self) -> bool {
        matches!(self, AnalysisError::MissingFiles | AnalysisError::AlreadyRunning)
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AnalysisError::Status(status.as_u16()),
            None if err.is_decode() => AnalysisError::MalformedResponse(err.to_string()),
            None => AnalysisError::Transport(err.to_string()),
        }
    }
}
