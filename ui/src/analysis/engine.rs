//! Submission state machine for one upload → analyze → display cycle.

use std::rc::Rc;

use crate::core::config::ProgressConfig;

use super::{AnalysisError, AnalysisResult, UploadSet, UploadedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
}

/// What the view should do after feeding a tick to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Progress moved (or sat at the ceiling); schedule another tick.
    Continue(u8),
    /// The run this tick belonged to is over.
    Stop,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Succeeded,
    Failed(AnalysisError),
    /// Response for a run that was reset or superseded.
    Discarded,
}

/// Files captured for a submission together with the run they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub run_id: u64,
    pub obligations: UploadedFile,
    pub contract: UploadedFile,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisEngine {
    pub uploads: UploadSet,
    pub phase: AnalysisPhase,
    pub progress: u8,
    pub run_id: u64,
    pub result: Option<Rc<AnalysisResult>>,
    /// Last failure, cleared by the next submission or a reset.
    pub notice: Option<AnalysisError>,
    pub elapsed_ms: Option<u64>,
    pub config: ProgressConfig,
}

impl AnalysisEngine {
    pub fn new(config: ProgressConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.phase == AnalysisPhase::Submitting
    }

    pub fn can_analyze(&self) -> bool {
        self.uploads.is_complete() && !self.is_analyzing()
    }

    /// Idle → Submitting. Starts a new run and hands back the files to send.
    pub fn begin(&mut self) -> Result<Submission, AnalysisError> {
        if self.is_analyzing() {
            return Err(AnalysisError::AlreadyRunning);
        }
        let Some((obligations, contract)) = self.uploads.pair() else {
            self.notice = Some(AnalysisError::MissingFiles);
            return Err(AnalysisError::MissingFiles);
        };

        self.run_id = self.run_id.wrapping_add(1);
        self.phase = AnalysisPhase::Submitting;
        self.progress = 0;
        self.result = None;
        self.notice = None;
        self.elapsed_ms = None;

        Ok(Submission {
            run_id: self.run_id,
            obligations,
            contract,
        })
    }

    /// Advance the simulated progress for `run_id`, clamped at the ceiling.
    pub fn tick(&mut self, run_id: u64) -> TickOutcome {
        if run_id != self.run_id || !self.is_analyzing() {
            return TickOutcome::Stop;
        }
        let next = self.progress.saturating_add(self.config.step);
        self.progress = next.min(self.config.ceiling).max(self.progress);
        TickOutcome::Continue(self.progress)
    }

    /// Submitting → Succeeded, or back to Idle with the files kept.
    pub fn complete(
        &mut self,
        run_id: u64,
        outcome: Result<AnalysisResult, AnalysisError>,
        elapsed_ms: u64,
    ) -> Completion {
        if run_id != self.run_id || !self.is_analyzing() {
            tracing::debug!(run_id, current = self.run_id, "discarding stale analysis response");
            return Completion::Discarded;
        }

        match outcome {
            Ok(result) => {
                self.phase = AnalysisPhase::Succeeded;
                self.progress = 100;
                self.result = Some(Rc::new(result));
                self.elapsed_ms = Some(elapsed_ms);
                self.notice = None;
                Completion::Succeeded
            }
            Err(err) => {
                self.phase = AnalysisPhase::Idle;
                self.progress = 0;
                self.result = None;
                self.notice = Some(err.clone());
                Completion::Failed(err)
            }
        }
    }

    /// Back to Idle with nothing selected. Any in-flight run becomes stale.
    pub fn reset(&mut self) {
        self.run_id = self.run_id.wrapping_add(1);
        self.phase = AnalysisPhase::Idle;
        self.progress = 0;
        self.result = None;
        self.notice = None;
        self.elapsed_ms = None;
        self.uploads.clear();
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures;
    use pretty_assertions::assert_eq;

    fn engine_with_files(obligations: bool, contract: bool) -> AnalysisEngine {
        let mut engine = AnalysisEngine::default();
        if obligations {
            engine
                .uploads
                .set_obligations_file(Some(UploadedFile::new("obligations.xlsx", vec![1])));
        }
        if contract {
            engine
                .uploads
                .set_contract_file(Some(UploadedFile::new("contract.pdf", vec![2])));
        }
        engine
    }

    #[test]
    fn can_analyze_transitions() {
        assert!(!engine_with_files(false, false).can_analyze());
        assert!(!engine_with_files(true, false).can_analyze());
        assert!(!engine_with_files(false, true).can_analyze());

        let mut engine = engine_with_files(true, true);
        assert!(engine.can_analyze());

        engine.begin().unwrap();
        assert!(!engine.can_analyze());
        assert_eq!(engine.begin(), Err(AnalysisError::AlreadyRunning));
    }

    #[test]
    fn begin_without_files_sets_notice_and_sends_nothing() {
        let mut engine = engine_with_files(true, false);
        assert_eq!(engine.begin(), Err(AnalysisError::MissingFiles));
        assert_eq!(engine.phase, AnalysisPhase::Idle);
        assert_eq!(engine.notice, Some(AnalysisError::MissingFiles));
        assert_eq!(engine.run_id, 0);
    }

    #[test]
    fn ticks_clamp_at_ceiling() {
        let mut engine = engine_with_files(true, true);
        let run = engine.begin().unwrap().run_id;

        let mut last = 0;
        for _ in 0..40 {
            match engine.tick(run) {
                TickOutcome::Continue(progress) => last = progress,
                TickOutcome::Stop => panic!("ticker stopped while submitting"),
            }
        }
        assert_eq!(last, 90);
        assert_eq!(engine.tick(run + 1), TickOutcome::Stop);
    }

    #[test]
    fn success_reveals_result() {
        let mut engine = engine_with_files(true, true);
        let run = engine.begin().unwrap().run_id;
        engine.tick(run);

        let result = fixtures::result(vec![fixtures::finding("a", "Yes")]);
        assert_eq!(engine.complete(run, Ok(result), 3_200), Completion::Succeeded);
        assert_eq!(engine.phase, AnalysisPhase::Succeeded);
        assert_eq!(engine.progress, 100);
        assert_eq!(engine.elapsed_ms, Some(3_200));
        assert_eq!(engine.result.as_ref().map(|r| r.results.len()), Some(1));
        assert_eq!(engine.tick(run), TickOutcome::Stop);
    }

    #[test]
    fn network_error_returns_to_pre_submission_state() {
        let mut engine = engine_with_files(true, true);
        let before = engine.uploads.clone();
        let run = engine.begin().unwrap().run_id;
        engine.tick(run);

        let failure = AnalysisError::Transport("connection refused".into());
        assert_eq!(
            engine.complete(run, Err(failure.clone()), 40),
            Completion::Failed(failure.clone())
        );
        assert_eq!(engine.phase, AnalysisPhase::Idle);
        assert_eq!(engine.uploads, before);
        assert_eq!(engine.notice, Some(failure));
        assert!(engine.result.is_none());
        assert!(engine.can_analyze());
    }

    #[test]
    fn reset_discards_late_response() {
        let mut engine = engine_with_files(true, true);
        let run = engine.begin().unwrap().run_id;
        engine.reset();

        let late = fixtures::result(vec![fixtures::finding("a", "No")]);
        assert_eq!(engine.complete(run, Ok(late), 10), Completion::Discarded);
        assert_eq!(engine.phase, AnalysisPhase::Idle);
        assert!(engine.result.is_none());
        assert!(!engine.uploads.is_complete());
    }

    #[test]
    fn reset_after_success_clears_everything() {
        let mut engine = engine_with_files(true, true);
        let run = engine.begin().unwrap().run_id;
        engine.complete(run, Ok(fixtures::result(Vec::new())), 5);
        let generation = engine.uploads.picker_generation;

        engine.reset();
        assert_eq!(engine.phase, AnalysisPhase::Idle);
        assert!(engine.result.is_none());
        assert_eq!(engine.elapsed_ms, None);
        assert_eq!(engine.uploads.picker_generation, generation + 1);
        assert!(!engine.can_analyze());
    }
}
