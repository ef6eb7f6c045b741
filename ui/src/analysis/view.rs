use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedSender;
use futures_util::StreamExt;

use crate::components::ProgressOverlay;
use crate::core::config::ProgressConfig;
use crate::core::{format, platform, timing};
use crate::results::{ResultsView, WorkspaceState};
use crate::t;

use super::{
    AnalysisClient, AnalysisEngine, AnalysisError, AnalysisPhase, AnalysisResult, Completion,
    FileSlot, Submission, TickOutcome, UploadSet, UploadedFile,
};

/// Analysis state that outlives the routed views: the engine, the per-run
/// workspace selection and the event loop that drives both. Launchers install
/// it above anything that may remount, such as the language-keyed router.
#[derive(Clone)]
pub struct AnalysisHandle {
    pub engine: Signal<AnalysisEngine>,
    pub workspace: Signal<WorkspaceState>,
    pub client: AnalysisClient,
    events: Coroutine<AnalysisEvent>,
}

impl AnalysisHandle {
    /// Drop results, files and selection, as the reset button does.
    pub fn reset(&self) {
        self.events.send(AnalysisEvent::Reset);
    }
}

/// Install the root [`AnalysisHandle`].
pub fn use_analysis_provider() -> AnalysisHandle {
    let engine = use_signal(|| AnalysisEngine::new(ProgressConfig::default()));
    let workspace = use_signal(WorkspaceState::default);
    let client = use_hook(AnalysisClient::default);

    let sender_slot: Rc<RefCell<Option<UnboundedSender<AnalysisEvent>>>> =
        use_hook(|| Rc::new(RefCell::new(None)));
    let sender_slot_for_loop = sender_slot.clone();

    let events = {
        let client = client.clone();

        use_coroutine(move |mut rx: UnboundedReceiver<AnalysisEvent>| {
            let sender_slot = sender_slot_for_loop.clone();
            let mut engine = engine;
            let mut workspace = workspace;
            let client = client.clone();

            async move {
                while let Some(event) = rx.next().await {
                    let follow_ups = {
                        let mut eng = engine.write();
                        let mut ws = workspace.write();
                        apply_event(&mut eng, &mut ws, event)
                    };
                    for follow_up in follow_ups {
                        match follow_up {
                            FollowUp::Tick { run_id, interval_ms } => {
                                queue_tick(sender_slot.clone(), run_id, interval_ms);
                            }
                            FollowUp::Request(submission) => {
                                queue_request(sender_slot.clone(), client.clone(), submission);
                            }
                        }
                    }
                }
            }
        })
    };

    sender_slot.borrow_mut().replace(events.tx());

    use_context_provider(|| AnalysisHandle {
        engine,
        workspace,
        client,
        events,
    })
}

pub fn use_analysis() -> AnalysisHandle {
    use_context::<AnalysisHandle>()
}

/// Work the event loop schedules after an event has been applied.
#[derive(Debug, PartialEq)]
enum FollowUp {
    Tick { run_id: u64, interval_ms: u64 },
    Request(Submission),
}

/// Feed one event to the engine. The workspace selection is discarded only
/// when a new run starts or the user resets.
fn apply_event(
    engine: &mut AnalysisEngine,
    workspace: &mut WorkspaceState,
    event: AnalysisEvent,
) -> Vec<FollowUp> {
    match event {
        AnalysisEvent::Submit => match engine.begin() {
            Ok(submission) => {
                *workspace = WorkspaceState::default();
                vec![
                    FollowUp::Tick {
                        run_id: submission.run_id,
                        interval_ms: engine.config.interval_ms,
                    },
                    FollowUp::Request(submission),
                ]
            }
            Err(err) if err.is_input_error() => {
                tracing::debug!("analysis not started: {err}");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!("analysis not started: {err}");
                Vec::new()
            }
        },
        AnalysisEvent::Tick { run_id } => match engine.tick(run_id) {
            TickOutcome::Continue(_) => vec![FollowUp::Tick {
                run_id,
                interval_ms: engine.config.interval_ms,
            }],
            TickOutcome::Stop => Vec::new(),
        },
        AnalysisEvent::Finished {
            run_id,
            outcome,
            elapsed_ms,
        } => {
            match engine.complete(run_id, outcome, elapsed_ms) {
                Completion::Succeeded => {
                    tracing::info!(run_id, elapsed_ms, "analysis ready");
                }
                Completion::Failed(err) => {
                    tracing::warn!(run_id, "analysis failed: {err}");
                }
                Completion::Discarded => {}
            }
            Vec::new()
        }
        AnalysisEvent::Reset => {
            engine.reset();
            *workspace = WorkspaceState::default();
            Vec::new()
        }
    }
}

/// Upload → analyze → display, for one workspace page.
#[component]
pub fn AnalysisView() -> Element {
    let AnalysisHandle {
        engine,
        workspace,
        client,
        events,
    } = use_analysis();

    let send_event = move |event: AnalysisEvent| events.send(event);

    let mut engine_for_uploads = engine;
    let on_select = move |(slot, file): (FileSlot, Option<UploadedFile>)| {
        engine_for_uploads.with_mut(|eng| eng.uploads.set(slot, file));
    };

    let mut engine_for_notice = engine;
    let snapshot = engine();
    let is_analyzing = snapshot.is_analyzing();
    let can_analyze = snapshot.can_analyze();
    let show_results = snapshot.phase == AnalysisPhase::Succeeded;
    let ready = snapshot.result.clone().filter(|_| show_results);

    rsx! {
        div { class: "analysis",
            if is_analyzing {
                ProgressOverlay { progress: snapshot.progress }
            }

            UploadPanel {
                uploads: snapshot.uploads.clone(),
                analyzing: is_analyzing,
                can_analyze,
                show_reset: show_results,
                on_select,
                on_analyze: move |_| send_event(AnalysisEvent::Submit),
                on_reset: move |_| send_event(AnalysisEvent::Reset),
            }

            if let Some(notice) = snapshot.notice.as_ref() {
                div { class: "notice notice--error", role: "alert",
                    span { {notice_text(notice)} }
                    button {
                        r#type: "button",
                        class: "notice__dismiss",
                        aria_label: t!("notice-dismiss"),
                        onclick: move |_| engine_for_notice.with_mut(|eng| eng.dismiss_notice()),
                        "×"
                    }
                }
            }

            if let Some(result) = ready {
                ResultsView {
                    key: "{snapshot.run_id}",
                    result,
                    workspace,
                    contract: snapshot.uploads.contract.clone(),
                    elapsed_ms: snapshot.elapsed_ms,
                    api: client.config().clone(),
                    on_reset: move |_| send_event(AnalysisEvent::Reset),
                }
            }
        }
    }
}

fn notice_text(error: &AnalysisError) -> String {
    match error {
        AnalysisError::MissingFiles => t!("notice-missing-files"),
        _ => t!("notice-analysis-failed"),
    }
}

#[component]
fn UploadPanel(
    uploads: UploadSet,
    analyzing: bool,
    can_analyze: bool,
    show_reset: bool,
    on_select: EventHandler<(FileSlot, Option<UploadedFile>)>,
    on_analyze: EventHandler<()>,
    on_reset: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "upload-panel",
            div { class: "upload-panel__intro",
                span { class: "upload-panel__pill", {t!("upload-badge")} }
                h1 { class: "upload-panel__title", {t!("upload-title")} }
                p { class: "upload-panel__lead", {t!("upload-lead")} }
            }

            div { class: "upload-panel__slots",
                // A new generation remounts both pickers with an empty selection.
                for slot in [FileSlot::Obligations, FileSlot::Contract] {
                    FileSlotPicker {
                        key: "{slot.input_id()}-{uploads.picker_generation}",
                        slot,
                        file: uploads.get(slot).cloned(),
                        disabled: analyzing,
                        on_select,
                    }
                }
            }

            div { class: "upload-panel__actions",
                button {
                    r#type: "button",
                    class: "button button--primary",
                    disabled: !can_analyze,
                    onclick: move |_| on_analyze.call(()),
                    if analyzing { {t!("upload-analyzing")} } else { {t!("upload-analyze")} }
                }
                if show_reset {
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        onclick: move |_| on_reset.call(()),
                        {t!("upload-reset")}
                    }
                }
            }
        }
    }
}

#[component]
fn FileSlotPicker(
    slot: FileSlot,
    file: Option<UploadedFile>,
    disabled: bool,
    on_select: EventHandler<(FileSlot, Option<UploadedFile>)>,
) -> Element {
    let input_id = slot.input_id();
    let (label, hint) = match slot {
        FileSlot::Obligations => (t!("upload-obligations-label"), t!("upload-obligations-hint")),
        FileSlot::Contract => (t!("upload-contract-label"), t!("upload-contract-hint")),
    };

    let on_change = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(path) = engine.files().into_iter().next() else {
            return;
        };
        match engine.read_file(&path).await {
            Some(bytes) => {
                let name = std::path::Path::new(&path)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or(path.as_str())
                    .to_string();
                tracing::debug!(field = slot.field_name(), %name, size = bytes.len(), "file selected");
                on_select.call((slot, Some(UploadedFile::new(name, bytes))));
            }
            None => tracing::warn!(%path, "selected file could not be read"),
        }
    };

    rsx! {
        div { class: "file-slot",
            label { class: "file-slot__label", r#for: input_id, "{label}" }
            input {
                id: input_id,
                class: "file-slot__input",
                r#type: "file",
                accept: slot.accept(),
                disabled,
                onchange: on_change,
            }
            match file {
                Some(file) => rsx! {
                    div { class: "file-slot__chosen",
                        div {
                            span { class: "file-slot__name", "{file.name}" }
                            span { class: "file-slot__size", "{format::format_kilobytes(file.size)}" }
                        }
                        button {
                            r#type: "button",
                            class: "file-slot__clear",
                            disabled,
                            aria_label: t!("upload-clear"),
                            onclick: move |_| on_select.call((slot, None)),
                            "×"
                        }
                    }
                },
                None => rsx! {
                    p { class: "file-slot__hint", "{hint}" }
                },
            }
        }
    }
}

fn queue_tick(
    sender_slot: Rc<RefCell<Option<UnboundedSender<AnalysisEvent>>>>,
    run_id: u64,
    interval_ms: u64,
) {
    if let Some(sender) = sender_slot.borrow().as_ref().cloned() {
        platform::spawn_future(async move {
            timing::sleep_ms(interval_ms).await;
            let _ = sender.unbounded_send(AnalysisEvent::Tick { run_id });
        });
    }
}

fn queue_request(
    sender_slot: Rc<RefCell<Option<UnboundedSender<AnalysisEvent>>>>,
    client: AnalysisClient,
    submission: Submission,
) {
    if let Some(sender) = sender_slot.borrow().as_ref().cloned() {
        platform::spawn_future(async move {
            let stopwatch = timing::Stopwatch::start();
            let outcome = client
                .analyze(&submission.obligations, &submission.contract)
                .await;
            let _ = sender.unbounded_send(AnalysisEvent::Finished {
                run_id: submission.run_id,
                outcome,
                elapsed_ms: stopwatch.elapsed_ms(),
            });
        });
    }
}

#[derive(Debug)]
enum AnalysisEvent {
    Submit,
    Tick {
        run_id: u64,
    },
    Finished {
        run_id: u64,
        outcome: Result<AnalysisResult, AnalysisError>,
        elapsed_ms: u64,
    },
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{fixtures, FindingId};
    use pretty_assertions::assert_eq;

    fn ready_engine() -> AnalysisEngine {
        let mut engine = AnalysisEngine::new(ProgressConfig::default());
        engine
            .uploads
            .set_obligations_file(Some(UploadedFile::new("obligations.xlsx", vec![1])));
        engine
            .uploads
            .set_contract_file(Some(UploadedFile::new("contract.pdf", vec![2])));
        engine
    }

    fn selected_workspace() -> WorkspaceState {
        let mut finding = fixtures::finding("Pay rent", "Yes");
        finding.supporting_clauses = vec!["Clause one".into()];
        let result = fixtures::result(vec![finding]);

        let mut workspace = WorkspaceState::default();
        workspace.select_obligation(&result.results[0]);
        workspace.set_search("rent".into());
        workspace
    }

    fn finish(engine: &mut AnalysisEngine, workspace: &mut WorkspaceState) {
        let run_id = engine.run_id;
        let follow_ups = apply_event(
            engine,
            workspace,
            AnalysisEvent::Finished {
                run_id,
                outcome: Ok(fixtures::result(vec![fixtures::finding("Pay rent", "Yes")])),
                elapsed_ms: 1200,
            },
        );
        assert!(follow_ups.is_empty());
    }

    #[test]
    fn submit_schedules_tick_and_request_and_clears_selection() {
        let mut engine = ready_engine();
        let mut workspace = selected_workspace();

        let follow_ups = apply_event(&mut engine, &mut workspace, AnalysisEvent::Submit);

        assert_eq!(engine.phase, AnalysisPhase::Submitting);
        assert_eq!(workspace, WorkspaceState::default());
        assert_eq!(follow_ups.len(), 2);
        assert_eq!(
            follow_ups[0],
            FollowUp::Tick {
                run_id: 1,
                interval_ms: 300
            }
        );
        assert!(matches!(
            &follow_ups[1],
            FollowUp::Request(submission) if submission.run_id == 1
                && submission.contract.name == "contract.pdf"
        ));
    }

    #[test]
    fn rejected_submit_keeps_selection() {
        let mut missing = AnalysisEngine::default();
        let mut kept = selected_workspace();
        assert!(apply_event(&mut missing, &mut kept, AnalysisEvent::Submit).is_empty());
        assert_eq!(kept, selected_workspace());
        assert_eq!(missing.notice, Some(AnalysisError::MissingFiles));
    }

    #[test]
    fn results_and_selection_persist_until_reset() {
        let mut engine = ready_engine();
        let mut workspace = WorkspaceState::default();
        apply_event(&mut engine, &mut workspace, AnalysisEvent::Submit);
        finish(&mut engine, &mut workspace);
        assert_eq!(engine.phase, AnalysisPhase::Succeeded);

        workspace = selected_workspace();
        let stale_tick = apply_event(&mut engine, &mut workspace, AnalysisEvent::Tick { run_id: 1 });
        assert!(stale_tick.is_empty());
        assert!(workspace.is_selected(FindingId(0)));
        assert_eq!(workspace.search, "rent");
        assert!(engine.result.is_some());

        apply_event(&mut engine, &mut workspace, AnalysisEvent::Reset);
        assert_eq!(engine.phase, AnalysisPhase::Idle);
        assert!(engine.result.is_none());
        assert!(!engine.uploads.is_complete());
        assert_eq!(workspace, WorkspaceState::default());
    }

    #[test]
    fn ticks_continue_only_for_the_running_analysis() {
        let mut engine = ready_engine();
        let mut workspace = WorkspaceState::default();
        apply_event(&mut engine, &mut workspace, AnalysisEvent::Submit);

        assert_eq!(
            apply_event(&mut engine, &mut workspace, AnalysisEvent::Tick { run_id: 1 }),
            vec![FollowUp::Tick {
                run_id: 1,
                interval_ms: 300
            }]
        );
        assert_eq!(engine.progress, 5);
        assert!(apply_event(&mut engine, &mut workspace, AnalysisEvent::Tick { run_id: 7 }).is_empty());
    }
}
