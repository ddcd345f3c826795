use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use codeiv_webclient::{ScoreReport, ScoringService};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use super::controller::{Phase, Submission, SubmissionController, SubmitTrigger};
use crate::notice::Notice;
use crate::timer::{CountdownTimer, TimerState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewEvent {
    StartTimer,
    SubmitClicked,
    TimeUp,
    SwitchLanguage(String),
    EditCode(String),
    Restart,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitFailure {
    #[error(transparent)]
    Service(#[from] codeiv_webclient::Error),

    #[error("Scoring did not finish within {0:?}")]
    Timeout(Duration),
}

type ScoringFuture = Pin<Box<dyn Future<Output = Result<ScoreReport, SubmitFailure>> + Send>>;

/// Presentation side of an interview. Every method has a do-nothing default.
pub trait InterviewView {
    fn render_phase(&mut self, _ctl: &SubmissionController) {}

    fn render_clock(&mut self, _state: TimerState) {}

    fn notify(&mut self, _notice: &Notice) {}

    /// Current editor contents, pulled right before a submission.
    fn read_buffer(&mut self) -> Option<String> {
        None
    }

    /// Called when the controller replaced the buffer (language switch, restart).
    fn write_buffer(&mut self, _language: &str, _code: &str) {}
}

/// Event loop of one interview: feeds events to the controller one at a time,
/// owns the countdown and runs the scoring request next to the event queue.
pub struct InterviewSession {
    controller: SubmissionController,
    scorer: Arc<dyn ScoringService>,
    submit_timeout: Duration,
    events_tx: mpsc::UnboundedSender<InterviewEvent>,
    events_rx: mpsc::UnboundedReceiver<InterviewEvent>,
    timer: Option<CountdownTimer>,
}

impl InterviewSession {
    pub fn new(
        controller: SubmissionController,
        scorer: Arc<dyn ScoringService>,
        submit_timeout: Duration,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            scorer,
            submit_timeout,
            events_tx,
            events_rx,
            timer: None,
        }
    }

    pub fn event_sender(&self) -> mpsc::UnboundedSender<InterviewEvent> {
        self.events_tx.clone()
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    /// Runs until `Quit`. Returns the controller for inspecting the outcome.
    pub async fn run(mut self, view: &mut impl InterviewView) -> SubmissionController {
        let mut pending: Option<ScoringFuture> = None;
        let mut refresh = time::interval(Duration::from_secs(1));
        refresh.set_missed_tick_behavior(MissedTickBehavior::Skip);

        view.write_buffer(self.controller.language(), self.controller.code());
        view.render_phase(&self.controller);

        loop {
            tokio::select! {
                biased;

                outcome = async {
                    match pending.as_mut() {
                        Some(fut) => fut.await,
                        None => std::future::pending().await,
                    }
                }, if pending.is_some() => {
                    pending = None;
                    self.stop_timer();
                    if let Some(res) = self.controller.resolve(outcome) {
                        log::info!(
                            "Resolved with score {} (fallback: {})",
                            res.report().score,
                            res.is_fallback()
                        );
                    }
                    self.flush(view);
                }

                event = self.events_rx.recv() => {
                    let Some(event) = event else { break };
                    if event == InterviewEvent::Quit {
                        break;
                    }
                    if let Some(fut) = self.handle(event, view) {
                        pending = Some(fut);
                    }
                    self.flush(view);
                }

                _ = refresh.tick() => {
                    if let Some(timer) = &self.timer {
                        view.render_clock(timer.state());
                    }
                }
            }
        }

        self.stop_timer();
        if pending.is_some() {
            log::warn!("Left the interview while a submission was still being scored");
        }
        self.controller
    }

    fn handle(
        &mut self,
        event: InterviewEvent,
        view: &mut impl InterviewView,
    ) -> Option<ScoringFuture> {
        use InterviewEvent::*;

        let res = match event {
            StartTimer => self.start_timer(),
            SubmitClicked => return self.submit(SubmitTrigger::Manual, view),
            TimeUp => return self.submit(SubmitTrigger::TimeUp, view),
            SwitchLanguage(lang) => self.controller.switch_language(&lang).map(|code| {
                view.write_buffer(&lang, code);
            }),
            EditCode(code) => self.controller.edit_code(code),
            Restart => self.controller.reset().map(|()| {
                view.write_buffer(self.controller.language(), self.controller.code());
            }),
            Quit => Ok(()),
        };
        if let Err(e) = res {
            log::debug!("Rejected event: {}", e);
            view.notify(&Notice::error(e.to_string()));
        }
        None
    }

    fn start_timer(&mut self) -> Result<(), super::ControllerError> {
        let minutes = self.controller.start_timer()?;
        let tx = self.events_tx.clone();
        let mut timer = CountdownTimer::new(minutes, move || {
            // The receiver is gone only after the session ended.
            let _ = tx.send(InterviewEvent::TimeUp);
        })?;
        timer.start();
        self.timer = Some(timer);
        Ok(())
    }

    fn submit(
        &mut self,
        trigger: SubmitTrigger,
        view: &mut impl InterviewView,
    ) -> Option<ScoringFuture> {
        if self.controller.phase() == &Phase::TimerRunning {
            if let Some(code) = view.read_buffer() {
                // editing is always allowed while running
                let _ = self.controller.edit_code(code);
            }
        }
        let submission = self.controller.request_submit(trigger)?;
        Some(self.dispatch(submission))
    }

    fn dispatch(&self, submission: Submission) -> ScoringFuture {
        let scorer = Arc::clone(&self.scorer);
        let limit = self.submit_timeout;
        Box::pin(async move {
            let Submission {
                question_id,
                code,
                language,
                ..
            } = submission;
            match time::timeout(limit, scorer.submit_code(&question_id, &code, &language)).await {
                Ok(res) => res.map_err(SubmitFailure::from),
                Err(_) => Err(SubmitFailure::Timeout(limit)),
            }
        })
    }

    fn stop_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    fn flush(&mut self, view: &mut impl InterviewView) {
        for notice in self.controller.drain_notices() {
            view.notify(&notice);
        }
        view.render_phase(&self.controller);
    }
}
