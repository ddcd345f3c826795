use std::fmt;

use codeiv_webclient::{Question, QuestionId, ScoreReport};
use rand::{rngs::StdRng, SeedableRng as _};

use super::{fallback, starter::starter_code};
use crate::notice::Notice;
use crate::timer::TimerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Scored by the service; report passed through unchanged.
    Success(ScoreReport),
    /// The service failed; report synthesized locally.
    Fallback(ScoreReport),
}

impl Resolution {
    pub fn report(&self) -> &ScoreReport {
        match self {
            Self::Success(r) | Self::Fallback(r) => r,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    TimerArmed,
    TimerRunning,
    Submitting,
    Resolved(Resolution),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::TimerArmed => "timer-armed",
            Self::TimerRunning => "timer-running",
            Self::Submitting => "submitting",
            Self::Resolved(_) => "resolved",
        }
    }

    pub fn allows_language_switch(&self) -> bool {
        matches!(self, Self::Idle | Self::TimerArmed)
    }

    pub fn allows_editing(&self) -> bool {
        matches!(self, Self::Idle | Self::TimerArmed | Self::TimerRunning)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    Manual,
    TimeUp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    InFlight,
    Resolved(Resolution),
}

/// What was sent for scoring in one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub question_id: QuestionId,
    pub code: String,
    pub language: String,
    pub status: SubmissionStatus,
}

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Question '{question}' does not support language '{language}'")]
    UnsupportedLanguage { language: String, question: QuestionId },

    #[error("Language can only be changed before the timer starts (currently {0})")]
    LanguageLocked(&'static str),

    #[error("Code can no longer be edited (currently {0})")]
    CodeLocked(&'static str),

    #[error("Cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    #[error(transparent)]
    Timer(#[from] TimerError),
}

/// State machine of one interview attempt.
///
/// ```text
/// Idle -> TimerArmed -> TimerRunning -> Submitting -> Resolved(Success | Fallback)
/// ```
///
/// Holds no timer and performs no I/O: the driver feeds it events one at a time
/// and carries out the scoring request it hands out.
pub struct SubmissionController {
    question: Question,
    default_minutes: u32,
    armed_minutes: Option<u32>,
    language: String,
    code: String,
    phase: Phase,
    submission: Option<Submission>,
    notices: Vec<Notice>,
    rng: StdRng,
}

impl SubmissionController {
    pub fn new(question: Question, default_minutes: u32) -> Self {
        let language = question.language.first().cloned().unwrap_or_default();
        let code = starter_code(&language).to_owned();
        Self {
            question,
            default_minutes,
            armed_minutes: None,
            language,
            code,
            phase: Phase::Idle,
            submission: None,
            notices: Vec::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic fallback scores.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        match &self.phase {
            Phase::Resolved(r) => Some(r),
            _ => None,
        }
    }

    /// Armed duration, or the default if not armed yet.
    pub fn duration_minutes(&self) -> u32 {
        self.armed_minutes.unwrap_or(self.default_minutes)
    }

    pub fn is_timer_started(&self) -> bool {
        matches!(
            self.phase,
            Phase::TimerRunning | Phase::Submitting | Phase::Resolved(_)
        )
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn invalid(&self, action: &'static str) -> ControllerError {
        ControllerError::InvalidTransition {
            action,
            phase: self.phase.name(),
        }
    }

    pub fn edit_code(&mut self, code: impl Into<String>) -> Result<(), ControllerError> {
        if !self.phase.allows_editing() {
            return Err(ControllerError::CodeLocked(self.phase.name()));
        }
        self.code = code.into();
        Ok(())
    }

    /// Replaces the buffer with the new language's starter code. Unsaved edits are lost.
    pub fn switch_language(&mut self, language: &str) -> Result<&str, ControllerError> {
        if !self.phase.allows_language_switch() {
            return Err(ControllerError::LanguageLocked(self.phase.name()));
        }
        if !self.question.supports_language(language) {
            return Err(ControllerError::UnsupportedLanguage {
                language: language.to_owned(),
                question: self.question.id.clone(),
            });
        }
        self.language = language.to_owned();
        self.code = starter_code(language).to_owned();
        log::debug!("Switched language to {}", language);
        Ok(&self.code)
    }

    /// Sets the countdown duration. May be called again to change it before the start.
    pub fn arm_timer(&mut self, minutes: u32) -> Result<(), ControllerError> {
        if !matches!(self.phase, Phase::Idle | Phase::TimerArmed) {
            return Err(self.invalid("arm the timer"));
        }
        if minutes == 0 {
            return Err(TimerError::ZeroDuration.into());
        }
        self.armed_minutes = Some(minutes);
        self.phase = Phase::TimerArmed;
        Ok(())
    }

    /// Returns the duration, in minutes, the countdown should run for.
    /// From `Idle` the default duration is armed first.
    pub fn start_timer(&mut self) -> Result<u32, ControllerError> {
        match self.phase {
            Phase::Idle => self.arm_timer(self.default_minutes)?,
            Phase::TimerArmed => {}
            _ => return Err(self.invalid("start the timer")),
        }
        self.phase = Phase::TimerRunning;
        Ok(self.duration_minutes())
    }

    /// Moves into `Submitting` and hands out the snapshot to score.
    /// Only the first trigger while the timer runs does anything; every later
    /// trigger, and any trigger before the start, returns `None`.
    pub fn request_submit(&mut self, trigger: SubmitTrigger) -> Option<Submission> {
        if self.phase != Phase::TimerRunning {
            log::debug!("Ignored {:?} submit while {}", trigger, self.phase);
            return None;
        }
        if trigger == SubmitTrigger::TimeUp {
            self.notices.push(Notice::time_up());
        }

        let submission = Submission {
            question_id: self.question.id.clone(),
            code: self.code.clone(),
            language: self.language.clone(),
            status: SubmissionStatus::InFlight,
        };
        self.submission = Some(submission.clone());
        self.phase = Phase::Submitting;
        log::info!(
            "Submitting {} solution for question {} ({:?})",
            submission.language,
            submission.question_id,
            trigger
        );
        Some(submission)
    }

    /// Applies the scoring outcome. Ignored unless `Submitting`.
    /// Any error, and any report with a score above 100, resolves to a fallback.
    pub fn resolve<E: fmt::Display>(
        &mut self,
        outcome: Result<ScoreReport, E>,
    ) -> Option<&Resolution> {
        if self.phase != Phase::Submitting {
            log::debug!("Ignored scoring outcome while {}", self.phase);
            return None;
        }

        let resolution = match outcome {
            Ok(report) if report.score <= 100 => Resolution::Success(report),
            Ok(report) => {
                log::warn!("Scoring service returned score {}; using fallback", report.score);
                Resolution::Fallback(fallback::synthesize_report(&mut self.rng))
            }
            Err(e) => {
                log::warn!("Scoring failed; using fallback: {}", e);
                Resolution::Fallback(fallback::synthesize_report(&mut self.rng))
            }
        };

        if let Some(s) = &mut self.submission {
            s.status = SubmissionStatus::Resolved(resolution.clone());
        }
        self.notices.push(Notice::submitted());
        self.phase = Phase::Resolved(resolution);
        self.resolution()
    }

    /// Starts a fresh attempt on the same question.
    pub fn reset(&mut self) -> Result<(), ControllerError> {
        if !matches!(self.phase, Phase::Resolved(_)) {
            return Err(self.invalid("reset"));
        }
        self.language = self.question.language.first().cloned().unwrap_or_default();
        self.code = starter_code(&self.language).to_owned();
        self.armed_minutes = None;
        self.submission = None;
        self.phase = Phase::Idle;
        Ok(())
    }
}
