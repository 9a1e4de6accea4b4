use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AnswerResult, AnswerSubmission, Question, SessionEpoch, SessionSettings};
use crate::time::Clock;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session is already running")]
    AlreadyActive,

    #[error("session is not running")]
    NotActive,

    #[error("a question is already outstanding")]
    QuestionOutstanding,

    #[error("no question is awaiting an answer")]
    NoQuestion,

    #[error("no answer is being submitted")]
    NotSubmitting,

    #[error("received a question that was not requested")]
    UnexpectedQuestion,

    #[error("no request is in flight")]
    NothingInFlight,

    #[error("completion from stale session epoch {epoch}")]
    Stale { epoch: SessionEpoch },

    #[error("invalid session settings: {reason}")]
    InvalidSettings { reason: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Active,
    Ended,
}

/// Feedback for one answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub is_correct: bool,
    pub selected: String,
    pub correct_answer: Option<String>,
    pub streak: u32,
    pub high_score: u32,
}

/// Where the current round is in its question/answer cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoundState {
    /// No round: the session is idle or over.
    #[default]
    Idle,
    /// A question fetch is in flight.
    Requesting,
    /// A question is displayed and input is open.
    Awaiting(Question),
    /// An answer is in flight; input is locked.
    Submitting { question: Question, selected: String },
    /// Feedback is showing until the next question is requested.
    Resolved(RoundOutcome),
    /// A request failed; nothing is displayed and nothing is retried.
    Stalled,
}

/// Point-in-time counters for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub epoch: SessionEpoch,
    pub time_remaining: u32,
    pub streak: u32,
    pub high_score: u32,
}

/// Final figures for a finished play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub high_score: u32,
    pub answered: u32,
    pub correct: u32,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

/// Result of one countdown step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Running { time_remaining: u32 },
    Expired(SessionSummary),
}

/// Timed trivia session.
///
/// Pure state machine: it never waits on anything. Callers feed it timer ticks,
/// fetched questions and answer verdicts, and read back what changed.
///
/// ```text
/// Idle ──start──▶ Active ──tick to 0 / end──▶ Ended ──start──▶ Active
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    settings: SessionSettings,
    clock: Clock,
    phase: SessionPhase,
    epoch: SessionEpoch,
    time_remaining: u32,
    streak: u32,
    high_score: u32,
    answered: u32,
    correct: u32,
    round: RoundState,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    #[must_use]
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            clock: Clock::default_clock(),
            phase: SessionPhase::Idle,
            epoch: SessionEpoch::default(),
            time_remaining: settings.total_secs(),
            streak: 0,
            high_score: 0,
            answered: 0,
            correct: 0,
            round: RoundState::Idle,
            started_at: None,
            ended_at: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == SessionPhase::Active
    }

    #[must_use]
    pub fn epoch(&self) -> SessionEpoch {
        self.epoch
    }

    #[must_use]
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// The question on screen, if any.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match &self.round {
            RoundState::Awaiting(question) | RoundState::Submitting { question, .. } => {
                Some(question)
            }
            _ => None,
        }
    }

    /// True only while a question is displayed and not yet answered.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        self.is_active() && matches!(self.round, RoundState::Awaiting(_))
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            epoch: self.epoch,
            time_remaining: self.time_remaining,
            streak: self.streak,
            high_score: self.high_score,
        }
    }

    /// Final figures, available once the session has ended.
    #[must_use]
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.phase != SessionPhase::Ended {
            return None;
        }
        Some(SessionSummary {
            high_score: self.high_score,
            answered: self.answered,
            correct: self.correct,
            started_at: self.started_at?,
            ended_at: self.ended_at?,
        })
    }

    /// Begin a fresh play-through and mark the first question as requested.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyActive` if a play-through is running.
    pub fn start(&mut self) -> Result<SessionEpoch, SessionError> {
        if self.is_active() {
            return Err(SessionError::AlreadyActive);
        }

        self.epoch = self.epoch.next();
        self.phase = SessionPhase::Active;
        self.time_remaining = self.settings.total_secs();
        self.streak = 0;
        self.high_score = 0;
        self.answered = 0;
        self.correct = 0;
        self.round = RoundState::Requesting;
        self.started_at = Some(self.clock.now());
        self.ended_at = None;
        Ok(self.epoch)
    }

    /// Advance the countdown by one second; ends the session at zero.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` if the session is not running.
    pub fn tick(&mut self) -> Result<Tick, SessionError> {
        if !self.is_active() {
            return Err(SessionError::NotActive);
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            return Ok(Tick::Expired(self.finish()));
        }
        Ok(Tick::Running {
            time_remaining: self.time_remaining,
        })
    }

    /// Mark the next question as requested once feedback is done.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` if the session is not running.
    /// Returns `SessionError::QuestionOutstanding` if a question is still in flight
    /// or awaiting an answer.
    pub fn begin_question_request(&mut self) -> Result<(), SessionError> {
        if !self.is_active() {
            return Err(SessionError::NotActive);
        }
        match self.round {
            RoundState::Resolved(_) | RoundState::Stalled => {
                self.round = RoundState::Requesting;
                Ok(())
            }
            _ => Err(SessionError::QuestionOutstanding),
        }
    }

    /// Display a fetched question and open input.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Stale` for completions from another epoch or after the end.
    /// Returns `SessionError::UnexpectedQuestion` if no question was requested.
    pub fn receive_question(
        &mut self,
        epoch: SessionEpoch,
        question: Question,
    ) -> Result<&Question, SessionError> {
        self.ensure_current(epoch)?;
        if self.round != RoundState::Requesting {
            return Err(SessionError::UnexpectedQuestion);
        }

        self.round = RoundState::Awaiting(question);
        self.current_question().ok_or(SessionError::NoQuestion)
    }

    /// Lock input and produce the request for the selected option.
    ///
    /// The option is not checked against the question; the service validates it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` if the session is not running.
    /// Returns `SessionError::NoQuestion` if nothing is awaiting an answer.
    pub fn submit_answer(
        &mut self,
        selected: impl Into<String>,
    ) -> Result<AnswerSubmission, SessionError> {
        if !self.is_active() {
            return Err(SessionError::NotActive);
        }
        if !matches!(self.round, RoundState::Awaiting(_)) {
            return Err(SessionError::NoQuestion);
        }
        let RoundState::Awaiting(question) = std::mem::take(&mut self.round) else {
            return Err(SessionError::NoQuestion);
        };

        let selected = selected.into();
        let submission = AnswerSubmission {
            question_id: question.id().clone(),
            selected: selected.clone(),
        };
        self.round = RoundState::Submitting { question, selected };
        Ok(submission)
    }

    /// Apply the verdict for the in-flight answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Stale` for completions from another epoch or after the end.
    /// Returns `SessionError::NotSubmitting` if no answer is in flight.
    pub fn resolve_answer(
        &mut self,
        epoch: SessionEpoch,
        result: AnswerResult,
    ) -> Result<RoundOutcome, SessionError> {
        self.ensure_current(epoch)?;
        let RoundState::Submitting { selected, .. } = &self.round else {
            return Err(SessionError::NotSubmitting);
        };
        let selected = selected.clone();

        self.answered += 1;
        if result.is_correct {
            self.streak += 1;
            self.correct += 1;
        } else {
            self.streak = 0;
        }
        self.high_score = self.high_score.max(self.streak);

        let outcome = RoundOutcome {
            is_correct: result.is_correct,
            selected,
            correct_answer: result.correct_answer,
            streak: self.streak,
            high_score: self.high_score,
        };
        self.round = RoundState::Resolved(outcome.clone());
        Ok(outcome)
    }

    /// Record that the in-flight request failed. The session stays active.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Stale` for completions from another epoch or after the end.
    /// Returns `SessionError::NothingInFlight` if no request was outstanding.
    pub fn fail_request(&mut self, epoch: SessionEpoch) -> Result<(), SessionError> {
        self.ensure_current(epoch)?;
        match self.round {
            RoundState::Requesting | RoundState::Submitting { .. } => {
                self.round = RoundState::Stalled;
                Ok(())
            }
            _ => Err(SessionError::NothingInFlight),
        }
    }

    /// Stop the play-through early.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActive` if the session is not running.
    pub fn end(&mut self) -> Result<SessionSummary, SessionError> {
        if !self.is_active() {
            return Err(SessionError::NotActive);
        }
        Ok(self.finish())
    }

    fn finish(&mut self) -> SessionSummary {
        let ended_at = self.clock.now();
        self.phase = SessionPhase::Ended;
        self.round = RoundState::Idle;
        self.ended_at = Some(ended_at);
        SessionSummary {
            high_score: self.high_score,
            answered: self.answered,
            correct: self.correct,
            started_at: self.started_at.unwrap_or(ended_at),
            ended_at,
        }
    }

    fn ensure_current(&self, epoch: SessionEpoch) -> Result<(), SessionError> {
        if self.is_active() && epoch == self.epoch {
            Ok(())
        } else {
            Err(SessionError::Stale { epoch })
        }
    }
}
