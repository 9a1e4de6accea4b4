use services::SessionEvent;
use trivia_core::model::{Question, SessionPhase, SessionSummary};

use crate::views::ViewError;
use crate::vm::format_time_left;

/// What the feedback area shows for the current round.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Incorrect {
        correct_answer: Option<String>,
    },
    Failed,
}

/// Visual state of one answer button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Correct,
    Incorrect,
}

impl OptionMark {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Plain => "answer-option",
            Self::Correct => "answer-option correct",
            Self::Incorrect => "answer-option incorrect",
        }
    }
}

/// Render model for the game screen, folded from controller events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameVm {
    phase: SessionPhase,
    time_remaining: u32,
    streak: u32,
    high_score: u32,
    question: Option<Question>,
    input_enabled: bool,
    selected: Option<String>,
    verdict: Option<bool>,
    feedback: Feedback,
    summary: Option<SessionSummary>,
}

impl GameVm {
    #[must_use]
    pub fn new(total_secs: u32) -> Self {
        Self {
            phase: SessionPhase::Idle,
            time_remaining: total_secs,
            streak: 0,
            high_score: 0,
            question: None,
            input_enabled: false,
            selected: None,
            verdict: None,
            feedback: Feedback::None,
            summary: None,
        }
    }

    pub fn apply(&mut self, event: SessionEvent) {
        if self.phase != SessionPhase::Active && !matches!(event, SessionEvent::Started(_)) {
            tracing::trace!(?event, "ignoring event outside an active session");
            return;
        }

        match event {
            SessionEvent::Started(snapshot) => {
                *self = Self::new(snapshot.time_remaining);
                self.phase = SessionPhase::Active;
                self.streak = snapshot.streak;
                self.high_score = snapshot.high_score;
            }
            SessionEvent::Tick { time_remaining } => {
                self.time_remaining = time_remaining;
            }
            SessionEvent::QuestionRequested => {
                self.question = None;
                self.input_enabled = false;
                self.selected = None;
                self.verdict = None;
                self.feedback = Feedback::None;
            }
            SessionEvent::QuestionReady(question) => {
                self.question = Some(question);
                self.input_enabled = true;
                self.selected = None;
                self.verdict = None;
            }
            SessionEvent::AnswerSubmitted { selected } => {
                self.input_enabled = false;
                self.selected = Some(selected);
            }
            SessionEvent::AnswerResolved(outcome) => {
                self.streak = outcome.streak;
                self.high_score = outcome.high_score;
                self.selected = Some(outcome.selected);
                self.verdict = Some(outcome.is_correct);
                self.feedback = if outcome.is_correct {
                    Feedback::Correct
                } else {
                    Feedback::Incorrect {
                        correct_answer: outcome.correct_answer,
                    }
                };
            }
            SessionEvent::RequestFailed(_) => {
                self.input_enabled = false;
                self.feedback = Feedback::Failed;
            }
            SessionEvent::Ended(summary) => {
                self.phase = SessionPhase::Ended;
                self.high_score = summary.high_score;
                self.question = None;
                self.input_enabled = false;
                self.selected = None;
                self.verdict = None;
                self.feedback = Feedback::None;
                self.summary = Some(summary);
            }
        }
    }

    /// Lock input as soon as an option is clicked, before the controller
    /// confirms. Returns `false` if input was already locked.
    pub fn lock_input(&mut self, selected: &str) -> bool {
        if !self.input_enabled {
            return false;
        }
        self.input_enabled = false;
        self.selected = Some(selected.to_string());
        true
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == SessionPhase::Ended
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    #[must_use]
    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn timer_label(&self) -> String {
        format_time_left(self.time_remaining)
    }

    #[must_use]
    pub fn streak_label(&self) -> String {
        format!("Streak: {}", self.streak)
    }

    #[must_use]
    pub fn high_score_label(&self) -> String {
        format!("High Score: {}", self.high_score)
    }

    /// Only the clicked option is marked, and only once the verdict is in.
    #[must_use]
    pub fn option_mark(&self, option: &str) -> OptionMark {
        match (&self.selected, self.verdict) {
            (Some(selected), Some(true)) if selected == option => OptionMark::Correct,
            (Some(selected), Some(false)) if selected == option => OptionMark::Incorrect,
            _ => OptionMark::Plain,
        }
    }

    #[must_use]
    pub fn feedback_message(&self) -> Option<String> {
        match &self.feedback {
            Feedback::None => None,
            Feedback::Correct => Some("Correct!".to_string()),
            Feedback::Incorrect {
                correct_answer: Some(answer),
            } => Some(format!("Incorrect! The correct answer is: {answer}")),
            Feedback::Incorrect {
                correct_answer: None,
            } => Some("Incorrect!".to_string()),
            Feedback::Failed => Some(ViewError::message().to_string()),
        }
    }

    #[must_use]
    pub fn final_message(&self) -> Option<String> {
        self.summary().map(|summary| {
            format!(
                "Times Up! Your highest streak was {}. Play Again?",
                summary.high_score
            )
        })
    }
}
