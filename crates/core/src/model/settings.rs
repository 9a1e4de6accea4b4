use std::time::Duration;

use crate::model::SessionError;

/// Length of a play-through in seconds.
pub const DEFAULT_TOTAL_SECS: u32 = 60;

/// Pause between answer feedback and the next question.
pub const DEFAULT_NEXT_QUESTION_DELAY: Duration = Duration::from_secs(2);

/// Timing knobs for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    total_secs: u32,
    next_question_delay: Duration,
}

impl SessionSettings {
    /// # Errors
    ///
    /// Returns `SessionError::InvalidSettings` when `total_secs` is zero.
    pub fn new(total_secs: u32, next_question_delay: Duration) -> Result<Self, SessionError> {
        if total_secs == 0 {
            return Err(SessionError::InvalidSettings {
                reason: "total_secs must be greater than zero",
            });
        }
        Ok(Self {
            total_secs,
            next_question_delay,
        })
    }

    #[must_use]
    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    #[must_use]
    pub fn next_question_delay(&self) -> Duration {
        self.next_question_delay
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            total_secs: DEFAULT_TOTAL_SECS,
            next_question_delay: DEFAULT_NEXT_QUESTION_DELAY,
        }
    }
}
