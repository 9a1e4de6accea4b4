mod ids;
mod question;
mod session;
mod settings;

pub use ids::{QuestionId, SessionEpoch};
pub use question::{AnswerResult, AnswerSubmission, Question, QuestionError};
pub use session::{
    RoundOutcome, RoundState, Session, SessionError, SessionPhase, SessionSnapshot,
    SessionSummary, Tick,
};
pub use settings::{DEFAULT_NEXT_QUESTION_DELAY, DEFAULT_TOTAL_SECS, SessionSettings};
