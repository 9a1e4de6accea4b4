use tokio::sync::oneshot;
use trivia_core::model::{
    AnswerResult, Question, RoundOutcome, SessionEpoch, SessionSnapshot, SessionSummary,
};

use crate::error::{Operation, TriviaError};

/// State changes published to the presentation layer, in the order they happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Started(SessionSnapshot),
    Tick { time_remaining: u32 },
    QuestionRequested,
    QuestionReady(Question),
    /// Input is locked until the next `QuestionReady`.
    AnswerSubmitted { selected: String },
    AnswerResolved(RoundOutcome),
    RequestFailed(Operation),
    Ended(SessionSummary),
}

/// Everything the controller reacts to. User input, timers and network
/// completions all arrive through the same queue.
pub(crate) enum Command {
    Start,
    Answer(String),
    End,
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Tick(SessionEpoch),
    QuestionLoaded(SessionEpoch, Result<Question, TriviaError>),
    AnswerLoaded(SessionEpoch, Result<AnswerResult, TriviaError>),
    NextQuestionDue(SessionEpoch),
}
