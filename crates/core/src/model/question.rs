use thiserror::Error;

use crate::model::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("question has no answer options")]
    NoOptions,
}

/// One multiple-choice question as served for a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` if the prompt is blank.
    /// Returns `QuestionError::NoOptions` if there is nothing to choose from.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        Ok(Self {
            id,
            prompt,
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Answer options in the order the service sent them.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }
}

/// The answer sent back for the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSubmission {
    pub question_id: QuestionId,
    pub selected: String,
}

/// Server verdict for a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerResult {
    pub is_correct: bool,
    pub correct_answer: Option<String>,
}

impl AnswerResult {
    #[must_use]
    pub fn correct() -> Self {
        Self {
            is_correct: true,
            correct_answer: None,
        }
    }

    #[must_use]
    pub fn incorrect(correct_answer: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            correct_answer: Some(correct_answer.into()),
        }
    }
}
