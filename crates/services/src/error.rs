//! Shared error types for the services crate.

use std::fmt;

use thiserror::Error;

use trivia_core::model::{QuestionError, SessionError};

/// The remote call that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    WelcomeText,
    FetchQuestion,
    SubmitAnswer,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::WelcomeText => "welcome text",
            Operation::FetchQuestion => "fetch question",
            Operation::SubmitAnswer => "submit answer",
        };
        f.write_str(label)
    }
}

/// Errors emitted by `TriviaApi` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TriviaError {
    #[error("{operation} request failed with status {status}")]
    HttpStatus {
        operation: Operation,
        status: reqwest::StatusCode,
    },
    #[error("{operation} request timed out")]
    Timeout { operation: Operation },
    #[error("{operation} request failed")]
    Http {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} returned an invalid question")]
    InvalidQuestion {
        operation: Operation,
        #[source]
        source: QuestionError,
    },
}

impl TriviaError {
    pub(crate) fn from_reqwest(operation: Operation, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { operation }
        } else {
            Self::Http { operation, source }
        }
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            TriviaError::HttpStatus { operation, .. }
            | TriviaError::Timeout { operation }
            | TriviaError::Http { operation, .. }
            | TriviaError::InvalidQuestion { operation, .. } => *operation,
        }
    }
}

/// Errors emitted by `SessionHandle`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("session controller has stopped")]
    Closed,
}

/// Errors emitted while building configuration and clients.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid base url {raw:?}")]
    InvalidBaseUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base url must use http or https: {raw:?}")]
    UnsupportedScheme { raw: String },
    #[error("{var} must be a whole number, got {raw:?}")]
    InvalidNumber { var: &'static str, raw: String },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}
