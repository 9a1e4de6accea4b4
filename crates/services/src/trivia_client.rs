use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use trivia_core::model::{AnswerResult, AnswerSubmission, Question, QuestionId};

use crate::config::TriviaConfig;
use crate::error::{ConfigError, Operation, TriviaError};

/// Request/response access to the remote trivia service.
///
/// Every call is a single attempt; failures are returned, never retried.
#[async_trait]
pub trait TriviaApi: Send + Sync {
    async fn fetch_welcome_text(&self) -> Result<String, TriviaError>;

    async fn fetch_question(&self) -> Result<Question, TriviaError>;

    /// The selection is forwarded as-is; the service decides whether it is valid.
    async fn submit_answer(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<AnswerResult, TriviaError>;
}

#[derive(Clone)]
pub struct HttpTriviaClient {
    client: Client,
    base_url: String,
}

impl HttpTriviaClient {
    /// # Errors
    ///
    /// Returns `ConfigError::Client` if the HTTP client cannot be built.
    pub fn new(config: &TriviaConfig) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Response, TriviaError> {
        let response = request
            .send()
            .await
            .map_err(|err| TriviaError::from_reqwest(operation, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TriviaError::HttpStatus { operation, status });
        }
        tracing::debug!(%operation, %status, "trivia request completed");
        Ok(response)
    }
}

#[async_trait]
impl TriviaApi for HttpTriviaClient {
    async fn fetch_welcome_text(&self) -> Result<String, TriviaError> {
        let operation = Operation::WelcomeText;
        let response = self
            .send(operation, self.client.get(self.endpoint("welcome-text")))
            .await?;
        response
            .text()
            .await
            .map_err(|err| TriviaError::from_reqwest(operation, err))
    }

    async fn fetch_question(&self) -> Result<Question, TriviaError> {
        let operation = Operation::FetchQuestion;
        let response = self
            .send(operation, self.client.get(self.endpoint("question")))
            .await?;
        let body: QuestionPayload = response
            .json()
            .await
            .map_err(|err| TriviaError::from_reqwest(operation, err))?;

        Question::new(body.id, body.question, body.options)
            .map_err(|source| TriviaError::InvalidQuestion { operation, source })
    }

    async fn submit_answer(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<AnswerResult, TriviaError> {
        let operation = Operation::SubmitAnswer;
        let payload = AnswerRequest {
            id: &submission.question_id,
            selected: &submission.selected,
        };
        let response = self
            .send(
                operation,
                self.client.post(self.endpoint("answer")).json(&payload),
            )
            .await?;
        let body: AnswerPayload = response
            .json()
            .await
            .map_err(|err| TriviaError::from_reqwest(operation, err))?;

        Ok(AnswerResult {
            is_correct: body.is_correct,
            correct_answer: body.correct_answer,
        })
    }
}

#[derive(Debug, Deserialize)]
struct QuestionPayload {
    id: QuestionId,
    question: String,
    options: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AnswerRequest<'a> {
    id: &'a QuestionId,
    selected: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnswerPayload {
    is_correct: bool,
    #[serde(default)]
    correct_answer: Option<String>,
}
