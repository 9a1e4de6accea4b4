//! Timed trivia session driver.
//!
//! ```text
//!  SessionHandle ──Start/Answer/End──▶ ┌──────────────┐ ──SessionEvent──▶ UI
//!                                      │  actor task  │
//!  tick task ──────Tick(epoch)───────▶ │  (Session)   │
//!  fetch/submit tasks ──*Loaded──────▶ │              │
//!  delay task ──NextQuestionDue──────▶ └──────────────┘
//! ```
//!
//! The actor is the only owner of the `Session` and handles one command at a
//! time. Spawned tasks never touch state; they post their completion back
//! tagged with the epoch they were started under, and the actor drops anything
//! that belongs to a finished play-through.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use trivia_core::model::{
    AnswerResult, Question, Session, SessionEpoch, SessionSettings, SessionSnapshot, Tick,
};

use super::events::{Command, SessionEvent};
use crate::Clock;
use crate::error::{ControllerError, TriviaError};
use crate::trivia_client::TriviaApi;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Builds and spawns the session actor.
#[derive(Clone)]
pub struct SessionController {
    api: Arc<dyn TriviaApi>,
    settings: SessionSettings,
    clock: Clock,
}

impl SessionController {
    #[must_use]
    pub fn new(api: Arc<dyn TriviaApi>, settings: SessionSettings) -> Self {
        Self {
            api,
            settings,
            clock: Clock::default_clock(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Spawn the actor on the current tokio runtime.
    ///
    /// The actor stops once every `SessionHandle` has been dropped.
    #[must_use]
    pub fn spawn(self) -> (SessionHandle, mpsc::UnboundedReceiver<SessionEvent>) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let actor = Actor {
            api: self.api,
            session: Session::new(self.settings).with_clock(self.clock),
            delay: self.settings.next_question_delay(),
            commands: commands_tx.downgrade(),
            events: events_tx,
            ticker: None,
        };
        tokio::spawn(actor.run(commands_rx));

        (
            SessionHandle {
                commands: commands_tx,
            },
            events_rx,
        )
    }
}

/// Cheap, cloneable input side of a running controller.
#[derive(Clone)]
pub struct SessionHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl SessionHandle {
    /// Start a play-through, or replay after the previous one ended.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Closed` if the controller has stopped.
    pub fn start(&self) -> Result<(), ControllerError> {
        self.send(Command::Start)
    }

    /// Answer the displayed question. Ignored while input is locked.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Closed` if the controller has stopped.
    pub fn answer(&self, selected: impl Into<String>) -> Result<(), ControllerError> {
        self.send(Command::Answer(selected.into()))
    }

    /// # Errors
    ///
    /// Returns `ControllerError::Closed` if the controller has stopped.
    pub fn end(&self) -> Result<(), ControllerError> {
        self.send(Command::End)
    }

    /// # Errors
    ///
    /// Returns `ControllerError::Closed` if the controller has stopped.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, ControllerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Snapshot(reply_tx))?;
        reply_rx.await.map_err(|_| ControllerError::Closed)
    }

    fn send(&self, command: Command) -> Result<(), ControllerError> {
        self.commands
            .send(command)
            .map_err(|_| ControllerError::Closed)
    }
}

struct Actor {
    api: Arc<dyn TriviaApi>,
    session: Session,
    delay: Duration,
    commands: mpsc::WeakUnboundedSender<Command>,
    events: mpsc::UnboundedSender<SessionEvent>,
    ticker: Option<JoinHandle<()>>,
}

impl Actor {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        while let Some(command) = commands.recv().await {
            self.handle(command);
        }
        self.stop_ticking();
        tracing::debug!("session controller stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Answer(selected) => self.answer(selected),
            Command::End => self.end(),
            Command::Snapshot(reply) => {
                let _ = reply.send(self.session.snapshot());
            }
            Command::Tick(epoch) => self.tick(epoch),
            Command::QuestionLoaded(epoch, result) => self.question_loaded(epoch, result),
            Command::AnswerLoaded(epoch, result) => self.answer_loaded(epoch, result),
            Command::NextQuestionDue(epoch) => self.next_question_due(epoch),
        }
    }

    fn start(&mut self) {
        let epoch = match self.session.start() {
            Ok(epoch) => epoch,
            Err(err) => {
                tracing::debug!(error = %err, "ignoring start");
                return;
            }
        };
        tracing::info!(
            %epoch,
            total_secs = self.session.time_remaining(),
            "session started"
        );
        self.emit(SessionEvent::Started(self.session.snapshot()));
        self.start_ticking(epoch);
        self.request_question(epoch);
    }

    fn answer(&mut self, selected: String) {
        let submission = match self.session.submit_answer(selected) {
            Ok(submission) => submission,
            Err(err) => {
                tracing::debug!(error = %err, "ignoring answer");
                return;
            }
        };
        let epoch = self.session.epoch();
        self.emit(SessionEvent::AnswerSubmitted {
            selected: submission.selected.clone(),
        });

        let api = Arc::clone(&self.api);
        let commands = self.commands.clone();
        tokio::spawn(async move {
            let result = api.submit_answer(&submission).await;
            post(&commands, Command::AnswerLoaded(epoch, result));
        });
    }

    fn end(&mut self) {
        match self.session.end() {
            Ok(summary) => {
                self.stop_ticking();
                tracing::info!(high_score = summary.high_score, "session ended early");
                self.emit(SessionEvent::Ended(summary));
            }
            Err(err) => tracing::debug!(error = %err, "ignoring end"),
        }
    }

    fn tick(&mut self, epoch: SessionEpoch) {
        if epoch != self.session.epoch() {
            return;
        }
        match self.session.tick() {
            Ok(Tick::Running { time_remaining }) => {
                self.emit(SessionEvent::Tick { time_remaining });
            }
            Ok(Tick::Expired(summary)) => {
                self.stop_ticking();
                self.emit(SessionEvent::Tick { time_remaining: 0 });
                tracing::info!(
                    high_score = summary.high_score,
                    answered = summary.answered,
                    "time is up"
                );
                self.emit(SessionEvent::Ended(summary));
            }
            Err(err) => tracing::debug!(error = %err, "ignoring tick"),
        }
    }

    fn question_loaded(&mut self, epoch: SessionEpoch, result: Result<Question, TriviaError>) {
        let question = match result {
            Ok(question) => question,
            Err(err) => return self.request_failed(epoch, &err),
        };
        match self.session.receive_question(epoch, question) {
            Ok(question) => {
                let event = SessionEvent::QuestionReady(question.clone());
                self.emit(event);
            }
            Err(err) => tracing::debug!(error = %err, "dropping question"),
        }
    }

    fn answer_loaded(&mut self, epoch: SessionEpoch, result: Result<AnswerResult, TriviaError>) {
        let verdict = match result {
            Ok(verdict) => verdict,
            Err(err) => return self.request_failed(epoch, &err),
        };
        match self.session.resolve_answer(epoch, verdict) {
            Ok(outcome) => {
                let event = SessionEvent::AnswerResolved(outcome);
                self.emit(event);
                self.schedule_next_question(epoch);
            }
            Err(err) => tracing::debug!(error = %err, "dropping answer verdict"),
        }
    }

    fn next_question_due(&mut self, epoch: SessionEpoch) {
        if epoch != self.session.epoch() {
            return;
        }
        match self.session.begin_question_request() {
            Ok(()) => self.request_question(epoch),
            Err(err) => tracing::debug!(error = %err, "skipping next question"),
        }
    }

    fn request_failed(&mut self, epoch: SessionEpoch, err: &TriviaError) {
        tracing::error!(operation = %err.operation(), error = ?err, "trivia request failed");
        match self.session.fail_request(epoch) {
            Ok(()) => self.emit(SessionEvent::RequestFailed(err.operation())),
            Err(stale) => tracing::debug!(error = %stale, "failure belongs to a finished round"),
        }
    }

    fn request_question(&mut self, epoch: SessionEpoch) {
        self.emit(SessionEvent::QuestionRequested);
        let api = Arc::clone(&self.api);
        let commands = self.commands.clone();
        tokio::spawn(async move {
            let result = api.fetch_question().await;
            post(&commands, Command::QuestionLoaded(epoch, result));
        });
    }

    fn schedule_next_question(&self, epoch: SessionEpoch) {
        let delay = self.delay;
        let commands = self.commands.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            post(&commands, Command::NextQuestionDue(epoch));
        });
    }

    fn start_ticking(&mut self, epoch: SessionEpoch) {
        self.stop_ticking();
        let commands = self.commands.clone();
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            loop {
                interval.tick().await;
                if !post(&commands, Command::Tick(epoch)) {
                    break;
                }
            }
        }));
    }

    fn stop_ticking(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    fn emit(&self, event: SessionEvent) {
        // A UI that went away just stops listening.
        let _ = self.events.send(event);
    }
}

fn post(commands: &mpsc::WeakUnboundedSender<Command>, command: Command) -> bool {
    commands
        .upgrade()
        .is_some_and(|commands| commands.send(command).is_ok())
}
