#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod sessions;
pub mod trivia_client;

pub use trivia_core::Clock;

pub use app_services::AppServices;
pub use config::{DEFAULT_BASE_URL, TriviaConfig};
pub use error::{ConfigError, ControllerError, Operation, TriviaError};
pub use sessions::{SessionController, SessionEvent, SessionHandle};
pub use trivia_client::{HttpTriviaClient, TriviaApi};
