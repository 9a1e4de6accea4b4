use std::sync::Arc;

use trivia_core::model::SessionSettings;

use crate::Clock;
use crate::config::TriviaConfig;
use crate::error::ConfigError;
use crate::sessions::SessionController;
use crate::trivia_client::{HttpTriviaClient, TriviaApi};

/// Assembles app-facing services from configuration.
#[derive(Clone)]
pub struct AppServices {
    api: Arc<dyn TriviaApi>,
    settings: SessionSettings,
    clock: Clock,
}

impl AppServices {
    /// Build services backed by the HTTP trivia client.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the HTTP client cannot be built.
    pub fn from_config(config: &TriviaConfig) -> Result<Self, ConfigError> {
        let client = HttpTriviaClient::new(config)?;
        tracing::info!(base_url = client.base_url(), "trivia service configured");
        Ok(Self::new(Arc::new(client), config.session))
    }

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

    #[must_use]
    pub fn api(&self) -> Arc<dyn TriviaApi> {
        Arc::clone(&self.api)
    }

    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        self.settings
    }

    /// A fresh controller; each game view spawns its own.
    #[must_use]
    pub fn session_controller(&self) -> SessionController {
        SessionController::new(self.api(), self.settings).with_clock(self.clock)
    }
}
