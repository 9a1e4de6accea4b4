use std::sync::Arc;

use services::{AppServices, SessionController, TriviaApi};
use trivia_core::model::SessionSettings;

pub trait UiApp: Send + Sync {
    fn trivia_api(&self) -> Arc<dyn TriviaApi>;
    fn session_settings(&self) -> SessionSettings;

    /// A controller for one mounted game view.
    fn session_controller(&self) -> SessionController;
}

impl UiApp for AppServices {
    fn trivia_api(&self) -> Arc<dyn TriviaApi> {
        self.api()
    }

    fn session_settings(&self) -> SessionSettings {
        AppServices::session_settings(self)
    }

    fn session_controller(&self) -> SessionController {
        AppServices::session_controller(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    trivia_api: Arc<dyn TriviaApi>,
    session_settings: SessionSettings,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app: Arc::clone(app),
            trivia_api: app.trivia_api(),
            session_settings: app.session_settings(),
        }
    }

    #[must_use]
    pub fn trivia_api(&self) -> Arc<dyn TriviaApi> {
        Arc::clone(&self.trivia_api)
    }

    #[must_use]
    pub fn session_settings(&self) -> SessionSettings {
        self.session_settings
    }

    #[must_use]
    pub fn session_controller(&self) -> SessionController {
        self.app.session_controller()
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
