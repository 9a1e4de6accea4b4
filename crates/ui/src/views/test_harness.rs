use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, Operation, TriviaApi, TriviaError};
use trivia_core::model::{AnswerResult, AnswerSubmission, Question, QuestionId, SessionSettings};
use trivia_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::{GameView, HomeView};

pub const WELCOME_TEXT: &str = "Welcome to Triviatron!";
pub const PROMPT: &str = "What is the capital of France?";

/// Canned trivia service; `failing` makes every call fail.
pub struct FakeTriviaApi {
    failing: bool,
}

#[async_trait]
impl TriviaApi for FakeTriviaApi {
    async fn fetch_welcome_text(&self) -> Result<String, TriviaError> {
        if self.failing {
            return Err(TriviaError::Timeout {
                operation: Operation::WelcomeText,
            });
        }
        Ok(WELCOME_TEXT.to_string())
    }

    async fn fetch_question(&self) -> Result<Question, TriviaError> {
        if self.failing {
            return Err(TriviaError::Timeout {
                operation: Operation::FetchQuestion,
            });
        }
        let options = ["Paris", "Rome", "Madrid", "Berlin"]
            .iter()
            .map(ToString::to_string)
            .collect();
        Ok(Question::new(QuestionId::Number(1), PROMPT, options).expect("valid question"))
    }

    async fn submit_answer(
        &self,
        submission: &AnswerSubmission,
    ) -> Result<AnswerResult, TriviaError> {
        if submission.selected == "Paris" {
            Ok(AnswerResult::correct())
        } else {
            Ok(AnswerResult::incorrect("Paris"))
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Game,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<AppServices>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Game => rsx! { GameView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive the dom until the rendered html contains `needle`.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        for _ in 0..40 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, failing: bool) -> ViewHarness {
    let api: Arc<dyn TriviaApi> = Arc::new(FakeTriviaApi { failing });
    let app = Arc::new(AppServices::new(api, SessionSettings::default()).with_clock(fixed_clock()));

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom }
}
