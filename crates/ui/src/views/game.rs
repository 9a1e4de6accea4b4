use dioxus::prelude::*;

use services::SessionHandle;

use crate::context::AppContext;
use crate::vm::{Feedback, GameVm};

/// One play-through per mount. The controller task stops once the view is
/// unmounted and its handle is dropped.
#[component]
pub fn GameView() -> Element {
    let ctx = use_context::<AppContext>();
    let total_secs = ctx.session_settings().total_secs();
    let mut vm = use_signal(|| GameVm::new(total_secs));

    let handle = use_hook(move || {
        let (handle, mut events) = ctx.session_controller().spawn();
        spawn(async move {
            while let Some(event) = events.recv().await {
                vm.write().apply(event);
            }
            tracing::debug!("session event stream closed");
        });
        start_game(&handle);
        handle
    });

    let on_answer = {
        let handle = handle.clone();
        use_callback(move |option: String| {
            if !vm.write().lock_input(&option) {
                return;
            }
            if let Err(err) = handle.answer(option) {
                tracing::warn!(error = %err, "answer not delivered");
            }
        })
    };

    let on_replay = use_callback(move |()| start_game(&handle));

    let state = vm.read().clone();

    rsx! {
        div { class: "page game-page", id: "game-view",
            div { class: "game-stats",
                span { class: "stat", id: "timer", "{state.timer_label()}" }
                span { class: "stat", id: "streak", "{state.streak_label()}" }
                span { class: "stat", id: "high-score", "{state.high_score_label()}" }
            }

            if state.is_over() {
                div { class: "game-over", id: "feedback",
                    p { {state.final_message().unwrap_or_default()} }
                    button {
                        class: "btn btn-primary",
                        id: "play-again-btn",
                        onclick: move |_| on_replay.call(()),
                        "Play Again"
                    }
                }
            } else {
                QuestionPanel { state: state.clone(), on_answer }
                FeedbackPanel { feedback: state.feedback().clone(), message: state.feedback_message() }
            }
        }
    }
}

fn start_game(handle: &SessionHandle) {
    if let Err(err) = handle.start() {
        tracing::warn!(error = %err, "could not start a game");
    }
}

#[component]
fn QuestionPanel(state: GameVm, on_answer: Callback<String>) -> Element {
    let Some(question) = state.question() else {
        return rsx! {
            div { class: "question-container", id: "question-container",
                if *state.feedback() != Feedback::Failed {
                    p { class: "question-loading", "Loading question..." }
                }
            }
        };
    };

    rsx! {
        div { class: "question-container", id: "question-container",
            p { class: "question", "{question.prompt()}" }
            div { class: "answer-container", id: "answer-container",
                for option in question.options().iter().cloned() {
                    AnswerButton {
                        label: option.clone(),
                        class: state.option_mark(&option).class().to_string(),
                        disabled: !state.input_enabled(),
                        on_answer,
                    }
                }
            }
        }
    }
}

#[component]
fn AnswerButton(
    label: String,
    class: String,
    disabled: bool,
    on_answer: Callback<String>,
) -> Element {
    let selected = label.clone();
    rsx! {
        button {
            class,
            disabled,
            onclick: move |_| on_answer.call(selected.clone()),
            "{label}"
        }
    }
}

#[component]
fn FeedbackPanel(feedback: Feedback, message: Option<String>) -> Element {
    let class = match feedback {
        Feedback::None => "feedback",
        Feedback::Correct => "feedback feedback--correct",
        Feedback::Incorrect { .. } => "feedback feedback--incorrect",
        Feedback::Failed => "feedback feedback--error",
    };

    rsx! {
        div { class, id: "feedback",
            if let Some(message) = message {
                p { "{message}" }
            }
        }
    }
}
