use dioxus::prelude::*;
use dioxus_router::use_navigator;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let api = ctx.trivia_api();
    let navigator = use_navigator();

    let resource = use_resource(move || {
        let api = api.clone();
        async move {
            api.fetch_welcome_text().await.map_err(|err| {
                tracing::error!(error = %err, "welcome text unavailable");
                ViewError::Unknown
            })
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page home-page", id: "start-view",
            match state {
                ViewState::Idle => rsx! {},
                ViewState::Loading => rsx! {
                    p { class: "welcome-text", "Loading..." }
                },
                ViewState::Ready(text) => rsx! {
                    p { class: "welcome-text", id: "welcome-text", "{text}" }
                },
                ViewState::Error(_) => rsx! {
                    p { class: "feedback feedback--error", {ViewError::message()} }
                },
            }

            button {
                class: "btn btn-primary",
                id: "start-btn",
                onclick: move |_| {
                    let _ = navigator.push(Route::Play {});
                },
                "Start"
            }
        }
    }
}
