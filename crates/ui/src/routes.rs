use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{GameView, HomeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/play", GameView)] Play {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "masthead",
                Link { to: Route::Home {}, h1 { "Triviatron" } }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
