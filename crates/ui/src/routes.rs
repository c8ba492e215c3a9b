use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HighScoresView, HomeView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/scores", HighScoresView)] Scores {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            TopBar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn TopBar() -> Element {
    rsx! {
        nav { class: "topbar",
            span { class: "brand", "Quiz Master" }
            ul {
                li { Link { to: Route::Home {}, "Home" } }
                li { Link { to: Route::Scores {}, "High Scores" } }
            }
        }
    }
}
