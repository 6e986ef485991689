use dioxus::{logger::tracing, prelude::*};
use dioxus_desktop::{Config, WindowBuilder};
use views::Search;

mod components;
mod contexts;
mod suggest;
mod views;
mod utils;

use contexts::SuggestContext;
use suggest::SuggestBox;
use utils::settings::Settings;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Search {},
}

const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

fn main() {
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new().with_title("Bird Search")
            ),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    // Settings are read once; the logger is running by the time the app renders
    let settings = use_hook(Settings::load);
    let suggest_box = use_signal(|| SuggestBox::new(&settings));
    let context = use_hook(|| SuggestContext::from_settings(&settings, suggest_box));

    match context {
        Err(err) => {
            tracing::error!("Failed to set up the suggestion source: {}", err);
            rsx! {
                document::Link { rel: "stylesheet", href: MAIN_CSS }
                div {
                    class: "error-banner",
                    style: "background-color: #fef2f2; border: 1px solid #fecaca; color: #dc2626; padding: 1rem; margin: 1rem; border-radius: 0.5rem;",
                    "⚠️ Bird search is unavailable: {err}"
                }
            }
        }
        Ok(context) => {
            use_context_provider(|| context);

            rsx! {
                document::Link { rel: "stylesheet", href: MAIN_CSS }

                Router::<Route> {}
            }
        }
    }
}
