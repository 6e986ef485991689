use dioxus::prelude::*;

use crate::components::{BirdImages, SearchInput, SearchKey, SuggestionList};
use crate::contexts::SuggestContext;

const SEARCH_CSS: Asset = asset!("/assets/styling/search.css");

#[component]
pub fn Search() -> Element {
    let context = use_context::<SuggestContext>();
    let mut suggest_box = context.suggest_box;

    let query = suggest_box.read().input().to_string();
    let items = suggest_box.read().suggestions().to_vec();
    let active = suggest_box.read().active_index();
    let card_html = suggest_box.read().card_html();

    rsx! {
        document::Link { rel: "stylesheet", href: SEARCH_CSS }
        div { class: "search-page",
            h1 { class: "search-title", "Bird Search" }
            div { class: "search-box",
                SearchInput {
                    query,
                    on_change: move |term: String| context.input_changed(term),
                    on_key: move |key: SearchKey| match key {
                        SearchKey::Next => suggest_box.write().focus_next(),
                        SearchKey::Previous => suggest_box.write().focus_previous(),
                        SearchKey::Select => {
                            suggest_box.write().select_active();
                        }
                        SearchKey::Dismiss => suggest_box.write().dismiss(),
                    },
                    on_blur: move |_: ()| suggest_box.write().close()
                }
                SuggestionList {
                    items,
                    active,
                    on_focus: move |index: usize| suggest_box.write().focus_index(index),
                    on_select: move |index: usize| {
                        let item = suggest_box.read().suggestions().get(index).cloned();
                        suggest_box.write().on_select_suggestion(item.as_ref());
                    }
                }
            }
            BirdImages { html: card_html }
        }
    }
}
