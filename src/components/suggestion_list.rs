use dioxus::prelude::*;

use crate::suggest::Suggestion;

#[derive(Props, PartialEq, Clone)]
pub struct SuggestionListProps {
    items: Vec<Suggestion>,
    #[props(!optional)]
    active: Option<usize>,
    on_focus: EventHandler<usize>,
    on_select: EventHandler<usize>,
}

/// The dropdown of suggestions under the search input
#[component]
pub fn SuggestionList(props: SuggestionListProps) -> Element {
    if props.items.is_empty() {
        return rsx! {};
    }

    let on_focus = props.on_focus;
    let on_select = props.on_select;

    rsx! {
        ul { class: "suggestion-list",
            {props.items.iter().enumerate().map(|(index, item)| {
                let class = if props.active == Some(index) {
                    "suggestion suggestion-active"
                } else {
                    "suggestion"
                };
                rsx! {
                    li {
                        key: "{index}",
                        class: "{class}",
                        onmouseenter: move |_| on_focus.call(index),
                        // mousedown keeps focus on the input
                        onmousedown: move |evt| {
                            evt.prevent_default();
                            on_select.call(index);
                        },
                        "{item.label}"
                    }
                }
            })}
        }
    }
}
