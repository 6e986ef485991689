use dioxus::prelude::*;

/// Keys the search input turns into dropdown actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    Next,
    Previous,
    Select,
    Dismiss,
}

impl SearchKey {
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::ArrowDown => Some(SearchKey::Next),
            Key::ArrowUp => Some(SearchKey::Previous),
            Key::Enter => Some(SearchKey::Select),
            Key::Escape => Some(SearchKey::Dismiss),
            _ => None,
        }
    }
}

#[derive(Props, PartialEq, Clone)]
pub struct SearchInputProps {
    query: String,
    on_change: EventHandler<String>,
    on_key: EventHandler<SearchKey>,
    on_blur: EventHandler<()>,
}

#[component]
pub fn SearchInput(props: SearchInputProps) -> Element {
    rsx! {
        div { class: "search-container",
            input {
                id: "search",
                class: "search-input",
                r#type: "text",
                placeholder: "Search birds...",
                value: "{props.query}",
                oninput: move |evt| props.on_change.call(evt.value()),
                onkeydown: move |evt| {
                    if let Some(key) = SearchKey::from_key(&evt.key()) {
                        evt.prevent_default();
                        props.on_key.call(key);
                    }
                },
                // list items select on mousedown, which fires before this
                onblur: move |_| props.on_blur.call(())
            }
        }
    }
}
