use dioxus::prelude::*;
use futures::StreamExt;
use std::rc::Rc;

use super::error::LookupResult;
use crate::suggest::{fetch_suggestions, HttpSuggestionSource, Suggestion, SuggestBox, SuggestionSource};
use crate::utils::settings::Settings;

/// Context shared by the search view: the search box state and where lookups go
#[derive(Clone)]
pub struct SuggestContext {
    pub suggest_box: Signal<SuggestBox>,
    pub source: Rc<dyn SuggestionSource>,
}

impl SuggestContext {
    /// Build the context with an HTTP source configured from `settings`
    pub fn from_settings(settings: &Settings, suggest_box: Signal<SuggestBox>) -> LookupResult<Self> {
        let source = HttpSuggestionSource::from_settings(settings)?;
        Ok(Self {
            suggest_box,
            source: Rc::new(source),
        })
    }

    /// Feed new input text to the search box and run the lookup it asks for.
    ///
    /// The lookup runs as a spawned task; its result is applied whenever it
    /// resolves.
    pub fn input_changed(&self, term: String) {
        let mut suggest_box = self.suggest_box;
        let Some(request) = suggest_box.write().on_input_changed(&term) else {
            return;
        };

        let suggestions = fetch_suggestions(self.source.as_ref(), &request);
        spawn(async move {
            let items: Vec<Suggestion> = suggestions.collect().await;
            suggest_box.write().apply_lookup(&request, items);
        });
    }
}
