use dioxus::logger::tracing;

use super::card::BirdCard;
use super::model::Suggestion;
use crate::utils::settings::{Settings, StaleResponsePolicy};
use crate::utils::text_utils::term_length;

/// A lookup the caller should run against a suggestion source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub term: String,
    pub generation: u64,
}

/// The dropdown under the search input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dropdown {
    #[default]
    Idle,
    Suggesting {
        items: Vec<Suggestion>,
        active: Option<usize>,
    },
}

/// State behind the search box: input text, dropdown, selection and rendered card.
///
/// All mutation goes through the `on_*` handlers so the whole flow can be
/// driven without a UI.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestBox {
    min_length: usize,
    image_base: String,
    stale_responses: StaleResponsePolicy,
    input: String,
    typed: String,
    dropdown: Dropdown,
    selection: Option<Suggestion>,
    card: Option<BirdCard>,
    issued: u64,
    current: Option<u64>,
}

impl SuggestBox {
    pub fn new(settings: &Settings) -> Self {
        Self {
            min_length: settings.min_length.max(1),
            image_base: settings.image_base.clone(),
            stale_responses: settings.stale_responses,
            input: String::new(),
            typed: String::new(),
            dropdown: Dropdown::Idle,
            selection: None,
            card: None,
            issued: 0,
            current: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn is_suggesting(&self) -> bool {
        matches!(self.dropdown, Dropdown::Suggesting { .. })
    }

    /// Suggestions currently visible, in source order
    pub fn suggestions(&self) -> &[Suggestion] {
        match &self.dropdown {
            Dropdown::Idle => &[],
            Dropdown::Suggesting { items, .. } => items,
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        match &self.dropdown {
            Dropdown::Idle => None,
            Dropdown::Suggesting { active, .. } => *active,
        }
    }

    /// The last committed selection. Never cleared once set.
    pub fn selection(&self) -> Option<&Suggestion> {
        self.selection.as_ref()
    }

    pub fn card(&self) -> Option<&BirdCard> {
        self.card.as_ref()
    }

    /// Markup for the `bird-images` container; empty before the first selection
    pub fn card_html(&self) -> String {
        self.card.as_ref().map(BirdCard::to_html).unwrap_or_default()
    }

    /// The user edited the input.
    ///
    /// Returns the lookup to run, or `None` when the term is too short, in which
    /// case the dropdown is closed.
    pub fn on_input_changed(&mut self, term: &str) -> Option<LookupRequest> {
        self.input = term.to_string();
        self.typed = term.to_string();

        if term_length(term) < self.min_length {
            self.current = None;
            self.dropdown = Dropdown::Idle;
            return None;
        }

        self.issued += 1;
        self.current = Some(self.issued);
        tracing::debug!("Issuing lookup #{} for {:?}", self.issued, term);
        Some(LookupRequest {
            term: term.to_string(),
            generation: self.issued,
        })
    }

    /// A lookup resolved. Failed lookups arrive here as an empty list.
    ///
    /// Returns whether the result was applied. Once the dropdown has been closed
    /// (selection, dismissal, term too short) pending responses are dropped;
    /// under [`StaleResponsePolicy::Latest`] so are responses to superseded lookups.
    pub fn apply_lookup(&mut self, request: &LookupRequest, items: Vec<Suggestion>) -> bool {
        let stale = match self.current {
            None => true,
            Some(current) => {
                self.stale_responses == StaleResponsePolicy::Latest
                    && current != request.generation
            }
        };
        if stale {
            tracing::debug!(
                "Dropping stale lookup #{} for {:?}",
                request.generation,
                request.term
            );
            return false;
        }

        self.dropdown = if items.is_empty() {
            Dropdown::Idle
        } else {
            Dropdown::Suggesting {
                items,
                active: None,
            }
        };
        true
    }

    /// Preview `item` in the input without committing it
    pub fn on_focus_suggestion(&mut self, item: &Suggestion) {
        if let Some(label) = item.display_label() {
            self.input = label.to_string();
        }
    }

    /// Make the dropdown entry at `index` active and preview it
    pub fn focus_index(&mut self, index: usize) {
        let item = match &mut self.dropdown {
            Dropdown::Suggesting { items, active } if index < items.len() => {
                *active = Some(index);
                items[index].clone()
            }
            _ => return,
        };
        self.on_focus_suggestion(&item);
    }

    pub fn focus_next(&mut self) {
        let len = self.suggestions().len();
        if len == 0 {
            return;
        }
        let next = match self.active_index() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.focus_index(next);
    }

    pub fn focus_previous(&mut self) {
        let len = self.suggestions().len();
        if len == 0 {
            return;
        }
        let previous = match self.active_index() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.focus_index(previous);
    }

    /// Commit a selection and render its card.
    ///
    /// `None`, or an item without a label, renders the placeholder and leaves the
    /// previous selection in place. The dropdown always closes.
    pub fn on_select_suggestion(&mut self, item: Option<&Suggestion>) -> &BirdCard {
        let card = match item.and_then(|item| item.display_label().map(|label| (item, label))) {
            Some((item, label)) => {
                self.input = label.to_string();
                self.typed = label.to_string();
                self.selection = Some(item.clone());
                BirdCard::for_label(label, &self.image_base)
            }
            None => BirdCard::Placeholder,
        };

        self.current = None;
        self.dropdown = Dropdown::Idle;
        self.card.insert(card)
    }

    /// Select the active dropdown entry, if any
    pub fn select_active(&mut self) -> Option<&BirdCard> {
        let index = self.active_index()?;
        let item = self.suggestions().get(index).cloned()?;
        Some(self.on_select_suggestion(Some(&item)))
    }

    /// Close the dropdown, restoring what the user typed if a preview replaced it
    pub fn dismiss(&mut self) {
        if self.is_suggesting() {
            self.input = self.typed.clone();
        }
        self.close();
    }

    /// Close the dropdown and leave the input as it is (focus left the input)
    pub fn close(&mut self) {
        self.current = None;
        self.dropdown = Dropdown::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contexts::{LookupError, LookupResult};
    use crate::suggest::source::{fetch_suggestions, SuggestionSource};
    use futures::executor::block_on;
    use futures::future::{self, FutureExt, LocalBoxFuture};
    use futures::StreamExt;
    use std::cell::RefCell;

    /// In-memory source that records every term it is asked for
    #[derive(Default)]
    struct RecordingSource {
        terms: RefCell<Vec<String>>,
        fail: bool,
    }

    impl SuggestionSource for RecordingSource {
        fn lookup(&self, term: &str) -> LocalBoxFuture<'static, LookupResult<Vec<Suggestion>>> {
            self.terms.borrow_mut().push(term.to_string());
            let result = if self.fail {
                Err(LookupError::Request("connection refused".to_string()))
            } else {
                Ok(vec![
                    Suggestion::new(format!("{} one", term)),
                    Suggestion::new(format!("{} two", term)),
                ])
            };
            future::ready(result).boxed_local()
        }
    }

    fn type_term(suggest_box: &mut SuggestBox, source: &RecordingSource, term: &str) {
        if let Some(request) = suggest_box.on_input_changed(term) {
            let items = block_on(fetch_suggestions(source, &request).collect::<Vec<_>>());
            suggest_box.apply_lookup(&request, items);
        }
    }

    fn owls() -> Vec<Suggestion> {
        vec![
            Suggestion::new("Snowy Owl"),
            Suggestion::new("Barn Owl"),
            Suggestion::new("Barred Owl"),
        ]
    }

    fn suggesting_owls() -> SuggestBox {
        let mut suggest_box = SuggestBox::new(&Settings::default());
        let request = suggest_box.on_input_changed("ow").unwrap();
        suggest_box.apply_lookup(&request, owls());
        suggest_box
    }

    #[test]
    fn test_short_terms_issue_no_lookup() {
        let source = RecordingSource::default();
        let mut suggest_box = SuggestBox::new(&Settings::default());

        for term in ["", "o", "é"] {
            type_term(&mut suggest_box, &source, term);
            assert!(suggest_box.suggestions().is_empty());
            assert!(!suggest_box.is_suggesting());
        }
        assert!(source.terms.borrow().is_empty());
    }

    #[test]
    fn test_one_lookup_per_change_with_verbatim_term() {
        let source = RecordingSource::default();
        let mut suggest_box = SuggestBox::new(&Settings::default());

        type_term(&mut suggest_box, &source, "Sn");
        type_term(&mut suggest_box, &source, "Sno ");
        type_term(&mut suggest_box, &source, "Sno ");

        assert_eq!(*source.terms.borrow(), vec!["Sn", "Sno ", "Sno "]);
        assert_eq!(
            suggest_box.suggestions(),
            &[Suggestion::new("Sno  one"), Suggestion::new("Sno  two")]
        );
    }

    #[test]
    fn test_single_emoji_reaches_min_length() {
        let source = RecordingSource::default();
        let mut suggest_box = SuggestBox::new(&Settings::default());

        type_term(&mut suggest_box, &source, "🦉");

        assert_eq!(*source.terms.borrow(), vec!["🦉"]);
        assert!(suggest_box.is_suggesting());
    }

    #[test]
    fn test_shrinking_term_closes_dropdown() {
        let mut suggest_box = suggesting_owls();
        assert!(suggest_box.is_suggesting());

        assert_eq!(suggest_box.on_input_changed("o"), None);
        assert_eq!(suggest_box.dropdown(), &Dropdown::Idle);
        assert_eq!(suggest_box.input(), "o");
    }

    #[test]
    fn test_failed_lookup_is_empty() {
        let source = RecordingSource {
            fail: true,
            ..RecordingSource::default()
        };
        let mut suggest_box = suggesting_owls();

        type_term(&mut suggest_box, &source, "owl");

        assert_eq!(source.terms.borrow().len(), 1);
        assert!(!suggest_box.is_suggesting());
    }

    #[test]
    fn test_second_lookup_replaces_first() {
        let source = RecordingSource::default();
        let mut suggest_box = SuggestBox::new(&Settings::default());

        type_term(&mut suggest_box, &source, "ow");
        type_term(&mut suggest_box, &source, "owl");

        let labels: Vec<&str> = suggest_box
            .suggestions()
            .iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(labels, vec!["owl one", "owl two"]);
    }

    #[test]
    fn test_last_resolved_wins_by_default() {
        let mut suggest_box = SuggestBox::new(&Settings::default());
        let first = suggest_box.on_input_changed("ow").unwrap();
        let second = suggest_box.on_input_changed("owl").unwrap();
        assert_ne!(first.generation, second.generation);

        assert!(suggest_box.apply_lookup(&second, vec![Suggestion::new("Snowy Owl")]));
        assert!(suggest_box.apply_lookup(&first, vec![Suggestion::new("Ovenbird")]));

        assert_eq!(suggest_box.suggestions(), &[Suggestion::new("Ovenbird")]);
    }

    #[test]
    fn test_latest_policy_drops_stale_responses() {
        let settings = Settings {
            stale_responses: StaleResponsePolicy::Latest,
            ..Settings::default()
        };
        let mut suggest_box = SuggestBox::new(&settings);
        let first = suggest_box.on_input_changed("ow").unwrap();
        let second = suggest_box.on_input_changed("owl").unwrap();

        assert!(suggest_box.apply_lookup(&second, vec![Suggestion::new("Snowy Owl")]));
        assert!(!suggest_box.apply_lookup(&first, vec![Suggestion::new("Ovenbird")]));
        assert_eq!(suggest_box.suggestions(), &[Suggestion::new("Snowy Owl")]);

        // a response for a term that has since become too short is dropped too
        let third = suggest_box.on_input_changed("owls").unwrap();
        suggest_box.on_input_changed("o");
        assert!(!suggest_box.apply_lookup(&third, vec![Suggestion::new("Elf Owl")]));
        assert!(!suggest_box.is_suggesting());
    }

    #[test]
    fn test_late_response_after_shrinking_term_is_dropped() {
        let mut suggest_box = SuggestBox::new(&Settings::default());
        let request = suggest_box.on_input_changed("ow").unwrap();
        suggest_box.on_input_changed("o");

        assert!(!suggest_box.apply_lookup(&request, vec![Suggestion::new("Barn Owl")]));
        assert!(suggest_box.suggestions().is_empty());
        assert_eq!(suggest_box.input(), "o");
    }

    #[test]
    fn test_late_response_after_selection_is_dropped() {
        let mut suggest_box = SuggestBox::new(&Settings::default());
        let request = suggest_box.on_input_changed("ow").unwrap();
        suggest_box.on_select_suggestion(Some(&Suggestion::new("Snowy Owl")));

        assert!(!suggest_box.apply_lookup(&request, vec![Suggestion::new("Barn Owl")]));
        assert!(!suggest_box.is_suggesting());
        assert_eq!(suggest_box.input(), "Snowy Owl");
    }

    #[test]
    fn test_late_response_after_dismiss_is_dropped() {
        let mut suggest_box = suggesting_owls();
        let request = suggest_box.on_input_changed("owl").unwrap();
        suggest_box.dismiss();

        assert!(!suggest_box.apply_lookup(&request, vec![Suggestion::new("Barn Owl")]));
        assert!(!suggest_box.is_suggesting());
    }

    #[test]
    fn test_close_keeps_previewed_text() {
        let mut suggest_box = suggesting_owls();
        suggest_box.focus_index(1);
        let request = suggest_box.on_input_changed("owl").unwrap();
        suggest_box.focus_index(0);

        suggest_box.close();

        assert_eq!(suggest_box.input(), "Snowy Owl");
        assert!(!suggest_box.is_suggesting());
        assert!(suggest_box.selection().is_none());
        assert!(!suggest_box.apply_lookup(&request, owls()));
    }

    #[test]
    fn test_focus_previews_without_selecting() {
        let mut suggest_box = suggesting_owls();

        suggest_box.on_focus_suggestion(&Suggestion::new("Barn Owl"));

        assert_eq!(suggest_box.input(), "Barn Owl");
        assert!(suggest_box.selection().is_none());
        assert!(suggest_box.card().is_none());
        assert_eq!(suggest_box.card_html(), "");
        assert!(suggest_box.is_suggesting());
    }

    #[test]
    fn test_keyboard_navigation_wraps() {
        let mut suggest_box = suggesting_owls();

        suggest_box.focus_next();
        assert_eq!(suggest_box.active_index(), Some(0));
        assert_eq!(suggest_box.input(), "Snowy Owl");

        suggest_box.focus_previous();
        assert_eq!(suggest_box.active_index(), Some(2));
        assert_eq!(suggest_box.input(), "Barred Owl");

        suggest_box.focus_next();
        assert_eq!(suggest_box.active_index(), Some(0));
    }

    #[test]
    fn test_dismiss_restores_typed_text() {
        let mut suggest_box = suggesting_owls();
        suggest_box.focus_index(1);
        assert_eq!(suggest_box.input(), "Barn Owl");

        suggest_box.dismiss();

        assert_eq!(suggest_box.input(), "ow");
        assert!(!suggest_box.is_suggesting());
    }

    #[test]
    fn test_select_sets_input_and_renders_card() {
        let mut suggest_box = suggesting_owls();
        let owl = Suggestion::new("Red-winged Blackbird").with_image_url("/ignored.jpg");

        let card = suggest_box.on_select_suggestion(Some(&owl)).clone();

        assert_eq!(
            card,
            BirdCard::Bird {
                label: "Red-winged Blackbird".to_string(),
                image_src: "/birds/img/redwinged_blackbird.png".to_string(),
            }
        );
        assert_eq!(suggest_box.input(), "Red-winged Blackbird");
        assert_eq!(suggest_box.selection(), Some(&owl));
        assert!(!suggest_box.is_suggesting());
        assert!(!suggest_box.card_html().contains("ignored.jpg"));
    }

    #[test]
    fn test_select_escapes_label() {
        let mut suggest_box = SuggestBox::new(&Settings::default());
        suggest_box.on_select_suggestion(Some(&Suggestion::new(r#"He said "hi""#)));

        let html = suggest_box.card_html();
        assert!(html.contains("He said &quot;hi&quot;"));
        assert!(!html.contains(r#""hi""#));
    }

    #[test]
    fn test_select_nothing_renders_placeholder() {
        let mut suggest_box = SuggestBox::new(&Settings::default());
        suggest_box.on_select_suggestion(Some(&Suggestion::new("Snowy Owl")));

        suggest_box.on_select_suggestion(None);
        assert_eq!(suggest_box.card_html(), "<p>No image available.</p>");
        assert!(!suggest_box.card_html().contains("<img"));
        assert_eq!(suggest_box.selection(), Some(&Suggestion::new("Snowy Owl")));

        suggest_box.on_select_suggestion(Some(&Suggestion::default()));
        assert_eq!(suggest_box.card_html(), "<p>No image available.</p>");
    }

    #[test]
    fn test_select_is_idempotent() {
        let mut suggest_box = SuggestBox::new(&Settings::default());
        let owl = Suggestion::new("Great Horned Owl");

        suggest_box.on_select_suggestion(Some(&owl));
        let first = suggest_box.card_html();
        suggest_box.on_select_suggestion(Some(&owl));

        assert_eq!(suggest_box.card_html(), first);
    }

    #[test]
    fn test_select_active() {
        let mut suggest_box = suggesting_owls();
        assert!(suggest_box.select_active().is_none());

        suggest_box.focus_index(2);
        suggest_box.select_active();

        assert_eq!(suggest_box.selection(), Some(&Suggestion::new("Barred Owl")));
        assert!(suggest_box.card_html().contains("barred_owl.png"));
        assert!(!suggest_box.is_suggesting());
    }

    #[test]
    fn test_custom_image_base() {
        let settings = Settings {
            image_base: "https://cdn.example.org/birds".to_string(),
            ..Settings::default()
        };
        let mut suggest_box = SuggestBox::new(&settings);
        suggest_box.on_select_suggestion(Some(&Suggestion::new("Snowy Owl")));

        assert!(suggest_box
            .card_html()
            .contains(r#"src="https://cdn.example.org/birds/snowy_owl.png""#));
    }
}
