use crate::controllers::map::RiskMarker;
use crate::domain::Coordinate;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

/// Queries must be longer than this (after trimming) before the hook runs.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub label: String,
    pub score: i64,
    pub coordinate: Coordinate,
}

pub trait SearchHook {
    fn search(&mut self, query: &str) -> Vec<SearchResult>;
}

/// Fuzzy search over the known risk locations, best match first.
pub struct LocationSearch {
    candidates: Vec<RiskMarker>,
    matcher: SkimMatcherV2,
}

impl LocationSearch {
    pub fn new(candidates: Vec<RiskMarker>) -> Self {
        Self {
            candidates,
            matcher: SkimMatcherV2::default(),
        }
    }
}

impl SearchHook for LocationSearch {
    fn search(&mut self, query: &str) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .candidates
            .iter()
            .filter_map(|marker| {
                self.matcher
                    .fuzzy_match(&marker.label, query)
                    .map(|score| SearchResult {
                        label: marker.label.clone(),
                        score,
                        coordinate: marker.coordinate(),
                    })
            })
            .collect();
        results.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.label.cmp(&b.label)));
        tracing::debug!(query, matches = results.len(), "location search");
        results
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    Open,
}

pub struct SearchOverlay {
    state: OverlayState,
    input: String,
    focused: bool,
    results: Vec<SearchResult>,
    hook: Box<dyn SearchHook>,
}

impl std::fmt::Debug for SearchOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOverlay")
            .field("state", &self.state)
            .field("input", &self.input)
            .field("focused", &self.focused)
            .field("results", &self.results.len())
            .finish_non_exhaustive()
    }
}

impl SearchOverlay {
    pub fn new(hook: Box<dyn SearchHook>) -> Self {
        Self {
            state: OverlayState::Closed,
            input: String::new(),
            focused: false,
            results: Vec::new(),
            hook,
        }
    }

    /// Opens the overlay and focuses its input.
    pub fn open(&mut self) {
        self.state = OverlayState::Open;
        self.focused = true;
    }

    pub fn close(&mut self) {
        self.state = OverlayState::Closed;
        self.focused = false;
    }

    /// Escape only closes an open overlay. Returns whether it was consumed.
    pub fn handle_escape(&mut self) -> bool {
        if self.is_open() {
            self.close();
            return true;
        }
        false
    }

    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.on_input_changed();
    }

    pub fn push_char(&mut self, ch: char) {
        self.input.push(ch);
        self.on_input_changed();
    }

    pub fn pop_char(&mut self) {
        if self.input.pop().is_some() {
            self.on_input_changed();
        }
    }

    fn on_input_changed(&mut self) {
        let query = self.input.trim();
        if query.chars().count() > MIN_QUERY_CHARS {
            self.results = self.hook.search(query);
        } else {
            self.results.clear();
        }
    }

    pub const fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == OverlayState::Open
    }

    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::map::default_markers;
    use std::sync::{Arc, Mutex, PoisonError};

    #[derive(Clone, Default)]
    struct RecordingSearch(Arc<Mutex<Vec<String>>>);

    impl SearchHook for RecordingSearch {
        fn search(&mut self, query: &str) -> Vec<SearchResult> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(query.to_string());
            Vec::new()
        }
    }

    fn overlay() -> (SearchOverlay, RecordingSearch) {
        let hook = RecordingSearch::default();
        (SearchOverlay::new(Box::new(hook.clone())), hook)
    }

    fn queries(hook: &RecordingSearch) -> Vec<String> {
        hook.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[test]
    fn opening_focuses_input() {
        let (mut search, _) = overlay();
        assert_eq!(search.state(), OverlayState::Closed);
        search.open();
        assert!(search.is_open());
        assert!(search.is_focused());
    }

    #[test]
    fn escape_closes_only_when_open() {
        let (mut search, _) = overlay();
        assert!(!search.handle_escape());
        search.open();
        assert!(search.handle_escape());
        assert_eq!(search.state(), OverlayState::Closed);
        assert!(!search.is_focused());
    }

    #[test]
    fn hook_runs_only_for_trimmed_queries_longer_than_two_chars() {
        let (mut search, hook) = overlay();
        search.open();
        search.set_input("mi");
        search.set_input("  mi  ");
        search.set_input("mia");
        search.push_char('m');
        search.set_input(" key ");

        assert_eq!(queries(&hook), vec!["mia", "miam", "key"]);
    }

    #[test]
    fn location_search_ranks_known_markers() {
        let mut search = SearchOverlay::new(Box::new(LocationSearch::new(default_markers())));
        search.open();
        search.set_input("miami beach");

        let results = search.results();
        assert!(!results.is_empty());
        assert_eq!(results[0].label, "Miami Beach");
    }

    #[test]
    fn short_queries_clear_results() {
        let mut search = SearchOverlay::new(Box::new(LocationSearch::new(default_markers())));
        search.set_input("coral");
        assert!(!search.results().is_empty());
        search.set_input("co");
        assert!(search.results().is_empty());
    }
}
