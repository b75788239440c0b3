//! Search state, its persisted snapshot, and the read-only view handed to renderers

use super::pagination::{ResultRange, SearchPolicy};
use crate::types::BookSummary;
use serde::{Deserialize, Serialize};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch books. Please try again.";
pub const NO_RESULTS_MESSAGE: &str = "No books found. Try a different search.";
pub const NO_QUERY_MESSAGE: &str = "Enter a search term to find books.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Everything the controller knows about the current search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub current_page: u32,
    pub page_size: u32,
    pub total_matches: u32,
    pub results: Vec<BookSummary>,
    pub phase: SearchPhase,
    pub error_message: Option<String>,
}

impl SearchState {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: String::new(),
            current_page: 1,
            page_size,
            total_matches: 0,
            results: Vec::new(),
            phase: SearchPhase::Idle,
            error_message: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SearchPhase::Loading
    }

    /// Whether there is anything a "clear" control would reset
    pub fn has_results(&self) -> bool {
        !self.results.is_empty() || self.total_matches > 0
    }
}

/// Last successful search, persisted under `lastBookSearch`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnapshot {
    pub query: String,

    #[serde(default)]
    pub result: Vec<BookSummary>,

    #[serde(default)]
    pub total_items: u32,

    #[serde(default = "first_page")]
    pub current_page: u32,
}

fn first_page() -> u32 {
    1
}

impl From<&SearchState> for SearchSnapshot {
    fn from(state: &SearchState) -> Self {
        Self {
            query: state.query.clone(),
            result: state.results.clone(),
            total_items: state.total_matches,
            current_page: state.current_page,
        }
    }
}

/// State plus everything derived from it, as a renderer needs it
#[derive(Debug, Clone, Serialize)]
pub struct SearchView {
    #[serde(flatten)]
    pub state: SearchState,
    pub loading: bool,
    pub total_pages: u32,
    pub last_safe_page: u32,
    pub page_window: Vec<u32>,
    pub range: Option<ResultRange>,
    /// Message for an empty result area, if it is empty
    pub empty_message: Option<&'static str>,
}

impl SearchView {
    pub fn new(state: &SearchState, policy: &SearchPolicy) -> Self {
        let total_pages = policy.total_pages(state.total_matches);
        let has_page = !state.results.is_empty();

        let empty_message = match (has_page, state.phase) {
            (true, _) | (false, SearchPhase::Loading) => None,
            (false, _) if state.query.trim().is_empty() => Some(NO_QUERY_MESSAGE),
            (false, _) => Some(NO_RESULTS_MESSAGE),
        };

        Self {
            loading: state.is_loading(),
            total_pages,
            last_safe_page: policy.last_safe_page(state.total_matches),
            page_window: policy.page_window(state.current_page, total_pages),
            range: if has_page {
                policy.result_range(state.current_page, state.total_matches)
            } else {
                None
            },
            empty_message,
            state: state.clone(),
        }
    }
}
