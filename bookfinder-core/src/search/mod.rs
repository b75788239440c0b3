//! Search controller and pagination policy

mod controller;
mod pagination;
mod state;

pub use controller::{FetchTicket, SearchController};
pub use pagination::{
    ResultRange, SearchPolicy, DEFAULT_MAX_OFFSET, DEFAULT_PAGE_SIZE, PAGE_WINDOW,
};
pub use state::{
    SearchPhase, SearchSnapshot, SearchState, SearchView, FETCH_FAILED_MESSAGE,
    NO_QUERY_MESSAGE, NO_RESULTS_MESSAGE,
};
