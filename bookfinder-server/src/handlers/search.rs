//! Search handlers
//!
//! The controller lock is held only to issue a fetch ticket and to apply its
//! outcome; the catalog request itself runs unlocked.

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::{Path, State},
    Json,
};
use bookfinder_core::search::SearchPhase;
use bookfinder_core::{FetchError, FetchTicket, SearchController, SearchView};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub query: String,
}

/// Current search state
pub async fn get_search(State(state): State<AppState>) -> Json<SearchView> {
    Json(state.search.read().await.view())
}

/// Start a new search
pub async fn submit_search(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Json<SearchView> {
    let ticket = begin(&state, |search| search.begin_submit(&request.query)).await;
    run_ticket(&state, ticket).await
}

/// Go to a specific page
pub async fn change_page(
    State(state): State<AppState>,
    Path(page): Path<u32>,
) -> Json<SearchView> {
    let ticket = begin(&state, |search| search.begin_change_page(page)).await;
    run_ticket(&state, ticket).await
}

pub async fn first_page(State(state): State<AppState>) -> Json<SearchView> {
    let ticket = begin(&state, SearchController::begin_first_page).await;
    run_ticket(&state, ticket).await
}

pub async fn previous_page(State(state): State<AppState>) -> Json<SearchView> {
    let ticket = begin(&state, SearchController::begin_previous_page).await;
    run_ticket(&state, ticket).await
}

pub async fn next_page(State(state): State<AppState>) -> Json<SearchView> {
    let ticket = begin(&state, SearchController::begin_next_page).await;
    run_ticket(&state, ticket).await
}

/// Jump to the last page below the catalog's offset ceiling
pub async fn last_page(State(state): State<AppState>) -> Json<SearchView> {
    let ticket = begin(&state, SearchController::begin_last_page).await;
    run_ticket(&state, ticket).await
}

/// Forget the current search
pub async fn clear_search(State(state): State<AppState>) -> Json<SearchView> {
    let mut search = state.search.write().await;
    search.clear().await;
    state.broadcast(ServerEvent::SearchCleared);
    Json(search.view())
}

/// Issue a ticket under the lock. Intents answered locally (the ceiling
/// clamp) are broadcast here since no fetch will follow.
async fn begin<F>(state: &AppState, intent: F) -> Option<FetchTicket>
where
    F: FnOnce(&mut SearchController) -> Option<FetchTicket>,
{
    let mut search = state.search.write().await;
    let before = page_and_message(&search);
    let ticket = intent(&mut *search);

    if ticket.is_none() && page_and_message(&search) != before {
        state.broadcast(updated_event(&search));
    }
    ticket
}

fn page_and_message(search: &SearchController) -> (u32, Option<String>) {
    let current = search.state();
    (current.current_page, current.error_message.clone())
}

async fn run_ticket(state: &AppState, ticket: Option<FetchTicket>) -> Json<SearchView> {
    let Some(ticket) = ticket else {
        return Json(state.search.read().await.view());
    };

    // Completion must run even if the client disconnects
    let task = tokio::spawn(complete_ticket(state.clone(), ticket.clone()));

    match task.await {
        Ok(view) => Json(view),
        Err(e) => {
            tracing::error!("Search task for {:?} failed: {}", ticket.query, e);
            let mut search = state.search.write().await;
            if search
                .complete(ticket, Err(FetchError::Transport(e.to_string())))
                .await
            {
                state.broadcast(search_event(&search));
            }
            Json(search.view())
        }
    }
}

async fn complete_ticket(state: AppState, ticket: FetchTicket) -> SearchView {
    let outcome = ticket.execute(state.catalog.as_ref()).await;

    let mut search = state.search.write().await;
    if search.complete(ticket, outcome).await {
        state.broadcast(search_event(&search));
    }
    search.view()
}

fn search_event(search: &SearchController) -> ServerEvent {
    let current = search.state();
    match (current.phase, &current.error_message) {
        (SearchPhase::Error, Some(message)) => ServerEvent::SearchFailed {
            message: message.clone(),
        },
        _ => updated_event(search),
    }
}

fn updated_event(search: &SearchController) -> ServerEvent {
    let current = search.state();
    ServerEvent::SearchUpdated {
        query: current.query.clone(),
        page: current.current_page,
        total_matches: current.total_matches,
    }
}
