//! The search controller: query, paging and the persisted last search
//!
//! Every catalog request is described by a [`FetchTicket`] carrying a sequence
//! number. Only the outcome of the most recently issued ticket is applied;
//! anything older (or issued before a `clear`) is dropped. Callers that share
//! the controller behind a lock can run the ticket with the lock released and
//! hand the outcome back through [`SearchController::complete`].

use super::pagination::SearchPolicy;
use super::state::{SearchPhase, SearchSnapshot, SearchState, SearchView, FETCH_FAILED_MESSAGE};
use crate::catalog::{CatalogClient, SearchPage};
use crate::error::{FetchError, StorageError};
use crate::storage::{load_json, save_json, StorageProvider, LAST_SEARCH_KEY};
use std::sync::Arc;

/// One pending catalog search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub sequence: u64,
    pub query: String,
    pub page: u32,
    pub offset: u32,
    pub page_size: u32,
}

impl FetchTicket {
    pub async fn execute(&self, catalog: &dyn CatalogClient) -> Result<SearchPage, FetchError> {
        catalog.search(&self.query, self.offset, self.page_size).await
    }
}

pub struct SearchController {
    catalog: Arc<dyn CatalogClient>,
    storage: Arc<dyn StorageProvider>,
    policy: SearchPolicy,
    state: SearchState,
    sequence: u64,
    in_flight: Option<u64>,
}

impl SearchController {
    /// Create a controller, seeding it from the saved last search if there is one.
    /// No request is made.
    pub async fn restore(
        catalog: Arc<dyn CatalogClient>,
        storage: Arc<dyn StorageProvider>,
        policy: SearchPolicy,
    ) -> Self {
        let mut state = SearchState::new(policy.page_size);

        if let Some(snapshot) =
            load_json::<SearchSnapshot>(storage.as_ref(), LAST_SEARCH_KEY).await
        {
            tracing::debug!(
                "Restored last search {:?} ({} results, {} total)",
                snapshot.query,
                snapshot.result.len(),
                snapshot.total_items
            );
            let last_page = policy.total_pages(snapshot.total_items).max(1);
            state.query = snapshot.query;
            state.results = snapshot.result;
            state.total_matches = snapshot.total_items;
            state.current_page = snapshot.current_page.clamp(1, last_page);
            state.phase = SearchPhase::Success;
        }

        Self {
            catalog,
            storage,
            policy,
            state,
            sequence: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    pub fn catalog(&self) -> Arc<dyn CatalogClient> {
        Arc::clone(&self.catalog)
    }

    pub fn view(&self) -> SearchView {
        SearchView::new(&self.state, &self.policy)
    }

    pub fn total_pages(&self) -> u32 {
        self.policy.total_pages(self.state.total_matches)
    }

    pub fn last_safe_page(&self) -> u32 {
        self.policy.last_safe_page(self.state.total_matches)
    }

    pub fn page_window(&self) -> Vec<u32> {
        self.policy
            .page_window(self.state.current_page, self.total_pages())
    }

    /// Start a new search at page 1. Blank queries and submits while a
    /// request is outstanding are ignored.
    pub fn begin_submit(&mut self, query: &str) -> Option<FetchTicket> {
        if query.trim().is_empty() {
            tracing::debug!("Ignoring blank query");
            return None;
        }
        if self.state.is_loading() {
            tracing::debug!("Ignoring submit of {:?} while a search is loading", query);
            return None;
        }

        self.state.query = query.to_string();
        self.state.current_page = 1;
        Some(self.issue(1))
    }

    /// Move to `page` of the current search.
    ///
    /// When the search has more matches than the catalog will page through,
    /// pages whose offset it would refuse are answered locally: the current
    /// page is clamped to the last page below the ceiling and an
    /// informational error is set. Out-of-range and same-page requests are
    /// no-ops.
    pub fn begin_change_page(&mut self, page: u32) -> Option<FetchTicket> {
        if self.state.is_loading() || self.state.phase == SearchPhase::Idle {
            tracing::debug!("Ignoring page change to {} in {:?}", page, self.state.phase);
            return None;
        }
        if page == 0 || page == self.state.current_page {
            return None;
        }

        let at_ceiling =
            self.policy.reachable_matches(self.state.total_matches) == self.policy.max_offset;
        if at_ceiling && self.policy.exceeds_ceiling(page) {
            let message = self.policy.ceiling_message();
            tracing::warn!("Page {} is past the catalog ceiling: {}", page, message);
            self.state.current_page = self.policy.ceiling_page();
            self.state.error_message = Some(message);
            return None;
        }

        if page > self.total_pages() {
            tracing::debug!("Page {} is beyond {} pages", page, self.total_pages());
            return None;
        }

        Some(self.issue(page))
    }

    pub fn begin_first_page(&mut self) -> Option<FetchTicket> {
        self.begin_change_page(1)
    }

    pub fn begin_previous_page(&mut self) -> Option<FetchTicket> {
        self.begin_change_page(self.state.current_page.saturating_sub(1))
    }

    pub fn begin_next_page(&mut self) -> Option<FetchTicket> {
        self.begin_change_page(self.state.current_page.saturating_add(1))
    }

    pub fn begin_last_page(&mut self) -> Option<FetchTicket> {
        self.begin_change_page(self.last_safe_page())
    }

    fn issue(&mut self, page: u32) -> FetchTicket {
        self.sequence += 1;
        self.in_flight = Some(self.sequence);
        self.state.phase = SearchPhase::Loading;
        self.state.error_message = None;

        FetchTicket {
            sequence: self.sequence,
            query: self.state.query.clone(),
            page,
            offset: self.policy.offset(page),
            page_size: self.policy.page_size,
        }
    }

    /// Apply the outcome of `ticket`. Returns `false` when the ticket was
    /// superseded and the outcome dropped.
    pub async fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<SearchPage, FetchError>,
    ) -> bool {
        if self.in_flight != Some(ticket.sequence) {
            tracing::debug!(
                "Dropping stale response for {:?} page {} (sequence {})",
                ticket.query,
                ticket.page,
                ticket.sequence
            );
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(page) => {
                tracing::info!(
                    "Fetched {:?} page {}: {} results of {}",
                    ticket.query,
                    ticket.page,
                    page.items.len(),
                    page.total_matches
                );
                self.state.results = page.items;
                self.state.total_matches = page.total_matches;
                self.state.current_page = ticket.page;
                self.state.phase = SearchPhase::Success;
                self.state.error_message = None;

                let snapshot = SearchSnapshot::from(&self.state);
                if let Err(e) = save_json(self.storage.as_ref(), LAST_SEARCH_KEY, &snapshot).await
                {
                    tracing::warn!("Failed to save last search: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("Error fetching books for {:?}: {}", ticket.query, e);
                self.state.results.clear();
                self.state.phase = SearchPhase::Error;
                self.state.error_message = Some(FETCH_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    async fn run(&mut self, ticket: Option<FetchTicket>) -> &SearchState {
        if let Some(ticket) = ticket {
            let catalog = self.catalog();
            let outcome = ticket.execute(catalog.as_ref()).await;
            self.complete(ticket, outcome).await;
        }
        &self.state
    }

    /// Search for `query` from page 1
    pub async fn submit(&mut self, query: &str) -> &SearchState {
        let ticket = self.begin_submit(query);
        self.run(ticket).await
    }

    pub async fn change_page(&mut self, page: u32) -> &SearchState {
        let ticket = self.begin_change_page(page);
        self.run(ticket).await
    }

    pub async fn first_page(&mut self) -> &SearchState {
        let ticket = self.begin_first_page();
        self.run(ticket).await
    }

    pub async fn previous_page(&mut self) -> &SearchState {
        let ticket = self.begin_previous_page();
        self.run(ticket).await
    }

    pub async fn next_page(&mut self) -> &SearchState {
        let ticket = self.begin_next_page();
        self.run(ticket).await
    }

    pub async fn last_page(&mut self) -> &SearchState {
        let ticket = self.begin_last_page();
        self.run(ticket).await
    }

    /// Forget the current search and its saved snapshot. Any request still
    /// in flight will be dropped when it completes.
    pub async fn clear(&mut self) -> &SearchState {
        self.state = SearchState::new(self.policy.page_size);
        self.in_flight = None;

        match self.storage.delete(LAST_SEARCH_KEY).await {
            Ok(()) | Err(StorageError::NotFound(_)) => {}
            Err(e) => tracing::warn!("Failed to remove last search: {}", e),
        }
        tracing::debug!("Search cleared");
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use crate::storage::MemoryStorage;

    async fn controller(catalog: StaticCatalog) -> (SearchController, Arc<StaticCatalog>, Arc<MemoryStorage>) {
        let catalog = Arc::new(catalog);
        let storage = Arc::new(MemoryStorage::new());
        let controller =
            SearchController::restore(catalog.clone(), storage.clone(), SearchPolicy::default())
                .await;
        (controller, catalog, storage)
    }

    #[tokio::test]
    async fn test_blank_submit_is_noop() {
        let (mut search, catalog, _) = controller(StaticCatalog::with_generated(3)).await;
        let state = search.submit("   ").await;
        assert_eq!(state.phase, SearchPhase::Idle);
        assert_eq!(catalog.requests(), 0);
    }

    #[tokio::test]
    async fn test_submit_success_persists_snapshot() {
        let (mut search, _, storage) =
            controller(StaticCatalog::with_generated(30).reporting_total(1500)).await;

        let state = search.submit("dune").await;
        assert_eq!(state.phase, SearchPhase::Success);
        assert_eq!(state.current_page, 1);
        assert_eq!(state.results.len(), 12);
        assert_eq!(search.total_pages(), 84);

        let snapshot: SearchSnapshot = load_json(storage.as_ref(), LAST_SEARCH_KEY).await.unwrap();
        assert_eq!(snapshot.query, "dune");
        assert_eq!(snapshot.total_items, 1500);
        assert_eq!(snapshot.result.len(), 12);
    }

    #[tokio::test]
    async fn test_failure_clears_results() {
        let (mut search, _, _) = controller(
            StaticCatalog::with_generated(3).failing_with(FetchError::Transport("down".into())),
        )
        .await;

        let state = search.submit("dune").await;
        assert_eq!(state.phase, SearchPhase::Error);
        assert!(state.results.is_empty());
        assert_eq!(state.error_message.as_deref(), Some(FETCH_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_change_page_bounds() {
        let (mut search, catalog, _) = controller(StaticCatalog::with_generated(30)).await;
        search.submit("q").await;
        assert_eq!(search.total_pages(), 3);

        search.change_page(1).await;
        search.change_page(0).await;
        search.change_page(4).await;
        assert_eq!(catalog.requests(), 1);

        let state = search.change_page(3).await;
        assert_eq!(state.current_page, 3);
        assert_eq!(state.results.len(), 6);
        assert_eq!(catalog.requested_offsets(), vec![0, 24]);
    }

    #[tokio::test]
    async fn test_ceiling_refused_locally() {
        let (mut search, catalog, _) =
            controller(StaticCatalog::with_generated(12).reporting_total(1500)).await;
        search.submit("dune").await;

        let state = search.change_page(84).await;
        assert_eq!(state.current_page, 84);
        assert_eq!(catalog.requested_offsets(), vec![0, 996]);

        let state = search.change_page(85).await;
        assert_eq!(state.current_page, 83);
        assert!(state
            .error_message
            .as_deref()
            .unwrap()
            .contains("up to 1000 results"));
        assert_eq!(catalog.requests(), 2);
    }

    #[tokio::test]
    async fn test_far_page_on_small_search_is_noop() {
        let (mut search, catalog, _) = controller(StaticCatalog::with_generated(30)).await;
        search.submit("q").await;

        let state = search.change_page(85).await;
        assert_eq!(state.current_page, 1);
        assert_eq!(state.error_message, None);
        assert_eq!(state.phase, SearchPhase::Success);
        assert_eq!(catalog.requests(), 1);

        let view = search.view();
        assert!(view.state.current_page <= view.total_pages);
        assert_eq!(view.range.map(|r| (r.first, r.last)), Some((1, 12)));
    }

    #[tokio::test]
    async fn test_navigation_helpers() {
        let (mut search, catalog, _) =
            controller(StaticCatalog::with_generated(12).reporting_total(1500)).await;
        search.submit("dune").await;

        search.previous_page().await;
        assert_eq!(catalog.requests(), 1);

        assert_eq!(search.next_page().await.current_page, 2);
        assert_eq!(search.last_page().await.current_page, 83);
        assert_eq!(search.first_page().await.current_page, 1);
        assert_eq!(catalog.requested_offsets(), vec![0, 12, 984, 0]);
    }

    #[tokio::test]
    async fn test_restore_seeds_without_request() {
        let catalog = Arc::new(StaticCatalog::with_generated(3));
        let storage = Arc::new(MemoryStorage::new());
        storage
            .write(
                LAST_SEARCH_KEY,
                br#"{"query":"dune","result":[{"id":"a","title":"Dune"}],"totalItems":40}"#
                    .to_vec(),
            )
            .await
            .unwrap();

        let search =
            SearchController::restore(catalog.clone(), storage, SearchPolicy::default()).await;
        assert_eq!(search.state().phase, SearchPhase::Success);
        assert_eq!(search.state().query, "dune");
        assert_eq!(search.state().current_page, 1);
        assert_eq!(search.total_pages(), 4);
        assert_eq!(catalog.requests(), 0);
    }

    #[tokio::test]
    async fn test_restore_caps_page_at_total_pages() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .write(
                LAST_SEARCH_KEY,
                br#"{"query":"dune","result":[{"id":"a","title":"Dune"}],"totalItems":40,"currentPage":500}"#
                    .to_vec(),
            )
            .await
            .unwrap();

        let search = SearchController::restore(
            Arc::new(StaticCatalog::default()),
            storage,
            SearchPolicy::default(),
        )
        .await;
        assert_eq!(search.state().current_page, 4);

        let range = search.view().range.unwrap();
        assert!(range.first <= range.last);
    }

    #[tokio::test]
    async fn test_clear_resets_and_forgets_snapshot() {
        let (mut search, _, storage) = controller(StaticCatalog::with_generated(30)).await;
        search.submit("q").await;
        search.change_page(2).await;
        assert!(storage.exists(LAST_SEARCH_KEY).await.unwrap());

        let state = search.clear().await;
        assert_eq!(*state, SearchState::new(12));
        assert!(!storage.exists(LAST_SEARCH_KEY).await.unwrap());

        // Clearing twice is fine
        search.clear().await;
    }

    #[tokio::test]
    async fn test_stale_outcomes_are_dropped() {
        let (mut search, catalog, _) = controller(StaticCatalog::with_generated(30)).await;

        let first = search.begin_submit("q").unwrap();
        assert!(search.state().is_loading());
        assert!(search.begin_submit("other").is_none());

        search.clear().await;
        let outcome = first.execute(catalog.as_ref()).await;
        assert!(!search.complete(first, outcome).await);
        assert_eq!(search.state().phase, SearchPhase::Idle);

        let second = search.begin_submit("q").unwrap();
        let outcome = second.execute(catalog.as_ref()).await;
        assert!(search.complete(second.clone(), outcome.clone()).await);
        assert!(!search.complete(second, outcome).await);
        assert_eq!(search.state().phase, SearchPhase::Success);
    }
}
