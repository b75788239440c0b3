//! Application state

use anyhow::{Context, Result};
use bookfinder_core::catalog::{CatalogClient, GoogleBooksClient};
use bookfinder_core::storage::{LocalStorage, StorageProvider};
use bookfinder_core::{Config, FavoritesStore, SearchController, SearchPolicy};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Shared application state: one search controller and one favorites store
/// for the whole process
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<RwLock<SearchController>>,

    pub favorites: Arc<RwLock<FavoritesStore>>,

    /// Same catalog the controller uses; requests run without holding its lock
    pub catalog: Arc<dyn CatalogClient>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// Server-sent events
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// A search page was fetched
    SearchUpdated {
        query: String,
        page: u32,
        total_matches: u32,
    },

    /// A search request failed
    SearchFailed { message: String },

    /// The search was cleared
    SearchCleared,

    /// A book was added to or removed from favorites
    FavoritesChanged { id: String, favorite: bool, count: usize },
}

impl AppState {
    /// Create state backed by the configured catalog and data directory
    pub async fn new(config: &Config) -> Result<Self> {
        tokio::fs::create_dir_all(&config.data_path)
            .await
            .with_context(|| format!("Failed to create {}", config.data_path.display()))?;

        let storage: Arc<dyn StorageProvider> = Arc::new(LocalStorage::new(&config.data_path));
        let catalog: Arc<dyn CatalogClient> =
            Arc::new(GoogleBooksClient::new(config.catalog_url.clone()));

        Ok(Self::with_parts(catalog, storage, config.policy).await)
    }

    /// Create state from explicit parts, restoring saved favorites and search
    pub async fn with_parts(
        catalog: Arc<dyn CatalogClient>,
        storage: Arc<dyn StorageProvider>,
        policy: SearchPolicy,
    ) -> Self {
        let search = SearchController::restore(catalog.clone(), storage.clone(), policy).await;
        let favorites = FavoritesStore::load(storage).await;
        let (event_tx, _) = broadcast::channel(100);

        Self {
            search: Arc::new(RwLock::new(search)),
            favorites: Arc::new(RwLock::new(favorites)),
            catalog,
            event_tx,
        }
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }

    /// Broadcast an event
    pub fn broadcast(&self, event: ServerEvent) {
        // Ignore errors (no subscribers)
        let _ = self.event_tx.send(event);
    }
}
