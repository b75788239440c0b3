//! Wiring shared by every command: configuration, storage and catalog

use anyhow::{Context, Result};
use bookfinder_core::catalog::{CatalogClient, GoogleBooksClient};
use bookfinder_core::storage::{LocalStorage, StorageProvider};
use bookfinder_core::{Config, FavoritesStore, SearchController};
use std::path::PathBuf;
use std::sync::Arc;

pub struct App {
    pub config: Config,
    pub json: bool,
    storage: Arc<dyn StorageProvider>,
    catalog: Arc<dyn CatalogClient>,
}

impl App {
    /// Build from the environment, letting command-line flags win
    pub fn from_env(
        data_dir: Option<PathBuf>,
        catalog_url: Option<String>,
        json: bool,
    ) -> Result<Self> {
        let mut config = Config::from_env().context("Invalid configuration")?;
        if let Some(dir) = data_dir {
            config.data_path = dir;
        }
        if let Some(url) = catalog_url {
            config.catalog_url = url;
        }
        tracing::debug!("Using {:?}", config);

        let storage: Arc<dyn StorageProvider> = Arc::new(LocalStorage::new(&config.data_path));
        let catalog: Arc<dyn CatalogClient> =
            Arc::new(GoogleBooksClient::new(config.catalog_url.clone()));

        Ok(Self {
            config,
            json,
            storage,
            catalog,
        })
    }

    pub fn catalog(&self) -> &dyn CatalogClient {
        self.catalog.as_ref()
    }

    /// The search controller, seeded from the saved last search
    pub async fn search(&self) -> SearchController {
        SearchController::restore(
            self.catalog.clone(),
            self.storage.clone(),
            self.config.policy,
        )
        .await
    }

    pub async fn favorites(&self) -> FavoritesStore {
        FavoritesStore::load(self.storage.clone()).await
    }
}
