//! Catalog service access
//!
//! Each operation issues exactly one request. There are no retries and no
//! caching; a failure is reported to the caller as a [`FetchError`].

mod google;
mod memory;

pub use google::{GoogleBooksClient, DEFAULT_CATALOG_URL};
pub use memory::StaticCatalog;

use crate::error::FetchError;
use crate::types::{BookDetail, BookSummary};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One page of search hits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    pub items: Vec<BookSummary>,

    /// Total matches as reported upstream; may exceed what can be paged through
    pub total_matches: u32,
}

/// Read-only view of a book catalog
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch up to `page_size` results starting at `start_offset`
    async fn search(
        &self,
        query: &str,
        start_offset: u32,
        page_size: u32,
    ) -> Result<SearchPage, FetchError>;

    /// Fetch the full record for one volume
    async fn fetch_detail(&self, id: &str) -> Result<BookDetail, FetchError>;
}
