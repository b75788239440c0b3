//! In-memory catalog (for testing and offline use)

use super::{CatalogClient, SearchPage};
use crate::error::FetchError;
use crate::types::BookDetail;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Serves a fixed list of books. Every query matches every book unless a
/// total is forced; `requests()` counts calls made against it.
#[derive(Default)]
pub struct StaticCatalog {
    books: Vec<BookDetail>,
    reported_total: Option<u32>,
    failure: Option<FetchError>,
    delay: Option<Duration>,
    requests: AtomicUsize,
    offsets: Mutex<Vec<u32>>,
}

impl StaticCatalog {
    pub fn new(books: Vec<BookDetail>) -> Self {
        Self {
            books,
            ..Default::default()
        }
    }

    /// Generate `count` placeholder books with ids `book-0`, `book-1`, ...
    pub fn with_generated(count: usize) -> Self {
        let books = (0..count)
            .map(|i| BookDetail {
                id: format!("book-{}", i),
                title: format!("Book {}", i),
                ..Default::default()
            })
            .collect();
        Self::new(books)
    }

    /// Report `total` as the match count regardless of the books held
    pub fn reporting_total(mut self, total: u32) -> Self {
        self.reported_total = Some(total);
        self
    }

    /// Fail every request with `error`
    pub fn failing_with(mut self, error: FetchError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Wait `delay` before answering each search
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of requests served so far
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Start offsets of every search request, in order
    pub fn requested_offsets(&self) -> Vec<u32> {
        self.offsets
            .lock()
            .map(|offsets| offsets.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CatalogClient for StaticCatalog {
    async fn search(
        &self,
        _query: &str,
        start_offset: u32,
        page_size: u32,
    ) -> Result<SearchPage, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut offsets) = self.offsets.lock() {
            offsets.push(start_offset);
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let items = self
            .books
            .iter()
            .skip(start_offset as usize)
            .take(page_size as usize)
            .map(BookDetail::summary)
            .collect();
        let total_matches = self
            .reported_total
            .unwrap_or_else(|| u32::try_from(self.books.len()).unwrap_or(u32::MAX));

        Ok(SearchPage {
            items,
            total_matches,
        })
    }

    async fn fetch_detail(&self, id: &str) -> Result<BookDetail, FetchError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        self.books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or(FetchError::BookUnavailable { status: 404 })
    }
}
