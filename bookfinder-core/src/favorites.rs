//! Favorite books, persisted under [`FAVORITES_KEY`] on every change

use crate::storage::{load_json, save_json, StorageProvider, FAVORITES_KEY};
use crate::types::BookRecord;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Favorites in insertion order, unique by book id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet {
    books: Vec<BookRecord>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a persisted array, keeping the first record per id
    pub fn from_records(records: Vec<BookRecord>) -> Self {
        let mut set = Self::new();
        for record in records {
            if !set.contains(record.id()) {
                set.books.push(record);
            }
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.books.iter().any(|b| b.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&BookRecord> {
        self.books.iter().find(|b| b.id() == id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookRecord> {
        self.books.iter()
    }

    /// Remove `book` if its id is present, otherwise append it.
    /// Returns whether the book is a favorite afterwards.
    pub fn toggle(&mut self, book: BookRecord) -> bool {
        let before = self.books.len();
        self.books.retain(|b| b.id() != book.id());
        if self.books.len() == before {
            self.books.push(book);
            true
        } else {
            false
        }
    }
}

/// Owns the favorites set and keeps storage in step with it
pub struct FavoritesStore {
    storage: Arc<dyn StorageProvider>,
    favorites: FavoritesSet,
}

impl FavoritesStore {
    /// Restore favorites from storage. Missing or corrupt data yields an empty set.
    pub async fn load(storage: Arc<dyn StorageProvider>) -> Self {
        let records: Vec<BookRecord> = load_json(storage.as_ref(), FAVORITES_KEY)
            .await
            .unwrap_or_default();
        let favorites = FavoritesSet::from_records(records);
        tracing::debug!("Loaded {} favorites", favorites.len());

        Self { storage, favorites }
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub fn contains(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Add or remove `book`, then overwrite the persisted set.
    ///
    /// A failed write is logged; the in-memory change stands.
    pub async fn toggle(&mut self, book: impl Into<BookRecord>) -> &FavoritesSet {
        let book = book.into();
        let id = book.id().to_string();
        let added = self.favorites.toggle(book);
        tracing::info!(
            "{} favorite {} ({} total)",
            if added { "Added" } else { "Removed" },
            id,
            self.favorites.len()
        );

        if let Err(e) = save_json(self.storage.as_ref(), FAVORITES_KEY, &self.favorites).await {
            tracing::warn!("Failed to persist favorites: {}", e);
        }

        &self.favorites
    }
}
