//! BookFinder Core Library
//!
//! This crate provides the data model and logic behind BookFinder: a client for
//! a public book catalog, a search controller that pages through results while
//! respecting the catalog's offset ceiling, and a persisted set of favorite
//! books. Front ends (CLI, HTTP server) only render state and dispatch intents.

pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod search;
pub mod storage;
pub mod types;

pub use catalog::{CatalogClient, GoogleBooksClient, SearchPage, StaticCatalog};
pub use config::Config;
pub use error::{BookFinderError, ConfigError, FetchError, Result, StorageError};
pub use favorites::{FavoritesSet, FavoritesStore};
pub use search::{FetchTicket, SearchController, SearchPhase, SearchPolicy, SearchState, SearchView};
pub use types::{BookDetail, BookRecord, BookSummary};
