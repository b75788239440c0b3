//! Favourites handlers

use crate::state::{AppState, ServerEvent};
use axum::{extract::State, Json};
use bookfinder_core::{BookRecord, FavoritesSet};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FavouritesResponse {
    pub count: usize,
    pub books: FavoritesSet,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub id: String,
    /// Whether the book is a favorite after the toggle
    pub favorite: bool,
    pub count: usize,
    pub books: FavoritesSet,
}

/// List favourites in insertion order
pub async fn list_favourites(State(state): State<AppState>) -> Json<FavouritesResponse> {
    let store = state.favorites.read().await;
    let books = store.favorites().clone();
    Json(FavouritesResponse {
        count: books.len(),
        books,
    })
}

/// Add the posted book, or remove it if its id is already a favourite
pub async fn toggle_favourite(
    State(state): State<AppState>,
    Json(book): Json<BookRecord>,
) -> Json<ToggleResponse> {
    let id = book.id().to_string();

    let mut store = state.favorites.write().await;
    let books = store.toggle(book).await.clone();
    let favorite = books.contains(&id);

    state.broadcast(ServerEvent::FavoritesChanged {
        id: id.clone(),
        favorite,
        count: books.len(),
    });

    Json(ToggleResponse {
        id,
        favorite,
        count: books.len(),
        books,
    })
}
