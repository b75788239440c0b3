//! Book detail handler

use super::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use bookfinder_core::BookDetail;
use serde::Serialize;

/// Detail plus whether the book is a favorite
#[derive(Debug, Serialize)]
pub struct BookResponse {
    #[serde(flatten)]
    pub book: BookDetail,
    pub is_favorite: bool,
}

/// Fetch one book's detail from the catalog. Not cached.
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state.catalog.fetch_detail(&id).await.map_err(|e| {
        tracing::warn!("Failed to fetch book {}: {:?}", id, e);
        ApiError::from(e)
    })?;
    let is_favorite = state.favorites.read().await.contains(&book.id);

    Ok(Json(BookResponse { book, is_favorite }))
}
