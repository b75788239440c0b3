//! Server-Sent Events handler so open views stay in step

use crate::state::{AppState, ServerEvent};
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// SSE endpoint for search and favourites changes
pub async fn sync_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    let stream = BroadcastStream::new(rx);

    let event_stream = stream.filter_map(|result| match result {
        Ok(event) => {
            let (event_type, data) = event_payload(event);
            Some(Ok(Event::default().event(event_type).data(data)))
        }
        Err(_) => None, // Lagged, skip
    });

    Sse::new(event_stream).keep_alive(KeepAlive::default())
}

fn event_payload(event: ServerEvent) -> (&'static str, String) {
    match event {
        ServerEvent::SearchUpdated {
            query,
            page,
            total_matches,
        } => (
            "search_updated",
            serde_json::json!({ "query": query, "page": page, "total_matches": total_matches })
                .to_string(),
        ),
        ServerEvent::SearchFailed { message } => (
            "search_failed",
            serde_json::json!({ "message": message }).to_string(),
        ),
        ServerEvent::SearchCleared => ("search_cleared", "{}".to_string()),
        ServerEvent::FavoritesChanged {
            id,
            favorite,
            count,
        } => (
            "favorites_changed",
            serde_json::json!({ "id": id, "favorite": favorite, "count": count }).to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_payloads() {
        let (name, data) = event_payload(ServerEvent::FavoritesChanged {
            id: "abc".to_string(),
            favorite: true,
            count: 2,
        });
        assert_eq!(name, "favorites_changed");
        let value: serde_json::Value = serde_json::from_str(&data).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["count"], 2);

        let (name, _) = event_payload(ServerEvent::SearchCleared);
        assert_eq!(name, "search_cleared");
    }
}
