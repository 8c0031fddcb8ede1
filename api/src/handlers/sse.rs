use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::{AppState, SseEvent};

/// Server-Sent Events handler for filter and application updates
#[tracing::instrument(skip(state))]
pub async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.sse_tx.subscribe();
    let stream = BroadcastStream::new(rx).map(|msg| match msg {
        Ok(event) => {
            let name = match &event {
                SseEvent::FiltersChanged { .. } => "filters_changed",
                SseEvent::ApplicationSubmitted { .. } => "application_submitted",
            };
            let json = serde_json::to_string(&event).unwrap_or_default();
            Ok(Event::default().event(name).data(json))
        }
        // Lagged behind, ask the client to reload its state
        Err(_) => Ok(Event::default().event("reconnect")),
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
