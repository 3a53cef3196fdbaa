//! Server-Sent Events support

use crate::session::SessionEvent;
use crate::transcript::ChatTurn;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Initial snapshot sent when a client attaches to a session stream
#[derive(Debug, Clone)]
pub struct InitEvent {
    pub turns: Vec<ChatTurn>,
    pub busy: bool,
}

/// Convert broadcast stream to SSE stream, prefixed with the transcript
/// snapshot.
pub fn sse_stream(
    init: InitEvent,
    broadcast_rx: tokio::sync::broadcast::Receiver<SessionEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init = futures::stream::once(async move { Ok(init_to_axum(&init)) });

    let broadcasts = BroadcastStream::new(broadcast_rx).filter_map(|result| match result {
        Ok(event) => Some(Ok(session_event_to_axum(&event))),
        Err(_) => None, // Skip lagged messages
    });

    let combined = init.chain(broadcasts);

    Sse::new(combined).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn init_to_axum(init: &InitEvent) -> Event {
    let data = json!({
        "type": "init",
        "turns": init.turns,
        "busy": init.busy,
    });
    Event::default().event("init").data(data.to_string())
}

fn session_event_to_axum(event: &SessionEvent) -> Event {
    let (event_type, data) = match event {
        SessionEvent::Turn { turn } => (
            "turn",
            json!({
                "type": "turn",
                "turn": turn,
            }),
        ),
        SessionEvent::Reveal { text } => (
            "reveal",
            json!({
                "type": "reveal",
                "text": text,
            }),
        ),
        SessionEvent::Error { message } => (
            "error",
            json!({
                "type": "error",
                "message": message,
            }),
        ),
        SessionEvent::Cancelled => ("cancelled", json!({ "type": "cancelled" })),
        SessionEvent::Cleared => ("cleared", json!({ "type": "cleared" })),
        SessionEvent::Done => ("done", json!({ "type": "done" })),
    };

    Event::default().event(event_type).data(data.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_event_serializes_turns_in_order() {
        let init = InitEvent {
            turns: vec![ChatTurn::user("q"), ChatTurn::assistant("a")],
            busy: false,
        };
        let data = json!({
            "type": "init",
            "turns": init.turns,
            "busy": init.busy,
        });
        assert_eq!(data["turns"][0]["role"], "user");
        assert_eq!(data["turns"][1]["role"], "assistant");
        assert_eq!(data["busy"], false);
    }
}
