//! WebSocket stream of picker events.
//!
//! Every event the picker emits is forwarded to each connected client as a
//! JSON [`PickerEventEnvelope`]. Clients that only want to mirror the
//! selection (a notebook kernel, a fallback list) listen for
//! `selection_changed`.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use modelpicker_core::PickerEventEnvelope;

use crate::metrics::{WS_CONNECTIONS_ACTIVE, WS_CONNECTIONS_TOTAL, WS_LAG_EVENTS, WS_MESSAGES_SENT};
use crate::state::AppState;

/// Interval between heartbeat messages.
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

fn encode_event(envelope: &PickerEventEnvelope) -> Option<String> {
    match serde_json::to_string(envelope) {
        Ok(json) => Some(json),
        Err(e) => {
            error!("Failed to serialize picker event: {}", e);
            None
        }
    }
}

/// Handle a single WebSocket connection.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribe to picker events
    let mut rx = state.events().subscribe();

    WS_CONNECTIONS_TOTAL.inc();
    WS_CONNECTIONS_ACTIVE.inc();

    info!("WebSocket client connected");

    // Spawn task to forward picker events to this client
    let send_task = tokio::spawn(async move {
        let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
        // The first tick completes immediately
        heartbeat.tick().await;

        loop {
            let text = tokio::select! {
                result = rx.recv() => {
                    match result {
                        Ok(envelope) => {
                            WS_MESSAGES_SENT
                                .with_label_values(&[envelope.event.event_type()])
                                .inc();
                            match encode_event(&envelope) {
                                Some(json) => json,
                                None => continue,
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            warn!("WebSocket client lagged, skipped {} events", n);
                            WS_LAG_EVENTS.inc();
                            continue;
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            debug!("Event channel closed");
                            break;
                        }
                    }
                }
                _ = heartbeat.tick() => {
                    WS_MESSAGES_SENT.with_label_values(&["heartbeat"]).inc();
                    json!({"type": "heartbeat", "timestamp": Utc::now().timestamp()}).to_string()
                }
            };

            if sender.send(Message::Text(text.into())).await.is_err() {
                debug!("WebSocket send failed, client disconnected");
                break;
            }
        }
    });

    // Handle incoming messages from client (ping/pong, close)
    while let Some(result) = receiver.next().await {
        match result {
            Ok(Message::Close(_)) => {
                debug!("WebSocket client requested close");
                break;
            }
            Ok(Message::Text(text)) => {
                // The stream is one-way
                debug!("Ignoring client message: {}", text);
            }
            Ok(_) => {}
            Err(e) => {
                warn!("WebSocket receive error: {}", e);
                break;
            }
        }
    }

    send_task.abort();
    WS_CONNECTIONS_ACTIVE.dec();
    info!("WebSocket client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelpicker_core::{AssetKind, PickerEvent};

    #[test]
    fn test_encode_event_is_flat_json() {
        let envelope = PickerEventEnvelope {
            timestamp: Utc::now(),
            event: PickerEvent::SelectionChanged {
                kind: AssetKind::Model,
                selected: vec!["RealismEngine".to_string()],
            },
        };
        let json: serde_json::Value =
            serde_json::from_str(&encode_event(&envelope).unwrap()).unwrap();
        assert_eq!(json["type"], "selection_changed");
        assert_eq!(json["selected"][0], "RealismEngine");
        assert!(json["timestamp"].is_string());
    }
}
