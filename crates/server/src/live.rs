// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live notification streaming for roster clients.
//!
//! Mutation progress (loading, success, error) and document changes are
//! pushed to every connected WebSocket. Events are informational only.
//! Clients still fetch the document over HTTP.
//!
//! # Architecture
//!
//! - The broadcaster is the roster session's notification sink
//! - Events are broadcast to all connected clients
//! - No commands are executed over WebSocket connections

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use meeting_roster::{Notification, NotificationKind, NotificationSink};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
/// If clients cannot keep up, older events will be dropped.
const EVENT_BUFFER_SIZE: usize = 100;

/// Live event types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A user-facing notification from a mutation.
    Notification {
        /// The pt-BR message text.
        message: String,
        /// Loading, success or error.
        kind: NotificationKind,
        /// Hide the notification after this many milliseconds. Absent means
        /// it stays until replaced.
        auto_dismiss_ms: Option<u64>,
    },
    /// The stored document changed.
    DocumentChanged {
        /// The new stored version, when known.
        version: Option<i64>,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (ISO 8601).
        timestamp: String,
    },
}

impl From<Notification> for LiveEvent {
    fn from(notification: Notification) -> Self {
        Self::Notification {
            auto_dismiss_ms: notification
                .kind
                .auto_dismiss()
                .and_then(|d| u64::try_from(d.as_millis()).ok()),
            message: notification.message,
            kind: notification.kind,
        }
    }
}

/// Broadcaster for live events.
///
/// A thin wrapper around `tokio::sync::broadcast`.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// If no clients are connected, the event is dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => {
                debug!(?event, receivers = count, "Broadcast live event");
            }
            Err(_) => {
                debug!(?event, "No receivers for live event");
            }
        }
    }

    /// Subscribes to events sent from now on.
    pub(crate) fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for LiveEventBroadcaster {
    fn notify(&self, notification: Notification) {
        self.broadcast(&LiveEvent::from(notification));
    }
}

/// Handles WebSocket upgrade requests for live event streaming.
///
/// # Arguments
///
/// * `ws` - WebSocket upgrade request
/// * `broadcaster` - The live event broadcaster from application state
///
/// # Returns
///
/// An HTTP response that upgrades the connection to WebSocket
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

/// Sends a connection confirmation, then streams events until the client
/// disconnects or an error occurs.
async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event: LiveEvent = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        error!(?e, "Failed to serialize live event");
                    }
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live event client lagging, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcaster_creation() {
        let broadcaster = LiveEventBroadcaster::new();
        assert_eq!(broadcaster.tx.receiver_count(), 0);
    }

    #[test]
    fn test_broadcast_no_receivers() {
        let broadcaster = LiveEventBroadcaster::new();
        broadcaster.notify(Notification::loading("Salvando designação..."));
    }

    #[test]
    fn test_notifications_reach_every_receiver() {
        let broadcaster = LiveEventBroadcaster::new();
        let mut rx1 = broadcaster.subscribe();
        let mut rx2 = broadcaster.subscribe();

        broadcaster.notify(Notification::error("Falha ao salvar. Verifique sua conexão."));

        for rx in [&mut rx1, &mut rx2] {
            match rx.try_recv() {
                Ok(LiveEvent::Notification {
                    kind: NotificationKind::Error,
                    auto_dismiss_ms: None,
                    ..
                }) => {}
                other => panic!("Expected error notification, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_success_notification_auto_dismisses() {
        let event: LiveEvent =
            LiveEvent::from(Notification::success("Dados importados com sucesso!"));

        assert_eq!(
            event,
            LiveEvent::Notification {
                message: String::from("Dados importados com sucesso!"),
                kind: NotificationKind::Success,
                auto_dismiss_ms: Some(3000),
            }
        );
    }

    #[test]
    fn test_event_serialization() {
        let event: LiveEvent = LiveEvent::from(Notification::loading("Importando dados..."));

        let json: serde_json::Value = serde_json::to_value(&event).expect("Failed to serialize");
        assert_eq!(json["type"], "notification");
        assert_eq!(json["kind"], "loading");
        assert!(json["auto_dismiss_ms"].is_null());

        let deserialized: LiveEvent = serde_json::from_value(json).expect("Failed to deserialize");
        assert_eq!(deserialized, event);
    }

    #[test]
    fn test_document_changed_serialization() {
        let json: String = serde_json::to_string(&LiveEvent::DocumentChanged { version: Some(4) })
            .expect("Failed to serialize");

        assert_eq!(json, r#"{"type":"document_changed","version":4}"#);
    }
}
