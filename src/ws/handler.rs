//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the viewer session
//! lifecycle: register with the hub, forward pushed snapshots to the
//! socket, and unregister on disconnect. Viewers are receive-only; the
//! reference behavior sends nothing on connect, so a fresh session stays
//! silent until the next measurement arrives.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::BroadcastHub;
use super::messages::{FeedMessage, SessionReject};
use crate::api::AppState;

/// WebSocket upgrade handler, the entry point for viewer connections.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.hub);
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

/// Run one viewer session to completion.
async fn handle_socket(socket: WebSocket, hub: Arc<BroadcastHub>) {
    let (mut sender, mut receiver) = socket.split();

    // Channel the hub pushes feed messages into
    let (tx, mut rx) = mpsc::unbounded_channel::<FeedMessage>();

    let subscriber_id = match hub.subscribe(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected viewer connection");
            let reject = SessionReject {
                error: e.to_string(),
            };
            let _ = sender
                .send(Message::Text(serde_json::to_string(&reject).unwrap()))
                .await;
            return;
        }
    };

    let sub_id_for_send = subscriber_id.clone();

    // Task to forward published snapshots to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            subscriber_id = %sub_id_for_send,
                            "WebSocket send failed, closing session"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize feed message");
                }
            }
        }
    });

    let sub_id_for_recv = subscriber_id.clone();

    // Task to drain inbound frames and detect disconnection
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => {
                    tracing::debug!(subscriber_id = %sub_id_for_recv, "Viewer requested close");
                    break;
                }
                // Viewers are receive-only; text/binary frames are ignored
                // and ping/pong is handled by axum itself.
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(
                        subscriber_id = %sub_id_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // Whichever side finishes first ends the session
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    hub.unsubscribe(&subscriber_id).await;
}
