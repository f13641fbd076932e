//! WebSocket connection handlers.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ConnectInfo, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ClientMessageError, ConnectionId, PushFrame},
    infrastructure::dto::websocket::parse_client_message,
    ui::state::AppState,
    usecase::{ClientContext, HandleOutcome},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Response {
    upgrade(ws, state, addr)
}

/// Completes the upgrade and hands the socket to its connection tasks
pub(super) fn upgrade(ws: WebSocketUpgrade, state: Arc<AppState>, addr: SocketAddr) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state, addr))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// The loop ends when the channel is closed (the connection was removed from
/// the registry), when a write fails, or after a close frame was written.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<PushFrame>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let (message, is_close) = match frame {
                PushFrame::Text(json) => (Message::Text(json.into()), false),
                PushFrame::Ping => (Message::Ping(axum::body::Bytes::new()), false),
                PushFrame::Close { code, reason } => (
                    Message::Close(Some(CloseFrame {
                        code,
                        reason: reason.into(),
                    })),
                    true,
                ),
            };

            if sender.send(message).await.is_err() || is_close {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, addr: SocketAddr) {
    let connection_id = ConnectionId::generate();
    let context = ClientContext {
        connection_id,
        origin: addr.to_string(),
    };
    let (sender, mut receiver) = socket.split();

    // Create a channel for this connection to receive frames
    let (tx, rx) = mpsc::unbounded_channel();

    // Register before the writer starts so welcome/init are queued first
    let client_count = state
        .connect_client_usecase
        .execute(connection_id, tx)
        .await;
    tracing::info!(
        "Client {} connected from {} ({} connected)",
        connection_id,
        context.origin,
        client_count
    );

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on {}: {}", context.connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from {}: {}", context.connection_id, text.as_str());
                    let parsed = parse_client_message(text.as_str());
                    let outcome = state_clone
                        .handle_message_usecase
                        .execute(&context, parsed)
                        .await;
                    if outcome == HandleOutcome::Rejected {
                        tracing::debug!("Rejected message from {}", context.connection_id);
                    }
                }
                Message::Binary(_) => {
                    state_clone
                        .handle_message_usecase
                        .execute(
                            &context,
                            Err(ClientMessageError::Malformed(
                                "binary frames are not supported".to_string(),
                            )),
                        )
                        .await;
                }
                Message::Pong(_) => {
                    state_clone
                        .heartbeat_usecase
                        .record_pong(&context.connection_id)
                        .await;
                }
                Message::Ping(_) => {
                    // Pong replies are sent by the WebSocket layer
                    tracing::trace!("Received ping from {}", context.connection_id);
                }
                Message::Close(_) => {
                    tracing::info!("Client {} requested close", context.connection_id);
                    break;
                }
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let remaining = state
        .disconnect_client_usecase
        .execute(&connection_id)
        .await;
    tracing::info!(
        "Client {} disconnected ({} connected)",
        connection_id,
        remaining
    );
}
