//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use quizroom_shared::protocol::ClientEvent;
use tokio::sync::mpsc;

use crate::{
    domain::{Command, ConnectionHandle},
    ui::state::AppState,
    usecase::SessionError,
};

const INVALID_MESSAGE_FORMAT: &str = "Invalid message format";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// Everything the coordinator emits for this connection goes through `rx`, so
/// the order in which frames hit the socket is the order they were emitted.
///
/// # Arguments
///
/// * `rx` - Channel receiver fed by the message pusher
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let handle = ConnectionHandle::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    let (sender, mut receiver) = socket.split();

    // Start draining before connect so connection_success is the first frame
    let mut send_task = pusher_loop(rx, sender);

    if let Err(e) = state.session_coordinator.connect(handle, tx).await {
        tracing::error!("Closing connection '{}': {}", handle, e);
        send_task.abort();
        return;
    }

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", handle, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from '{}': {}", handle, text.as_str());
                    if let Err(e) = dispatch(&state_clone, handle, text.as_str()).await {
                        tracing::error!("Closing connection '{}': {}", handle, e);
                        break;
                    }
                }
                Message::Ping(_) => {
                    // Pong is answered by axum
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", handle);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.session_coordinator.disconnect(handle).await;
}

/// Decode one text frame and hand it to the coordinator.
///
/// Malformed frames are answered with an `error` event and never change state.
/// Only an `InvalidState` comes back as `Err`, which closes the connection.
async fn dispatch(
    state: &AppState,
    handle: ConnectionHandle,
    text: &str,
) -> Result<(), SessionError> {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!("Failed to parse message from '{}': {}", handle, e);
            state
                .session_coordinator
                .reject(handle, INVALID_MESSAGE_FORMAT)
                .await;
            return Ok(());
        }
    };

    // Convert wire event -> Command (Domain Model)
    let command = match Command::try_from(event) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("Invalid payload from '{}': {}", handle, e);
            state.session_coordinator.reject(handle, e.to_string()).await;
            return Ok(());
        }
    };

    state
        .session_coordinator
        .execute(handle, command)
        .await
        .map(|_| ())
}
