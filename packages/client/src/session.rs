//! WebSocket client session management.

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use quizroom_shared::protocol::{ClientEvent, ServerEvent};
use tokio::{
    net::TcpStream,
    sync::{Mutex, mpsc},
    task::JoinHandle,
    time::Instant,
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::{
    command::{InputCommand, parse_input},
    error::ClientError,
    state::ClientState,
};

use super::{formatter::MessageFormatter, ui::redisplay_prompt};

/// How often `ping_room` is sent while in a room
const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);

type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Run one WebSocket session
///
/// Returns `Ok(())` when the user quits and `Err` when the connection could
/// not be opened or was lost.
pub async fn run_client_session(
    url: &str,
    state: Arc<Mutex<ClientState>>,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    tracing::info!("Connected to quiz server!");

    let (username, resume_room) = {
        let state = state.lock().await;
        (state.username.clone(), state.current_room.clone())
    };
    let (mut write, read) = ws_stream.split();

    match resume_room {
        // Resume the room we were in before the connection dropped
        Some(room_code) => {
            tracing::info!("Rejoining room '{}'", room_code);
            send_event(
                &mut write,
                &ClientEvent::RejoinRoom {
                    username: username.clone(),
                    room_code,
                },
            )
            .await?;
        }
        None => println!(
            "\nYou are '{}'. Type /help for commands. Press Ctrl+C to exit.\n",
            username
        ),
    }

    let mut read_task = spawn_reader(read, state.clone(), username.clone());
    let result = input_loop(&mut write, &state, &username, input_rx, &mut read_task).await;

    read_task.abort();
    // Best effort: the peer may already be gone
    let _ = write.close().await;
    result
}

/// Spawns a task that prints every server event and tracks the current room.
fn spawn_reader(
    mut read: futures_util::stream::SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>,
    state: Arc<Mutex<ClientState>>,
    username: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(event) => {
                            state.lock().await.apply(&event);
                            match MessageFormatter::format_event(&event, &username) {
                                Some(formatted) => {
                                    print!("{}", formatted);
                                    redisplay_prompt(&username);
                                }
                                None => tracing::debug!("Received {:?}", event),
                            }
                        }
                        // If parsing fails, display as raw text
                        Err(_) => {
                            print!("{}", MessageFormatter::format_raw_message(text.as_str()));
                            redisplay_prompt(&username);
                        }
                    }
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&username);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    })
}

/// Forward user input and keep-alive pings until the user quits or the
/// connection goes away.
async fn input_loop(
    write: &mut WsWriter,
    state: &Mutex<ClientState>,
    username: &str,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
    read_task: &mut JoinHandle<()>,
) -> Result<(), ClientError> {
    let mut keepalive =
        tokio::time::interval_at(Instant::now() + KEEPALIVE_INTERVAL, KEEPALIVE_INTERVAL);

    loop {
        tokio::select! {
            _ = &mut *read_task => return Err(ClientError::ConnectionLost),
            _ = keepalive.tick() => {
                let current_room = state.lock().await.current_room.clone();
                if let Some(room_code) = current_room {
                    send_event(write, &ClientEvent::PingRoom { room_code }).await?;
                }
            }
            line = input_rx.recv() => {
                // Input closed (Ctrl+C / Ctrl+D)
                let Some(line) = line else {
                    return Ok(());
                };

                let current_room = state.lock().await.current_room.clone();
                match parse_input(&line, username, current_room.as_deref()) {
                    Ok(InputCommand::Send(event)) => {
                        send_event(write, &event).await?;
                        if let ClientEvent::LeaveRoom { room_code, .. } = &event {
                            state.lock().await.leave_room();
                            println!("\nLeft room {}", room_code);
                        }
                    }
                    Ok(InputCommand::Help) => println!("{}", MessageFormatter::format_help()),
                    Ok(InputCommand::Quit) => return Ok(()),
                    Err(e) => println!("\n{}", e),
                }
            }
        }
    }
}

async fn send_event(write: &mut WsWriter, event: &ClientEvent) -> Result<(), ClientError> {
    let json = serde_json::to_string(event)?;
    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send event: {}", e);
        ClientError::ConnectionLost
    })
}
