//! Client execution logic with reconnection support.

use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use super::{error::ClientError, session::run_client_session, state::ClientState, ui::spawn_input_reader};

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the WebSocket client with reconnection logic
///
/// The current room is kept across reconnects, so a dropped connection
/// resumes the room with `rejoin_room` instead of joining it again.
pub async fn run_client(url: String, username: String) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(Mutex::new(ClientState::new(username.clone())));
    let mut input_rx = spawn_input_reader(&username);
    let mut failed_attempts = 0;

    loop {
        tracing::info!("Connecting to {} as '{}'", url, username);

        match run_client_session(&url, state.clone(), &mut input_rx).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                // If the user exited, don't reconnect
                break;
            }
            Err(e) => {
                tracing::warn!("{}", e);

                // A session that was up resets the budget
                if matches!(e, ClientError::ConnectionLost) {
                    failed_attempts = 0;
                }
                failed_attempts += 1;

                if failed_attempts > MAX_RECONNECT_ATTEMPTS {
                    return Err(Box::new(ClientError::ReconnectFailed(
                        MAX_RECONNECT_ATTEMPTS,
                    )));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    failed_attempts,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}
