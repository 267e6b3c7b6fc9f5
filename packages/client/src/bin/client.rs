//! Terminal client for Quizroom with reconnection support.
//!
//! Connects to a Quizroom server, reads slash commands from the terminal and
//! prints room events. Automatically reconnects on disconnection (max 5
//! attempts with 5 second interval) and resumes the room it was in.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin quizroom-client -- --username alice
//! cargo run --bin quizroom-client -- -u bob --url ws://127.0.0.1:3000/ws
//! ```

use clap::Parser;

use quizroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "quizroom-client")]
#[command(about = "Terminal client for Quizroom rooms", long_about = None)]
struct Args {
    /// Username shown to the other members of a room
    #[arg(short = 'u', long)]
    username: String,

    /// WebSocket server URL
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the client
    if let Err(e) = quizroom_client::run_client(args.url, args.username).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
