//! Quizroom room coordinator server.
//!
//! Clients create or join rooms by short code over a WebSocket and receive
//! the room's events. Room lifecycle records go to an audit sink.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin quizroom-server
//! cargo run --bin quizroom-server -- --host 0.0.0.0 --port 3000 --audit-log audit.jsonl
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use quizroom_server::{
    domain::AuditSink,
    infrastructure::{
        audit::{AuditQueue, JsonLinesAuditSink, TracingAuditSink},
        message_pusher::WebSocketMessagePusher,
        registry::InMemoryConnectionRegistry,
        repository::InMemoryRoomRepository,
    },
    ui::Server,
    usecase::{GetRoomDetailUseCase, GetRoomsUseCase, SessionCoordinator},
};
use quizroom_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "quizroom-server")]
#[command(about = "Room coordinator for real-time quiz sessions", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Append room lifecycle records to this JSON-lines file (logged otherwise)
    #[arg(long)]
    audit_log: Option<PathBuf>,

    /// Number of audit records that may wait for the writer
    #[arg(long, default_value = "1024")]
    audit_queue_capacity: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = run(args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize dependencies in order:
    // 1. Audit sink and queue
    // 2. Repository / Registry / MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Audit sink and queue
    let sink: Arc<dyn AuditSink> = match &args.audit_log {
        Some(path) => {
            let sink = JsonLinesAuditSink::open(path).await?;
            tracing::info!("Writing audit records to {}", sink.path().display());
            Arc::new(sink)
        }
        None => Arc::new(TracingAuditSink),
    };
    let (audit_queue, audit_worker) = AuditQueue::start(sink, args.audit_queue_capacity);

    // 2. Room Table, Connection Registry and MessagePusher
    let repository = Arc::new(InMemoryRoomRepository::new(
        Arc::new(SystemClock),
        audit_queue,
    ));
    let registry = Arc::new(InMemoryConnectionRegistry::new());
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. UseCases
    let session_coordinator = Arc::new(SessionCoordinator::new(
        repository.clone(),
        registry,
        message_pusher,
    ));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository));

    // 4. Create and run the server
    let server = Server::new(
        session_coordinator,
        get_rooms_usecase,
        get_room_detail_usecase,
    );
    let result = server.run(args.host, args.port).await;

    // Write out whatever is still queued before exiting
    audit_worker.shutdown().await;
    tracing::info!("Audit queue drained");

    result
}
