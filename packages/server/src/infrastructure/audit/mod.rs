//! Audit side effects.
//!
//! - `queue`: bounded queue and background worker feeding a sink
//! - `json_lines`: append-only JSON-lines file sink
//! - `tracing_sink`: sink that writes records to the log

pub mod json_lines;
pub mod queue;
pub mod tracing_sink;

pub use json_lines::JsonLinesAuditSink;
pub use queue::{AuditEntry, AuditQueue, AuditWorker};
pub use tracing_sink::TracingAuditSink;
