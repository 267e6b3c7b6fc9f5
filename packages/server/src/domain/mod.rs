//! Domain layer: entities, value objects and the interfaces the use cases depend on.

pub mod audit;
pub mod command;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod notification;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use audit::{AuditSink, RoomClosedRecord, RoomCreatedRecord};
pub use command::Command;
pub use entity::{Room, RoomStatus, RoomSummary};
pub use error::{AuditError, MessagePushError, RegistryError, RoomError, ValueObjectError};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use notification::Notification;
pub use registry::{Binding, ConnectionRegistry};
pub use repository::{LeaveOutcome, RoomRepository};
pub use value_object::{ConnectionHandle, RoomCode, Timestamp, Username};
