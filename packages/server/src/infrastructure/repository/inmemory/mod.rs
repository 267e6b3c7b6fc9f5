//! In-memory Room Table.

mod room;

pub use room::InMemoryRoomRepository;
