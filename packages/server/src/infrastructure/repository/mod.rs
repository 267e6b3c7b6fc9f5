//! Room Table implementations.

pub mod inmemory;

pub use inmemory::InMemoryRoomRepository;
