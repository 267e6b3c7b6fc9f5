//! Infrastructure layer: concrete implementations of the domain interfaces.

pub mod audit;
pub mod dto;
pub mod message_pusher;
pub mod registry;
pub mod repository;
