//! Entity to model mappers
//!
//! This module provides conversions between domain entities (chat-core) and database models.
//! - `From<Model> for Entity` / `TryFrom<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod message;
mod participant;

pub use message::MessageInsert;
