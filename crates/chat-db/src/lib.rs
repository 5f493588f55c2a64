//! # chat-db
//!
//! Storage layer implementing the presence store and message log ports
//! defined in `chat-core`.
//!
//! ## Overview
//!
//! - Connection pool management with bounded connect-with-retry
//! - Idempotent schema bootstrap
//! - Database models with SQLx `FromRow` derives and entity mappers
//! - PostgreSQL repositories (`PgParticipantRepository`, `PgMessageRepository`)
//! - In-memory repositories for tests and single-process runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chat_db::{connect_with_retry, ensure_schema, DatabaseConfig, PgParticipantRepository};
//!
//! async fn example(url: String) -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig { url, ..Default::default() };
//!     let pool = connect_with_retry(&config).await?;
//!     ensure_schema(&pool).await?;
//!     let participants = PgParticipantRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{MemMessageRepository, MemParticipantRepository};
pub use pool::{connect_with_retry, create_pool, ensure_schema, DatabaseConfig, PgPool};
pub use repositories::{PgMessageRepository, PgParticipantRepository};
