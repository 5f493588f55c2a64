//! Database connection pool management

mod postgres;
mod schema;

pub use postgres::{connect_with_retry, create_pool, DatabaseConfig};
pub use schema::ensure_schema;

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
