//! Schema bootstrap
//!
//! Every statement is idempotent so the server can run it on each start.

use sqlx::PgPool;
use tracing::{debug, instrument};

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS participants (
        name        TEXT PRIMARY KEY,
        last_status BIGINT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_participants_last_status
        ON participants (last_status)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS messages (
        id        BIGSERIAL PRIMARY KEY,
        sender    TEXT NOT NULL,
        recipient TEXT NOT NULL,
        body      TEXT NOT NULL,
        kind      TEXT NOT NULL CHECK (kind IN ('message', 'private_message', 'status')),
        time      TEXT NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_messages_sender ON messages (sender)
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_messages_recipient ON messages (recipient)
    "#,
];

/// Create tables and indexes if they do not exist yet
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    debug!(statements = SCHEMA.len(), "Schema ensured");
    Ok(())
}
