//! PostgreSQL implementation of ParticipantRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use chat_core::entities::Participant;
use chat_core::error::DomainError;
use chat_core::traits::{ParticipantRepository, RepoResult};

use crate::models::ParticipantModel;

use super::error::{map_db_error, map_unique_violation, participant_not_found};

/// PostgreSQL implementation of ParticipantRepository
#[derive(Clone)]
pub struct PgParticipantRepository {
    pool: PgPool,
}

impl PgParticipantRepository {
    /// Create a new PgParticipantRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PgParticipantRepository {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Participant>> {
        let result = sqlx::query_as::<_, ParticipantModel>(
            r#"
            SELECT name, last_status
            FROM participants
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Participant::from))
    }

    #[instrument(skip(self), fields(name = %participant.name))]
    async fn create(&self, participant: &Participant) -> RepoResult<()> {
        // The primary key makes check-and-insert a single atomic statement.
        sqlx::query(
            r#"
            INSERT INTO participants (name, last_status)
            VALUES ($1, $2)
            "#,
        )
        .bind(&participant.name)
        .bind(participant.last_seen)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::ParticipantAlreadyExists(participant.name.clone())
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch(&self, name: &str, now_ms: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE participants
            SET last_status = GREATEST(last_status, $2)
            WHERE name = $1
            "#,
        )
        .bind(name)
        .bind(now_ms)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(participant_not_found(name));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Participant>> {
        let results = sqlx::query_as::<_, ParticipantModel>(
            r#"
            SELECT name, last_status
            FROM participants
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Participant::from).collect())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM participants")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count.0)
    }

    #[instrument(skip(self))]
    async fn delete_stale_before(&self, cutoff_ms: i64) -> RepoResult<Vec<Participant>> {
        // Same predicate selects and removes, so a concurrent touch past the
        // cutoff keeps the row.
        let results = sqlx::query_as::<_, ParticipantModel>(
            r#"
            DELETE FROM participants
            WHERE last_status < $1
            RETURNING name, last_status
            "#,
        )
        .bind(cutoff_ms)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Participant::from).collect())
    }
}
