use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Vote;

pub struct VoteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VoteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn has_voted_since(
        &self,
        project_id: Uuid,
        voter_ip: &str,
        since: DateTime<Utc>,
    ) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM project_votes
                WHERE project_id = $1 AND voter_ip = $2 AND voted_at >= $3
            )
            "#,
        )
        .bind(project_id)
        .bind(voter_ip)
        .bind(since)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Inserts a vote; `voted_at` is filled in by the database. A second vote
    /// in the same month surfaces as `ConstraintViolation`.
    pub async fn record(&self, project_id: Uuid, voter_ip: &str) -> Result<Vote> {
        let vote = sqlx::query_as::<_, Vote>(
            r#"
            INSERT INTO project_votes (project_id, voter_ip)
            VALUES ($1, $2)
            RETURNING id, project_id, voter_ip, voted_at, voted_month
            "#,
        )
        .bind(project_id)
        .bind(voter_ip)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).on_unique("project_votes_once_per_month", "Already voted"))?;

        Ok(vote)
    }
}
