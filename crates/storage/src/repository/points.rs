use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::common::PageParams;
use crate::error::Result;
use crate::models::{PointSource, PointTransaction};

/// One call to the store's `award_points` procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointAward {
    pub member_id: Uuid,
    pub points: i32,
    pub reason: String,
    pub source: PointSource,
    pub project_id: Option<Uuid>,
    pub awarded_by: Option<Uuid>,
}

pub struct PointsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PointsRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Appends to the ledger and bumps the member total in one procedure call
    pub async fn award(&self, award: &PointAward) -> Result<()> {
        sqlx::query("SELECT award_points($1, $2, $3, $4, $5, $6)")
            .bind(award.member_id)
            .bind(award.points)
            .bind(&award.reason)
            .bind(award.source.as_str())
            .bind(award.project_id)
            .bind(award.awarded_by)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    pub async fn list_for_member(
        &self,
        member_id: Uuid,
        page: &PageParams,
    ) -> Result<(Vec<PointTransaction>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM point_transactions WHERE member_id = $1",
        )
        .bind(member_id)
        .fetch_one(self.pool)
        .await?;

        let transactions = sqlx::query_as::<_, PointTransaction>(
            r#"
            SELECT id, member_id, points, reason, source, project_id, awarded_by, created_at
            FROM point_transactions
            WHERE member_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(member_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok((transactions, total))
    }
}
