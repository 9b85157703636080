use std::collections::HashMap;

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::common::PageParams;
use crate::dto::leaderboard::{LEADERBOARD_PROJECT_TITLES, LeaderboardEntry};
use crate::error::Result;
use crate::models::{Member, PointTier};
use crate::services::avatar::avatar_url;

#[derive(FromRow)]
struct RankedMember {
    rank: i64,
    #[sqlx(flatten)]
    member: Member,
}

pub struct LeaderboardRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn page(&self, params: &PageParams) -> Result<(Vec<LeaderboardEntry>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members WHERE is_approved")
            .fetch_one(self.pool)
            .await?;

        let rows = sqlx::query_as::<_, RankedMember>(
            r#"
            WITH ranked AS (
                SELECT id, name, slug, bio, image_url, twitter, github, linkedin,
                       website, email, is_approved, points, created_at,
                       ROW_NUMBER() OVER (ORDER BY points DESC, created_at ASC) AS rank
                FROM members
                WHERE is_approved
            )
            SELECT * FROM ranked
            ORDER BY rank
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|row| row.member.id).collect();
        let mut titles = self.project_titles(&ids).await?;

        let entries = rows
            .into_iter()
            .map(|row| LeaderboardEntry {
                rank: row.rank,
                member_id: row.member.id,
                avatar_url: avatar_url(&row.member),
                tier: PointTier::for_points(row.member.points),
                top_projects: titles.remove(&row.member.id).unwrap_or_default(),
                name: row.member.name,
                slug: row.member.slug,
                points: row.member.points,
            })
            .collect();

        Ok((entries, total))
    }

    async fn project_titles(&self, member_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<String>>> {
        if member_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, (Uuid, String)>(
            r#"
            SELECT member_id, title
            FROM projects
            WHERE member_id = ANY($1) AND NOT is_archived
            ORDER BY created_at
            "#,
        )
        .bind(member_ids)
        .fetch_all(self.pool)
        .await?;

        let mut titles: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (member_id, title) in rows {
            let list = titles.entry(member_id).or_default();
            if list.len() < LEADERBOARD_PROJECT_TITLES {
                list.push(title);
            }
        }

        Ok(titles)
    }
}
