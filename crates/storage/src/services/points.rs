use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{PointSource, Project};
use crate::repository::points::{PointAward, PointsRepository};

pub const VOTE_POINTS: i32 = 5;
pub const CLICK_POINTS: i32 = 1;

pub fn vote_award(project: &Project) -> PointAward {
    PointAward {
        member_id: project.member_id,
        points: VOTE_POINTS,
        reason: format!("Vote received on \"{}\"", project.title),
        source: PointSource::Vote,
        project_id: Some(project.id),
        awarded_by: None,
    }
}

pub fn click_award(project: &Project) -> PointAward {
    PointAward {
        member_id: project.member_id,
        points: CLICK_POINTS,
        reason: format!("Click on \"{}\"", project.title),
        source: PointSource::Click,
        project_id: Some(project.id),
        awarded_by: None,
    }
}

pub fn admin_award(
    member_id: Uuid,
    points: i32,
    reason: impl Into<String>,
    awarded_by: Option<Uuid>,
) -> PointAward {
    PointAward {
        member_id,
        points,
        reason: reason.into(),
        source: PointSource::Admin,
        project_id: None,
        awarded_by,
    }
}

/// Credits the project owner for a vote
pub async fn award_for_vote(pool: &PgPool, project: &Project) -> Result<()> {
    PointsRepository::new(pool).award(&vote_award(project)).await
}

/// Credits the project owner for a click-through
pub async fn award_for_click(pool: &PgPool, project: &Project) -> Result<()> {
    PointsRepository::new(pool).award(&click_award(project)).await
}

pub async fn award_by_admin(
    pool: &PgPool,
    member_id: Uuid,
    points: i32,
    reason: &str,
    awarded_by: Option<Uuid>,
) -> Result<()> {
    PointsRepository::new(pool)
        .award(&admin_award(member_id, points, reason, awarded_by))
        .await
}
