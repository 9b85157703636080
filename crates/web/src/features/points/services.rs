use sqlx::PgPool;
use storage::{
    dto::{
        common::{Page, PageParams},
        points::AwardPointsInput,
    },
    models::PointTransaction,
    repository::{member::MemberRepository, points::PointsRepository},
    services::points,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Member id of the admin behind `email`, if they have a profile.
pub async fn admin_member_id(pool: &PgPool, email: Option<&str>) -> WebResult<Option<Uuid>> {
    let Some(email) = email else {
        return Ok(None);
    };

    let member = MemberRepository::new(pool).find_by_email(email).await?;
    Ok(member.map(|m| m.id))
}

pub async fn award(
    pool: &PgPool,
    input: &AwardPointsInput,
    awarded_by: Option<Uuid>,
) -> WebResult<()> {
    points::award_by_admin(pool, input.member_id, input.points, &input.reason, awarded_by)
        .await
        .map_err(|e| {
            tracing::error!("Failed to award points to {}: {:?}", input.member_id, e);
            WebError::Failed("Failed to award points".to_string())
        })?;

    tracing::info!(
        "Admin awarded {} points to member {}: {}",
        input.points,
        input.member_id,
        input.reason
    );

    Ok(())
}

/// Point history of an approved member, newest first
pub async fn ledger(pool: &PgPool, slug: &str, params: &PageParams) -> WebResult<Page<PointTransaction>> {
    let member = MemberRepository::new(pool)
        .find_approved_by_slug(slug)
        .await?
        .ok_or(WebError::NotFound)?;

    let (transactions, total) = PointsRepository::new(pool)
        .list_for_member(member.id, params)
        .await?;

    Ok(Page::new(transactions, params, total))
}
