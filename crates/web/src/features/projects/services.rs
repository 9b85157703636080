use chrono::{DateTime, Datelike, Utc};
use sqlx::PgPool;
use storage::{
    dto::project::{MAX_ACTIVE_PROJECTS, ProjectInput, TopProjectEntry},
    error::StorageError,
    models::Project,
    repository::{member::MemberRepository, project::ProjectRepository, vote::VoteRepository},
    services::points,
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Projects shown in the home page's top list.
pub const TOP_PROJECTS_LIMIT: i64 = 10;

/// Midnight UTC on the first day of `now`'s month.
pub fn start_of_month_utc(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .with_day(1)
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|start| start.and_utc())
        .unwrap_or(now)
}

/// Fails with `Forbidden` unless `member_id` belongs to `email`.
async fn ensure_owner(pool: &PgPool, member_id: Uuid, email: &str) -> WebResult<()> {
    match MemberRepository::new(pool).find_by_id(member_id).await {
        Ok(member) if member.is_owned_by(email) => Ok(()),
        Ok(_) | Err(StorageError::NotFound) => Err(WebError::Forbidden),
        Err(e) => Err(e.into()),
    }
}

pub async fn create_project(pool: &PgPool, email: &str, input: &ProjectInput) -> WebResult<Project> {
    ensure_owner(pool, input.member_id, email).await?;

    let repo = ProjectRepository::new(pool);
    if repo.count_active(input.member_id).await? >= MAX_ACTIVE_PROJECTS {
        return Err(WebError::BadRequest("Project limit reached".to_string()));
    }

    let project = repo.create(input).await?;
    tracing::info!("Project {} created for member {}", project.id, project.member_id);

    Ok(project)
}

async fn owned_project(pool: &PgPool, id: Uuid, email: &str) -> WebResult<Project> {
    let project = ProjectRepository::new(pool).find_by_id(id).await?;
    ensure_owner(pool, project.member_id, email).await?;
    Ok(project)
}

pub async fn delete_project(pool: &PgPool, id: Uuid, email: &str) -> WebResult<()> {
    owned_project(pool, id, email).await?;
    ProjectRepository::new(pool).delete(id).await?;
    tracing::info!("Project {} deleted", id);
    Ok(())
}

pub async fn archive_project(pool: &PgPool, id: Uuid, email: &str) -> WebResult<Project> {
    owned_project(pool, id, email).await?;
    let project = ProjectRepository::new(pool).archive(id).await?;
    tracing::info!("Project {} archived", id);
    Ok(project)
}

pub async fn top_projects(pool: &PgPool) -> WebResult<Vec<TopProjectEntry>> {
    Ok(ProjectRepository::new(pool)
        .top_projects(TOP_PROJECTS_LIMIT)
        .await?)
}

/// Records one vote per IP per calendar month and credits the owner.
pub async fn vote(pool: &PgPool, id: Uuid, voter_ip: &str) -> WebResult<()> {
    let project = ProjectRepository::new(pool).find_by_id(id).await?;

    let votes = VoteRepository::new(pool);
    let since = start_of_month_utc(Utc::now());
    if votes.has_voted_since(id, voter_ip, since).await? {
        return Err(WebError::BadRequest("Already voted".to_string()));
    }

    match votes.record(id, voter_ip).await {
        Ok(vote) => tracing::debug!("Vote {} recorded for {}", vote.id, vote.voted_month),
        Err(StorageError::ConstraintViolation(_)) => {
            return Err(WebError::BadRequest("Already voted".to_string()));
        }
        Err(e) => {
            tracing::error!("Failed to record vote on project {}: {:?}", id, e);
            return Err(WebError::Failed("Vote failed".to_string()));
        }
    }

    match points::award_for_vote(pool, &project).await {
        Ok(()) => tracing::info!(
            "Awarded {} points to member {} for a vote",
            points::VOTE_POINTS,
            project.member_id
        ),
        Err(e) => tracing::error!("Vote on {} recorded but points not awarded: {:?}", id, e),
    }

    Ok(())
}

/// Counts a click-through. Unknown projects are counted as a no-op.
pub async fn click(pool: &PgPool, id: Uuid) -> WebResult<()> {
    let repo = ProjectRepository::new(pool);
    repo.increment_clicks(id).await?;

    let project = match repo.find_by_id(id).await {
        Ok(project) => project,
        Err(StorageError::NotFound) => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    if let Err(e) = points::award_for_click(pool, &project).await {
        tracing::error!("Click on {} counted but points not awarded: {:?}", id, e);
    }

    Ok(())
}
