use std::collections::HashMap;

use sqlx::PgPool;
use storage::{
    dto::{
        member::{
            DashboardResponse, MemberInput, MemberProfileResponse, MemberResponse,
            MemberWithProjects, PublicMemberResponse, UpsertMemberResponse,
        },
        project::ProjectResponse,
    },
    error::Result,
    models::Project,
    repository::{member::MemberRepository, project::ProjectRepository},
};
use uuid::Uuid;

use crate::error::{WebError, WebResult};

/// Approved members, newest first, each with their live projects
pub async fn list_members(pool: &PgPool) -> Result<Vec<MemberWithProjects>> {
    let members = MemberRepository::new(pool).list_approved().await?;

    let ids: Vec<Uuid> = members.iter().map(|m| m.id).collect();
    let projects = ProjectRepository::new(pool)
        .list_active_for_members(&ids)
        .await?;
    let mut by_member = group_by_member(projects);

    Ok(members
        .into_iter()
        .map(|member| MemberWithProjects {
            projects: by_member.remove(&member.id).unwrap_or_default(),
            member: PublicMemberResponse::from(member),
        })
        .collect())
}

fn group_by_member(projects: Vec<Project>) -> HashMap<Uuid, Vec<ProjectResponse>> {
    let mut grouped: HashMap<Uuid, Vec<ProjectResponse>> = HashMap::new();
    for project in projects {
        grouped
            .entry(project.member_id)
            .or_default()
            .push(ProjectResponse::from(project));
    }
    grouped
}

/// Profile page data. Visitors only see approved members; the owner also
/// sees their own profile while it waits for approval.
pub async fn get_profile(
    pool: &PgPool,
    slug: &str,
    viewer_email: Option<&str>,
) -> WebResult<MemberProfileResponse> {
    let repo = MemberRepository::new(pool);

    let member = match repo.find_approved_by_slug(slug).await? {
        Some(member) => member,
        None => match viewer_email {
            Some(email) => repo
                .find_owned_by_slug(slug, email)
                .await?
                .ok_or(WebError::NotFound)?,
            None => return Err(WebError::NotFound),
        },
    };

    let is_own_profile = viewer_email.is_some_and(|email| member.is_owned_by(email));
    let rank = if member.is_approved {
        repo.rank_of(member.id).await?
    } else {
        None
    };
    let total_members = repo.count_approved().await?;

    let projects = ProjectRepository::new(pool)
        .list_with_votes_for_member(member.id)
        .await?
        .into_iter()
        .map(ProjectResponse::from)
        .collect();

    Ok(MemberProfileResponse {
        member: PublicMemberResponse::from(member),
        is_own_profile,
        projects,
        rank,
        total_members,
    })
}

pub async fn dashboard(pool: &PgPool, email: &str) -> Result<DashboardResponse> {
    let Some(member) = MemberRepository::new(pool).find_by_email(email).await? else {
        return Ok(DashboardResponse {
            email: email.to_string(),
            member: None,
            projects: Vec::new(),
        });
    };

    let projects = ProjectRepository::new(pool)
        .list_for_member(member.id)
        .await?
        .into_iter()
        .map(ProjectResponse::from)
        .collect();

    Ok(DashboardResponse {
        email: email.to_string(),
        member: Some(MemberResponse::from(member)),
        projects,
    })
}

/// Creates the caller's profile, or updates it when `id` is given.
pub async fn upsert_member(
    pool: &PgPool,
    email: &str,
    id: Option<Uuid>,
    input: &MemberInput,
) -> WebResult<UpsertMemberResponse> {
    let repo = MemberRepository::new(pool);

    if let Some(owner) = repo.slug_owner(input.slug.as_str()).await? {
        if Some(owner) != id {
            return Err(WebError::Conflict("Slug already taken".to_string()));
        }
    }

    match id {
        Some(id) => {
            let member = repo.update_owned(id, email, input).await?;
            tracing::info!("Member {} updated their profile", member.id);
            Ok(UpsertMemberResponse::Updated {
                success: true,
                slug: member.slug,
            })
        }
        None => {
            let member = repo.create(email, input).await?;
            tracing::info!("Member {} created with slug {}", member.id, member.slug);
            Ok(UpsertMemberResponse::Created {
                success: true,
                member: MemberResponse::from(member),
            })
        }
    }
}
