use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::validation::{is_valid_url, non_empty};
use crate::models::{Project, ProjectLinkType, ProjectWithVotes};

/// Live (non-archived) projects one member may have at a time.
pub const MAX_ACTIVE_PROJECTS: i64 = 5;
pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 80;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub member_id: Option<Uuid>,
    pub title: Option<String>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProjectInputError {
    #[error("Missing fields")]
    MissingFields,
    #[error("Invalid title")]
    InvalidTitle,
    #[error("Invalid URL")]
    InvalidUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInput {
    pub member_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
}

impl CreateProjectRequest {
    pub fn check(&self) -> Result<ProjectInput, ProjectInputError> {
        let title = non_empty(self.title.as_deref());
        let url = non_empty(self.url.as_deref());

        let (Some(member_id), Some(title), Some(url)) = (self.member_id, title, url) else {
            return Err(ProjectInputError::MissingFields);
        };

        let title_len = title.chars().count();
        if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_len) {
            return Err(ProjectInputError::InvalidTitle);
        }

        if !is_valid_url(&url) {
            return Err(ProjectInputError::InvalidUrl);
        }

        Ok(ProjectInput {
            member_id,
            title,
            description: non_empty(self.description.as_deref()),
            url,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub member_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub link_type: ProjectLinkType,
    pub link_label: String,
    pub clicks: i32,
    /// Only present when read through the monthly vote view.
    pub monthly_votes: Option<i64>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        let link_type = ProjectLinkType::detect(&project.url);
        Self {
            id: project.id,
            member_id: project.member_id,
            title: project.title,
            description: project.description,
            url: project.url,
            link_type,
            link_label: link_type.label().to_string(),
            clicks: project.clicks,
            monthly_votes: None,
            is_archived: project.is_archived,
            created_at: project.created_at,
        }
    }
}

impl From<ProjectWithVotes> for ProjectResponse {
    fn from(row: ProjectWithVotes) -> Self {
        Self {
            monthly_votes: Some(row.monthly_votes),
            ..Self::from(row.project)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectOwner {
    pub name: String,
    pub slug: String,
}

/// Home page "top projects" row.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TopProjectEntry {
    #[serde(flatten)]
    pub project: ProjectResponse,
    pub member: ProjectOwner,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateProjectResponse {
    pub success: bool,
    pub project: ProjectResponse,
}
