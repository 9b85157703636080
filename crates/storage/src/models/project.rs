use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Project {
    pub id: Uuid,
    pub member_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub clicks: i32,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

/// A project row from `projects_with_monthly_votes`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProjectWithVotes {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub project: Project,
    pub monthly_votes: i64,
}
