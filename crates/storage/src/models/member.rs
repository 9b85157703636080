use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub email: String,
    pub is_approved: bool,
    pub points: i32,
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Whether `email` identifies the owner of this profile.
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}
