use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::PointTier;

/// Project titles shown next to a leaderboard entry.
pub const LEADERBOARD_PROJECT_TITLES: usize = 2;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub member_id: Uuid,
    pub name: String,
    pub slug: String,
    pub avatar_url: String,
    pub points: i32,
    pub tier: PointTier,
    pub top_projects: Vec<String>,
}
