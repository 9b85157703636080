use sqlx::PgPool;
use storage::{
    dto::{
        common::{Page, PageParams},
        leaderboard::LeaderboardEntry,
    },
    error::Result,
    repository::leaderboard::LeaderboardRepository,
};

pub async fn leaderboard(pool: &PgPool, params: &PageParams) -> Result<Page<LeaderboardEntry>> {
    let (entries, total) = LeaderboardRepository::new(pool).page(params).await?;
    Ok(Page::new(entries, params, total))
}
