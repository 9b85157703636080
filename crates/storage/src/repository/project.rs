use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::project::{ProjectInput, ProjectOwner, TopProjectEntry};
use crate::error::{Result, StorageError};
use crate::models::{Project, ProjectWithVotes};

const PROJECT_COLUMNS: &str =
    "id, member_id, title, description, url, clicks, is_archived, created_at";

#[derive(FromRow)]
struct TopProjectRow {
    #[sqlx(flatten)]
    project: ProjectWithVotes,
    member_name: String,
    member_slug: String,
}

pub struct ProjectRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProjectRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Project> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Every project of a member, archived ones included (dashboard view)
    pub async fn list_for_member(&self, member_id: Uuid) -> Result<Vec<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE member_id = $1 ORDER BY created_at"
        );
        let projects = sqlx::query_as::<_, Project>(&sql)
            .bind(member_id)
            .fetch_all(self.pool)
            .await?;

        Ok(projects)
    }

    /// Live projects of several members at once, oldest first
    pub async fn list_active_for_members(&self, member_ids: &[Uuid]) -> Result<Vec<Project>> {
        if member_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE member_id = ANY($1) AND NOT is_archived
            ORDER BY created_at
            "#
        );
        let projects = sqlx::query_as::<_, Project>(&sql)
            .bind(member_ids)
            .fetch_all(self.pool)
            .await?;

        Ok(projects)
    }

    /// Live projects of a member with this month's votes, most voted first
    pub async fn list_with_votes_for_member(&self, member_id: Uuid) -> Result<Vec<ProjectWithVotes>> {
        let sql = format!(
            r#"
            SELECT {PROJECT_COLUMNS}, monthly_votes
            FROM projects_with_monthly_votes
            WHERE member_id = $1 AND NOT is_archived
            ORDER BY monthly_votes DESC, clicks DESC
            "#
        );
        let projects = sqlx::query_as::<_, ProjectWithVotes>(&sql)
            .bind(member_id)
            .fetch_all(self.pool)
            .await?;

        Ok(projects)
    }

    /// Most voted live projects of approved members this month
    pub async fn top_projects(&self, limit: i64) -> Result<Vec<TopProjectEntry>> {
        let rows = sqlx::query_as::<_, TopProjectRow>(
            r#"
            SELECT p.id, p.member_id, p.title, p.description, p.url, p.clicks,
                   p.is_archived, p.created_at, p.monthly_votes,
                   m.name AS member_name, m.slug AS member_slug
            FROM projects_with_monthly_votes p
            INNER JOIN members m ON m.id = p.member_id
            WHERE m.is_approved AND NOT p.is_archived
            ORDER BY p.monthly_votes DESC, p.clicks DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| TopProjectEntry {
                project: row.project.into(),
                member: ProjectOwner {
                    name: row.member_name,
                    slug: row.member_slug,
                },
            })
            .collect())
    }

    pub async fn count_active(&self, member_id: Uuid) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE member_id = $1 AND NOT is_archived",
        )
        .bind(member_id)
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    pub async fn create(&self, input: &ProjectInput) -> Result<Project> {
        let sql = format!(
            r#"
            INSERT INTO projects (member_id, title, description, url)
            VALUES ($1, $2, $3, $4)
            RETURNING {PROJECT_COLUMNS}
            "#
        );
        let project = sqlx::query_as::<_, Project>(&sql)
            .bind(input.member_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.url)
            .fetch_one(self.pool)
            .await?;

        Ok(project)
    }

    pub async fn archive(&self, id: Uuid) -> Result<Project> {
        let sql = format!(
            "UPDATE projects SET is_archived = TRUE WHERE id = $1 RETURNING {PROJECT_COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Bumps the click counter through the store's `increment_clicks` procedure
    pub async fn increment_clicks(&self, id: Uuid) -> Result<()> {
        sqlx::query("SELECT increment_clicks($1)")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
