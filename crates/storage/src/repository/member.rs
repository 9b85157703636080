use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::member::{MemberInput, SitemapMember};
use crate::error::{Result, StorageError};
use crate::models::Member;

const MEMBER_COLUMNS: &str = "id, name, slug, bio, image_url, twitter, github, linkedin, \
                              website, email, is_approved, points, created_at";

pub struct MemberRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MemberRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Approved members, newest first
    pub async fn list_approved(&self) -> Result<Vec<Member>> {
        let sql = format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE is_approved ORDER BY created_at DESC"
        );
        let members = sqlx::query_as::<_, Member>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(members)
    }

    /// All members, optionally narrowed to one approval state, newest first
    pub async fn list(&self, approved: Option<bool>) -> Result<Vec<Member>> {
        let sql = format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM members
            WHERE ($1::boolean IS NULL OR is_approved = $1)
            ORDER BY created_at DESC
            "#
        );
        let members = sqlx::query_as::<_, Member>(&sql)
            .bind(approved)
            .fetch_all(self.pool)
            .await?;

        Ok(members)
    }

    pub async fn count_pending(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM members WHERE NOT is_approved",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(count)
    }

    pub async fn count_approved(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM members WHERE is_approved")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Member> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Member>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE email = $1");
        let member = sqlx::query_as::<_, Member>(&sql)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(member)
    }

    /// Public lookup: only approved profiles are visible
    pub async fn find_approved_by_slug(&self, slug: &str) -> Result<Option<Member>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE slug = $1 AND is_approved");
        let member = sqlx::query_as::<_, Member>(&sql)
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;

        Ok(member)
    }

    /// Owner lookup: a member sees their own profile before approval
    pub async fn find_owned_by_slug(&self, slug: &str, email: &str) -> Result<Option<Member>> {
        let sql = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE slug = $1 AND email = $2");
        let member = sqlx::query_as::<_, Member>(&sql)
            .bind(slug)
            .bind(email)
            .fetch_optional(self.pool)
            .await?;

        Ok(member)
    }

    /// Id of whoever currently holds `slug`
    pub async fn slug_owner(&self, slug: &str) -> Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM members WHERE slug = $1")
            .bind(slug)
            .fetch_optional(self.pool)
            .await?;

        Ok(id)
    }

    pub async fn create(&self, email: &str, input: &MemberInput) -> Result<Member> {
        let sql = format!(
            r#"
            INSERT INTO members (name, slug, bio, image_url, twitter, github, linkedin, website, email)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {MEMBER_COLUMNS}
            "#
        );
        let member = sqlx::query_as::<_, Member>(&sql)
            .bind(&input.name)
            .bind(input.slug.as_str())
            .bind(&input.bio)
            .bind(&input.image_url)
            .bind(&input.twitter)
            .bind(&input.github)
            .bind(&input.linkedin)
            .bind(&input.website)
            .bind(email)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                StorageError::from(e)
                    .on_unique("members_slug_key", "Slug already taken")
                    .on_unique("members_email_key", "Profile already exists")
            })?;

        Ok(member)
    }

    /// Updates profile fields of `id`, but only when it belongs to `email`
    pub async fn update_owned(&self, id: Uuid, email: &str, input: &MemberInput) -> Result<Member> {
        let sql = format!(
            r#"
            UPDATE members
            SET name = $3,
                slug = $4,
                bio = $5,
                image_url = $6,
                twitter = $7,
                github = $8,
                linkedin = $9,
                website = $10
            WHERE id = $1 AND email = $2
            RETURNING {MEMBER_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Member>(&sql)
            .bind(id)
            .bind(email)
            .bind(&input.name)
            .bind(input.slug.as_str())
            .bind(&input.bio)
            .bind(&input.image_url)
            .bind(&input.twitter)
            .bind(&input.github)
            .bind(&input.linkedin)
            .bind(&input.website)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| StorageError::from(e).on_unique("members_slug_key", "Slug already taken"))?
            .ok_or(StorageError::NotFound)
    }

    pub async fn set_approval(&self, id: Uuid, approved: bool) -> Result<Member> {
        let sql = format!(
            "UPDATE members SET is_approved = $2 WHERE id = $1 RETURNING {MEMBER_COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&sql)
            .bind(id)
            .bind(approved)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Position among approved members by points; ties go to the older profile
    pub async fn rank_of(&self, id: Uuid) -> Result<Option<i64>> {
        let rank = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT rank FROM (
                SELECT id, ROW_NUMBER() OVER (ORDER BY points DESC, created_at ASC) AS rank
                FROM members
                WHERE is_approved
            ) ranked
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(rank)
    }

    pub async fn list_for_sitemap(&self) -> Result<Vec<SitemapMember>> {
        let rows = sqlx::query_as::<_, (String, chrono::DateTime<chrono::Utc>)>(
            "SELECT slug, created_at FROM members WHERE is_approved ORDER BY created_at",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(slug, created_at)| SitemapMember { slug, created_at })
            .collect())
    }
}
