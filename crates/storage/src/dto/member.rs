use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::project::ProjectResponse;
use super::validation::{is_valid_github, is_valid_twitter, is_valid_url, non_empty};
use crate::models::{Member, PointTier, Slug};
use crate::services::avatar::avatar_url;

/// Profile form payload. Without `id` it creates the caller's profile, with
/// `id` it updates it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpsertMemberRequest {
    pub id: Option<Uuid>,

    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,

    #[validate(length(max = 80))]
    pub slug: Option<String>,

    #[validate(length(max = 1000, message = "Bio must be at most 1000 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 500))]
    pub image_url: Option<String>,

    pub twitter: Option<String>,

    pub github: Option<String>,

    #[validate(length(max = 100))]
    pub linkedin: Option<String>,

    #[validate(length(max = 500))]
    pub website: Option<String>,

    /// Captcha token, required when creating a profile and captcha checks are enabled.
    pub turnstile_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MemberInputError {
    #[error("Name is required")]
    MissingName,
    #[error("Invalid slug")]
    InvalidSlug,
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Invalid handle")]
    InvalidHandle,
}

/// Profile fields after trimming, slug derivation and validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInput {
    pub name: String,
    pub slug: Slug,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
}

impl UpsertMemberRequest {
    /// Checks run in a fixed order so the first failing rule decides the message.
    pub fn check(&self) -> Result<MemberInput, MemberInputError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(MemberInputError::MissingName);
        }

        let slug = Slug::from_request(self.slug.as_deref(), name)
            .map_err(|_| MemberInputError::InvalidSlug)?;

        if !is_valid_url(self.website.as_deref().unwrap_or_default())
            || !is_valid_url(self.image_url.as_deref().unwrap_or_default())
        {
            return Err(MemberInputError::InvalidUrl);
        }
        let website = non_empty(self.website.as_deref());
        let image_url = non_empty(self.image_url.as_deref());

        let twitter = non_empty(self.twitter.as_deref());
        let github = non_empty(self.github.as_deref());
        if !is_valid_twitter(twitter.as_deref()) || !is_valid_github(github.as_deref()) {
            return Err(MemberInputError::InvalidHandle);
        }

        Ok(MemberInput {
            name: name.to_string(),
            slug,
            bio: non_empty(self.bio.as_deref()),
            image_url,
            twitter,
            github,
            linkedin: non_empty(self.linkedin.as_deref()),
            website,
        })
    }
}

/// Member as seen by its owner and by admins.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub avatar_url: String,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub email: String,
    pub is_approved: bool,
    pub points: i32,
    pub tier: PointTier,
    pub created_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            avatar_url: avatar_url(&member),
            tier: PointTier::for_points(member.points),
            id: member.id,
            name: member.name,
            slug: member.slug,
            bio: member.bio,
            image_url: member.image_url,
            twitter: member.twitter,
            github: member.github,
            linkedin: member.linkedin,
            website: member.website,
            email: member.email,
            is_approved: member.is_approved,
            points: member.points,
            created_at: member.created_at,
        }
    }
}

/// Member as shown to visitors. The email never leaves the server; only
/// its Gravatar hash does, through `avatar_url`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicMemberResponse {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub avatar_url: String,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    pub is_approved: bool,
    pub points: i32,
    pub tier: PointTier,
    pub created_at: DateTime<Utc>,
}

impl From<Member> for PublicMemberResponse {
    fn from(member: Member) -> Self {
        Self {
            avatar_url: avatar_url(&member),
            tier: PointTier::for_points(member.points),
            id: member.id,
            name: member.name,
            slug: member.slug,
            bio: member.bio,
            twitter: member.twitter,
            github: member.github,
            linkedin: member.linkedin,
            website: member.website,
            is_approved: member.is_approved,
            points: member.points,
            created_at: member.created_at,
        }
    }
}

/// Home page card: an approved member and their live projects.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberWithProjects {
    #[serde(flatten)]
    pub member: PublicMemberResponse,
    pub projects: Vec<ProjectResponse>,
}

/// Everything the `/m/{slug}` page shows.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemberProfileResponse {
    pub member: PublicMemberResponse,
    /// Set when the caller is looking at their own profile.
    pub is_own_profile: bool,
    pub projects: Vec<ProjectResponse>,
    /// 1-based position among approved members; `None` while pending approval.
    pub rank: Option<i64>,
    pub total_members: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub email: String,
    pub member: Option<MemberResponse>,
    pub projects: Vec<ProjectResponse>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum UpsertMemberResponse {
    Created { success: bool, member: MemberResponse },
    Updated { success: bool, slug: String },
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SitemapMember {
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn request(name: &str) -> UpsertMemberRequest {
        UpsertMemberRequest {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn name_is_required() {
        assert_eq!(request("   ").check(), Err(MemberInputError::MissingName));
    }

    #[test]
    fn slug_defaults_to_name() {
        let input = request("  Ada Lovelace ").check().unwrap();
        assert_eq!(input.name, "Ada Lovelace");
        assert_eq!(input.slug.as_str(), "ada-lovelace");
    }

    #[test]
    fn short_slug_is_rejected() {
        let mut req = request("Ada");
        req.slug = Some("ab".into());
        assert_eq!(req.check(), Err(MemberInputError::InvalidSlug));
    }

    #[test]
    fn url_checked_before_handles() {
        let mut req = request("Ada Lovelace");
        req.website = Some("not a url".into());
        req.twitter = Some("@bad".into());
        assert_eq!(req.check(), Err(MemberInputError::InvalidUrl));
    }

    #[test]
    fn bad_image_url_is_rejected() {
        let mut req = request("Ada Lovelace");
        req.image_url = Some("https://".into());
        assert_eq!(req.check(), Err(MemberInputError::InvalidUrl));
    }

    #[test]
    fn urls_are_checked_before_trimming() {
        let mut req = request("Ada Lovelace");
        req.website = Some(" https://x.io".into());
        assert_eq!(req.check(), Err(MemberInputError::InvalidUrl));

        let mut req = request("Ada Lovelace");
        req.image_url = Some("   ".into());
        assert_eq!(req.check(), Err(MemberInputError::InvalidUrl));
    }

    #[test]
    fn blank_slug_does_not_fall_back_to_name() {
        let mut req = request("Ada Lovelace");
        req.slug = Some("   ".into());
        assert_eq!(req.check(), Err(MemberInputError::InvalidSlug));
    }

    #[test]
    fn bad_handle_is_rejected() {
        let mut req = request("Ada Lovelace");
        req.github = Some("under_score".into());
        assert_eq!(req.check(), Err(MemberInputError::InvalidHandle));
    }

    #[test]
    fn empty_optionals_become_none() {
        let mut req = request("Ada Lovelace");
        req.bio = Some("  ".into());
        req.website = Some("".into());
        req.linkedin = Some("ada".into());
        let input = req.check().unwrap();
        assert_eq!(input.bio, None);
        assert_eq!(input.website, None);
        assert_eq!(input.linkedin.as_deref(), Some("ada"));
    }

    #[test]
    fn overlong_bio_fails_validation() {
        let mut req = request("Ada Lovelace");
        req.bio = Some("x".repeat(1001));
        assert!(req.validate().is_err());
    }

    #[test]
    fn public_response_hides_email() {
        let member = Member {
            id: Uuid::new_v4(),
            name: "Ada".into(),
            slug: "ada".into(),
            bio: None,
            image_url: None,
            twitter: None,
            github: None,
            linkedin: None,
            website: None,
            email: "ada@example.com".into(),
            is_approved: true,
            points: 75,
            created_at: Utc::now(),
        };
        let public = PublicMemberResponse::from(member);
        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("email").is_none());
        assert_eq!(json["tier"], "silver");
        assert!(public.avatar_url.starts_with("https://www.gravatar.com/avatar/"));
    }
}
