use md5::{Digest, Md5};

use crate::models::Member;

pub const DEFAULT_AVATAR_SIZE: u32 = 200;

/// Gravatar image for `email`, falling back to a generated identicon.
pub fn gravatar_url(email: &str, size: u32) -> String {
    let normalized = email.trim().to_lowercase();
    let hash = hex::encode(Md5::digest(normalized.as_bytes()));
    format!("https://www.gravatar.com/avatar/{}?s={}&d=identicon", hash, size)
}

/// The member's own picture when set, their Gravatar otherwise.
pub fn avatar_url(member: &Member) -> String {
    member
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(String::from)
        .unwrap_or_else(|| gravatar_url(&member.email, DEFAULT_AVATAR_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn member(image_url: Option<&str>) -> Member {
        Member {
            id: Uuid::new_v4(),
            name: "Test".into(),
            slug: "test".into(),
            bio: None,
            image_url: image_url.map(String::from),
            twitter: None,
            github: None,
            linkedin: None,
            website: None,
            email: "MyEmailAddress@example.com".into(),
            is_approved: true,
            points: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn gravatar_hash_is_normalized_md5() {
        assert_eq!(
            gravatar_url("  MyEmailAddress@example.com ", 200),
            "https://www.gravatar.com/avatar/0bc83cb571cd1c50ba6f3e8a78ef1346?s=200&d=identicon"
        );
    }

    #[test]
    fn gravatar_size_is_passed_through() {
        assert!(gravatar_url("a@b.c", 48).contains("?s=48&"));
    }

    #[test]
    fn explicit_image_wins() {
        assert_eq!(
            avatar_url(&member(Some("https://img.example.com/me.png"))),
            "https://img.example.com/me.png"
        );
    }

    #[test]
    fn blank_image_falls_back_to_gravatar() {
        assert!(avatar_url(&member(Some(" "))).starts_with("https://www.gravatar.com/avatar/"));
        assert!(avatar_url(&member(None)).starts_with("https://www.gravatar.com/avatar/"));
    }
}
