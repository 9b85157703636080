//! Sitemap for search engines: the static pages plus one entry per
//! approved member profile.

use askama::Template;
use sqlx::PgPool;
use storage::{dto::member::SitemapMember, repository::member::MemberRepository};

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapUrl {
    pub loc: String,
    pub lastmod: Option<String>,
    pub changefreq: &'static str,
    pub priority: f32,
}

impl SitemapUrl {
    pub fn priority_label(&self) -> String {
        format!("{:.1}", self.priority)
    }
}

/// Site root and the join page; always listed.
pub fn static_urls(site_url: &str) -> Vec<SitemapUrl> {
    vec![
        SitemapUrl {
            loc: site_url.to_string(),
            lastmod: None,
            changefreq: "daily",
            priority: 1.0,
        },
        SitemapUrl {
            loc: format!("{}/join", site_url),
            lastmod: None,
            changefreq: "monthly",
            priority: 0.8,
        },
    ]
}

pub fn member_urls(site_url: &str, members: &[SitemapMember]) -> Vec<SitemapUrl> {
    members
        .iter()
        .map(|member| SitemapUrl {
            loc: format!("{}/m/{}", site_url, member.slug),
            lastmod: Some(member.created_at.format("%Y-%m-%d").to_string()),
            changefreq: "weekly",
            priority: 0.6,
        })
        .collect()
}

/// Escaping comes from the `.xml` template extension.
#[derive(Template)]
#[template(path = "sitemap.xml")]
struct SitemapTemplate<'a> {
    urls: &'a [SitemapUrl],
}

pub fn render(urls: &[SitemapUrl]) -> Result<String, askama::Error> {
    SitemapTemplate { urls }.render()
}

/// Builds the sitemap. A database failure degrades to the static pages.
pub async fn sitemap(pool: &PgPool, site_url: &str) -> Result<String, askama::Error> {
    let mut urls = static_urls(site_url);

    match MemberRepository::new(pool).list_for_sitemap().await {
        Ok(members) => urls.extend(member_urls(site_url, &members)),
        Err(e) => tracing::warn!("Sitemap lists static pages only, member query failed: {:?}", e),
    }

    render(&urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const SITE: &str = "https://builders.example.org";

    #[test]
    fn static_pages_only() {
        let xml = render(&static_urls(SITE)).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://builders.example.org</loc>"));
        assert!(xml.contains("<loc>https://builders.example.org/join</loc>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn members_get_profile_urls() {
        let members = vec![SitemapMember {
            slug: "ada-lovelace".into(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 9, 8, 30, 0).unwrap(),
        }];
        let mut urls = static_urls(SITE);
        urls.extend(member_urls(SITE, &members));
        let xml = render(&urls).unwrap();

        assert!(xml.contains("<loc>https://builders.example.org/m/ada-lovelace</loc>"));
        assert!(xml.contains("<lastmod>2025-01-09</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.6</priority>"));
        assert_eq!(xml.matches("<url>").count(), 3);
    }

    #[test]
    fn locations_are_escaped() {
        let urls = static_urls("https://example.org/?a=1&b=<2>");
        let xml = render(&urls).unwrap();
        assert!(xml.contains("https://example.org/?a=1&amp;b=&lt;2&gt;"));
    }
}
