use anyhow::{Context, Result};
use std::str::FromStr;
use std::time::Duration;

use crate::middleware::rate_limit::RateRule;

pub const DEFAULT_SITE_URL: &str = "https://amsterdamaibuilders.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth_url: String,
    pub auth_api_key: String,
    pub admin_emails: String,
    pub turnstile_secret_key: Option<String>,
    pub site_url: String,
    /// `APP_ENV=development`: admin checks are skipped.
    pub dev_mode: bool,
    pub run_migrations: bool,
    pub vote_rule: RateRule,
    pub click_rule: RateRule,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, so tests can pass a plain map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("Cannot load {} env variable", key))
        };
        let optional = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let vote_rule = RateRule::new(
            parse_or(&lookup, "VOTE_RATE_LIMIT", 5)?,
            Duration::from_secs(parse_or(&lookup, "VOTE_RATE_WINDOW_SECS", 60)?),
        );
        let click_rule = RateRule::new(
            parse_or(&lookup, "CLICK_RATE_LIMIT", 30)?,
            Duration::from_secs(parse_or(&lookup, "CLICK_RATE_WINDOW_SECS", 60)?),
        );

        Ok(Self {
            host: required("HOST")?,
            port: required("PORT")?
                .parse()
                .context("PORT must be a number")?,
            database_url: required("DATABASE_URL")?,
            auth_url: required("AUTH_URL")?.trim_end_matches('/').to_string(),
            auth_api_key: required("AUTH_API_KEY")?,
            admin_emails: lookup("ADMIN_EMAILS").unwrap_or_default(),
            turnstile_secret_key: optional("TURNSTILE_SECRET_KEY"),
            site_url: optional("SITE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string()),
            dev_mode: optional("APP_ENV").is_some_and(|env| env.eq_ignore_ascii_case("development")),
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
            vote_rule,
            click_rule,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} has an invalid value '{}'", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const BASE: &[(&str, &str)] = &[
        ("HOST", "0.0.0.0"),
        ("PORT", "8080"),
        ("DATABASE_URL", "postgres://app:secret@db/community"),
        ("AUTH_URL", "https://project.auth.example.com/"),
        ("AUTH_API_KEY", "anon-key"),
    ];

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(env(BASE)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.auth_url, "https://project.auth.example.com");
        assert_eq!(config.site_url, DEFAULT_SITE_URL);
        assert!(config.turnstile_secret_key.is_none());
        assert!(!config.dev_mode);
        assert!(config.run_migrations);
        assert_eq!(config.vote_rule, RateRule::new(5, Duration::from_secs(60)));
        assert_eq!(config.click_rule, RateRule::new(30, Duration::from_secs(60)));
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn overrides_are_read() {
        let mut pairs = BASE.to_vec();
        pairs.extend([
            ("APP_ENV", "Development"),
            ("TURNSTILE_SECRET_KEY", "ts-secret"),
            ("SITE_URL", "https://builders.example.org/"),
            ("RUN_MIGRATIONS", "false"),
            ("VOTE_RATE_LIMIT", "2"),
            ("VOTE_RATE_WINDOW_SECS", "10"),
        ]);
        let config = Config::from_lookup(env(&pairs)).unwrap();
        assert!(config.dev_mode);
        assert_eq!(config.turnstile_secret_key.as_deref(), Some("ts-secret"));
        assert_eq!(config.site_url, "https://builders.example.org");
        assert!(!config.run_migrations);
        assert_eq!(config.vote_rule, RateRule::new(2, Duration::from_secs(10)));
    }

    #[test]
    fn missing_database_url_fails() {
        let pairs: Vec<_> = BASE
            .iter()
            .copied()
            .filter(|(k, _)| *k != "DATABASE_URL")
            .collect();
        let err = Config::from_lookup(env(&pairs)).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn bad_numbers_fail() {
        let mut pairs = BASE.to_vec();
        pairs.push(("CLICK_RATE_LIMIT", "lots"));
        assert!(Config::from_lookup(env(&pairs)).is_err());

        let mut pairs = BASE.to_vec();
        pairs.retain(|(k, _)| *k != "PORT");
        pairs.push(("PORT", "http"));
        assert!(Config::from_lookup(env(&pairs)).is_err());
    }
}
