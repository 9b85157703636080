//! Fixed-window rate limiting keyed by arbitrary strings.
//!
//! Each key owns a counter and the instant its window closes. An expired
//! bucket is replaced on the next access of the same key; `purge_expired`
//! drops the ones nobody touches again. Nothing survives a restart.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// `limit` requests per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRule {
    pub limit: u32,
    pub window: Duration,
}

impl RateRule {
    pub const fn new(limit: u32, window: Duration) -> Self {
        Self { limit, window }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed,
    Limited { retry_after: Duration },
}

#[cfg(test)]
impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    count: u32,
    reset_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct RateLimiter {
    buckets: Arc<Mutex<HashMap<String, Bucket>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&self, key: &str, rule: RateRule) -> RateDecision {
        self.check_at(key, rule, Instant::now())
    }

    pub fn check_at(&self, key: &str, rule: RateRule, now: Instant) -> RateDecision {
        let mut buckets = self.buckets.lock();

        match buckets.get_mut(key) {
            Some(bucket) if bucket.reset_at > now => {
                if bucket.count >= rule.limit {
                    return RateDecision::Limited {
                        retry_after: bucket.reset_at.saturating_duration_since(now),
                    };
                }
                bucket.count += 1;
                RateDecision::Allowed
            }
            _ => {
                buckets.insert(
                    key.to_string(),
                    Bucket {
                        count: 1,
                        reset_at: now + rule.window,
                    },
                );
                RateDecision::Allowed
            }
        }
    }

    /// Drops every bucket whose window has closed; returns how many went.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut buckets = self.buckets.lock();
        let before = buckets.len();
        buckets.retain(|_, bucket| bucket.reset_at > now);
        before - buckets.len()
    }

    pub fn len(&self) -> usize {
        self.buckets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.lock().is_empty()
    }
}

/// Whole seconds a client should wait, rounded up.
pub fn retry_after_secs(retry_after: Duration) -> u64 {
    let millis = retry_after.as_millis().div_ceil(1000);
    u64::try_from(millis).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULE: RateRule = RateRule::new(5, Duration::from_secs(60));

    #[test]
    fn allows_up_to_limit_then_denies() {
        let limiter = RateLimiter::new();
        let now = Instant::now();

        for _ in 0..5 {
            assert!(limiter.check_at("vote:p:1.2.3.4", RULE, now).is_allowed());
        }

        let later = now + Duration::from_secs(20);
        assert_eq!(
            limiter.check_at("vote:p:1.2.3.4", RULE, later),
            RateDecision::Limited {
                retry_after: Duration::from_secs(40)
            }
        );
    }

    #[test]
    fn keys_are_independent() {
        let limiter = RateLimiter::new();
        let now = Instant::now();
        let rule = RateRule::new(1, Duration::from_secs(60));

        assert!(limiter.check_at("a", rule, now).is_allowed());
        assert!(!limiter.check_at("a", rule, now).is_allowed());
        assert!(limiter.check_at("b", rule, now).is_allowed());
    }

    #[test]
    fn window_resets_after_expiry() {
        let limiter = RateLimiter::new();
        let now = Instant::now();
        let rule = RateRule::new(1, Duration::from_secs(60));

        assert!(limiter.check_at("k", rule, now).is_allowed());
        assert!(!limiter.check_at("k", rule, now + Duration::from_secs(59)).is_allowed());
        assert!(limiter.check_at("k", rule, now + Duration::from_secs(60)).is_allowed());
        assert!(!limiter.check_at("k", rule, now + Duration::from_secs(61)).is_allowed());
    }

    #[test]
    fn denied_requests_do_not_extend_the_window() {
        let limiter = RateLimiter::new();
        let now = Instant::now();
        let rule = RateRule::new(1, Duration::from_secs(10));

        limiter.check_at("k", rule, now);
        for s in 1..10 {
            limiter.check_at("k", rule, now + Duration::from_secs(s));
        }
        assert!(limiter.check_at("k", rule, now + Duration::from_secs(10)).is_allowed());
    }

    #[test]
    fn purge_drops_only_expired_buckets() {
        let limiter = RateLimiter::new();
        let now = Instant::now();

        limiter.check_at("short", RateRule::new(1, Duration::from_secs(1)), now);
        limiter.check_at("long", RateRule::new(1, Duration::from_secs(100)), now);
        assert_eq!(limiter.len(), 2);

        assert_eq!(limiter.purge_expired_at(now + Duration::from_secs(5)), 1);
        assert_eq!(limiter.len(), 1);
    }

    #[test]
    fn clones_share_state() {
        let limiter = RateLimiter::new();
        let other = limiter.clone();
        let rule = RateRule::new(1, Duration::from_secs(60));
        let now = Instant::now();

        assert!(limiter.check_at("k", rule, now).is_allowed());
        assert!(!other.check_at("k", rule, now).is_allowed());
    }

    #[test]
    fn retry_after_rounds_up() {
        assert_eq!(retry_after_secs(Duration::ZERO), 0);
        assert_eq!(retry_after_secs(Duration::from_millis(1)), 1);
        assert_eq!(retry_after_secs(Duration::from_millis(1000)), 1);
        assert_eq!(retry_after_secs(Duration::from_millis(59_001)), 60);
    }
}
