use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    static ref TWITTER_HANDLE: Regex = Regex::new(r"^[A-Za-z0-9_]{1,15}$").unwrap();
    static ref GITHUB_HANDLE: Regex = Regex::new(r"^[A-Za-z0-9-]{1,39}$").unwrap();
}

/// Accepts bare hosts (`example.com`) as well as full URLs. Empty input is
/// valid: the field is optional.
pub fn is_valid_url(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    let candidate = if value.starts_with("http") {
        value.to_string()
    } else {
        format!("https://{}", value)
    };

    match Url::parse(&candidate) {
        Ok(url) => url.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}

pub fn is_valid_twitter(value: Option<&str>) -> bool {
    match value {
        None | Some("") => true,
        Some(handle) => TWITTER_HANDLE.is_match(handle),
    }
}

pub fn is_valid_github(value: Option<&str>) -> bool {
    match value {
        None | Some("") => true,
        Some(handle) => GITHUB_HANDLE.is_match(handle),
    }
}

/// `Some("")` and whitespace-only strings count as "not provided".
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_url_is_valid() {
        assert!(is_valid_url(""));
    }

    #[test]
    fn bare_host_is_valid() {
        assert!(is_valid_url("example.com"));
        assert!(is_valid_url("example.com/path?q=1"));
    }

    #[test]
    fn full_urls_are_valid() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://localhost:3000/x"));
    }

    #[test]
    fn malformed_urls_are_rejected() {
        assert!(!is_valid_url("http//broken"));
        assert!(!is_valid_url("exa mple.com"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn twitter_handles() {
        assert!(is_valid_twitter(None));
        assert!(is_valid_twitter(Some("")));
        assert!(is_valid_twitter(Some("jack_dorsey")));
        assert!(!is_valid_twitter(Some("@jack")));
        assert!(!is_valid_twitter(Some("a_handle_that_is_too_long")));
    }

    #[test]
    fn github_handles() {
        assert!(is_valid_github(None));
        assert!(is_valid_github(Some("rust-lang")));
        assert!(!is_valid_github(Some("under_score")));
        assert!(!is_valid_github(Some(&"a".repeat(40))));
    }

    #[test]
    fn non_empty_trims() {
        assert_eq!(non_empty(Some("  x ")), Some("x".to_string()));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }
}
