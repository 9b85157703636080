use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref DISALLOWED: Regex = Regex::new(r"[^a-z0-9\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref DASHES: Regex = Regex::new(r"-+").unwrap();
    static ref SLUG: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Shortest slug a member profile may use.
pub const MIN_SLUG_LEN: usize = 3;

/// Lowercases `value` and reduces it to `[a-z0-9-]`, turning whitespace runs
/// into single dashes.
///
/// Leading or trailing dashes survive, so the result still has to pass
/// [`Slug::parse`].
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let kept = DISALLOWED.replace_all(lowered.trim(), "");
    let dashed = WHITESPACE.replace_all(&kept, "-");
    DASHES.replace_all(&dashed, "-").into_owned()
}

pub fn is_valid_slug(value: &str) -> bool {
    SLUG.is_match(value)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid slug '{0}'")]
pub struct InvalidSlug(pub String);

/// A public profile path segment (`/m/{slug}`).
///
/// Constructing one always goes through [`slugify`], so two inputs that only
/// differ in case or spacing land on the same slug.
///
/// ```
/// use storage::models::Slug;
///
/// let slug = Slug::from_request(None, "Ada Lovelace").unwrap();
/// assert_eq!(slug.as_str(), "ada-lovelace");
///
/// assert!(Slug::from_request(Some("ab"), "Ada").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// Validates an already-slugified value.
    pub fn parse(value: &str) -> Result<Self, InvalidSlug> {
        if value.len() < MIN_SLUG_LEN || !is_valid_slug(value) {
            return Err(InvalidSlug(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }

    /// Slug for a profile form: the requested slug when given, the name
    /// otherwise. Only an absent or empty request falls back; whitespace is
    /// slugified like any other input.
    pub fn from_request(requested: Option<&str>, name: &str) -> Result<Self, InvalidSlug> {
        let source = requested.filter(|s| !s.is_empty()).unwrap_or(name);
        Self::parse(&slugify(source))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_dashes_spaces() {
        assert_eq!(slugify("  Grace   Hopper "), "grace-hopper");
    }

    #[test]
    fn test_slugify_drops_punctuation() {
        assert_eq!(slugify("Jean-Luc O'Brien!"), "jean-luc-obrien");
    }

    #[test]
    fn test_slugify_collapses_dash_runs() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("rust---lang"), "rust-lang");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("Zoë Ångström"), "zo-ngstrm");
    }

    #[test]
    fn test_valid_slug_pattern() {
        assert!(is_valid_slug("abc"));
        assert!(is_valid_slug("a1-b2-c3"));
        assert!(!is_valid_slug("-abc"));
        assert!(!is_valid_slug("abc-"));
        assert!(!is_valid_slug("a--b"));
        assert!(!is_valid_slug("ABC"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn test_parse_rejects_short_slugs() {
        assert!(Slug::parse("ab").is_err());
        assert_eq!(Slug::parse("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_from_request_prefers_explicit_slug() {
        let slug = Slug::from_request(Some("The Builder"), "Someone Else").unwrap();
        assert_eq!(slug.as_str(), "the-builder");
    }

    #[test]
    fn test_from_request_falls_back_to_name() {
        let slug = Slug::from_request(Some(""), "Linus Torvalds").unwrap();
        assert_eq!(slug.as_str(), "linus-torvalds");
        let slug = Slug::from_request(None, "Linus Torvalds").unwrap();
        assert_eq!(slug.as_str(), "linus-torvalds");
    }

    #[test]
    fn test_from_request_whitespace_slug_is_invalid() {
        assert!(Slug::from_request(Some("   "), "Linus Torvalds").is_err());
    }

    #[test]
    fn test_from_request_rejects_trailing_dash() {
        assert!(Slug::from_request(Some("builder!!! -"), "x").is_err());
    }

    #[test]
    fn test_from_request_rejects_symbol_only_names() {
        assert!(Slug::from_request(None, "!!!").is_err());
    }
}
