//! Data models for LinkHub
//!
//! Defines the `Link` record stored in the JSON document, the `NewLink`
//! input accepted by the store, and the seed collection written on first run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{LinkHubError, Result};

/// Scheme prepended to URLs that don't carry one
pub const DEFAULT_SCHEME: &str = "https://";

/// A saved link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// Unique, increasing identifier
    pub id: u64,
    /// Display title
    pub title: String,
    /// The URL, always with a scheme
    pub url: String,
    /// Free-form notes (may be empty)
    #[serde(default)]
    pub notes: String,
    /// Category label (may be empty)
    #[serde(default)]
    pub category: String,
    /// When this link was created
    pub created: DateTime<Utc>,
}

impl Link {
    /// Build a stored link from validated input
    pub fn from_new(id: u64, new: NewLink, created: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            url: new.url,
            notes: new.notes,
            category: new.category,
            created,
        }
    }

    /// Whether the link has a category
    pub fn has_category(&self) -> bool {
        !self.category.is_empty()
    }
}

/// Input for adding a link
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewLink {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub notes: String,
}

impl NewLink {
    /// Create input with a title and URL
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Trim every field, check that title and URL are present, and
    /// normalize the URL.
    pub fn validate(self) -> Result<Self> {
        let title = self.title.trim().to_string();
        let url = self.url.trim();
        if title.is_empty() {
            return Err(LinkHubError::Validation { field: "title" });
        }
        if url.is_empty() {
            return Err(LinkHubError::Validation { field: "url" });
        }

        Ok(Self {
            title,
            url: normalize_url(url),
            category: self.category.trim().to_string(),
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Prefix `https://` to a URL that has no scheme
pub fn normalize_url(url: &str) -> String {
    if has_scheme(url) {
        url.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, url)
    }
}

/// Check for a leading `scheme:` per RFC 3986.
///
/// `host:port` is not a scheme: a colon followed only by digits (up to the
/// first `/`) is treated as a port.
fn has_scheme(url: &str) -> bool {
    let Some((scheme, rest)) = url.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    let valid_scheme = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return false;
    }

    let port = rest.split('/').next().unwrap_or("");
    port.is_empty() || !port.chars().all(|c| c.is_ascii_digit())
}

/// The collection written when no data file exists yet
pub fn seed_links(now: DateTime<Utc>) -> Vec<Link> {
    [
        ("Google", "https://www.google.com", "Search", "Search"),
        ("GitHub", "https://github.com", "Code hosting", "Dev"),
        ("YouTube", "https://www.youtube.com", "Videos", "Media"),
    ]
    .into_iter()
    .zip(1..)
    .map(|((title, url, notes, category), id)| Link {
        id,
        title: title.to_string(),
        url: url.to_string(),
        notes: notes.to_string(),
        category: category.to_string(),
        created: now,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(
            normalize_url("www.example.com/path?q=1"),
            "https://www.example.com/path?q=1"
        );
    }

    #[test]
    fn test_normalize_keeps_existing_scheme() {
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com"), "https://example.com");
        assert_eq!(normalize_url("ftp://files.example.com"), "ftp://files.example.com");
        assert_eq!(normalize_url("mailto:me@example.com"), "mailto:me@example.com");
    }

    #[test]
    fn test_normalize_host_and_port() {
        assert_eq!(normalize_url("localhost:8080"), "https://localhost:8080");
        assert_eq!(
            normalize_url("example.com:443/login"),
            "https://example.com:443/login"
        );
    }

    #[test]
    fn test_validate_trims_fields() {
        let new = NewLink::new("  Rust  ", " rust-lang.org ")
            .category(" Dev ")
            .notes("  The book  ")
            .validate()
            .unwrap();
        assert_eq!(new.title, "Rust");
        assert_eq!(new.url, "https://rust-lang.org");
        assert_eq!(new.category, "Dev");
        assert_eq!(new.notes, "The book");
    }

    #[test]
    fn test_validate_rejects_blank_title() {
        let err = NewLink::new("   ", "example.com").validate().unwrap_err();
        assert!(matches!(err, LinkHubError::Validation { field: "title" }));
    }

    #[test]
    fn test_validate_rejects_blank_url() {
        let err = NewLink::new("Example", "").validate().unwrap_err();
        assert!(matches!(err, LinkHubError::Validation { field: "url" }));
    }

    #[test]
    fn test_seed_links() {
        let now = Utc::now();
        let seed = seed_links(now);
        assert_eq!(seed.len(), 3);
        assert_eq!(seed.iter().map(|l| l.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(seed[1].title, "GitHub");
        assert_eq!(seed[1].category, "Dev");
        assert!(seed.iter().all(|l| l.created == now));
    }

    #[test]
    fn test_link_reads_document_without_optional_fields() {
        let json = r#"{"id": 7, "title": "Docs", "url": "https://docs.rs",
                       "created": "2025-03-01T10:20:30.123456Z"}"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert_eq!(link.id, 7);
        assert!(link.notes.is_empty());
        assert!(!link.has_category());
    }

    #[test]
    fn test_link_serialized_field_names() {
        let link = Link::from_new(1, NewLink::new("A", "https://a.example"), Utc::now());
        let value = serde_json::to_value(&link).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["category", "created", "id", "notes", "title", "url"]);
    }
}
