//! Search and category filters
//!
//! Pure functions over a snapshot returned by `Store::list`. Both filters
//! are case-insensitive and treat an empty argument as "no filter".

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::Link;

/// Keep links whose category equals `category`, ignoring case
pub fn filter_by_category(links: Vec<Link>, category: &str) -> Vec<Link> {
    let category = category.trim();
    if category.is_empty() {
        return links;
    }

    let wanted = category.to_lowercase();
    links
        .into_iter()
        .filter(|link| link.category.to_lowercase() == wanted)
        .collect()
}

/// Keep links whose title, notes or URL contain `query`, ignoring case
pub fn filter_by_text(links: Vec<Link>, query: &str) -> Vec<Link> {
    let query = query.trim();
    if query.is_empty() {
        return links;
    }

    let needle = query.to_lowercase();
    links
        .into_iter()
        .filter(|link| {
            link.title.to_lowercase().contains(&needle)
                || link.notes.to_lowercase().contains(&needle)
                || link.url.to_lowercase().contains(&needle)
        })
        .collect()
}

/// All non-empty categories, sorted
pub fn distinct_categories(links: &[Link]) -> BTreeSet<String> {
    links
        .iter()
        .filter(|link| link.has_category())
        .map(|link| link.category.clone())
        .collect()
}

/// A combined text and category filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkQuery {
    /// Free-text search over title, notes and URL
    #[serde(default, rename = "q")]
    pub text: String,
    /// Exact category, ignoring case
    #[serde(default)]
    pub category: String,
}

impl LinkQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Apply both filters (AND)
    pub fn apply(&self, links: Vec<Link>) -> Vec<Link> {
        filter_by_text(filter_by_category(links, &self.category), &self.text)
    }
}
