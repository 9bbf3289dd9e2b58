// Docker image models

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSnapshot {
    /// Short id (12 chars, `sha256:` prefix stripped).
    pub id: String,
    /// `repository:tag` strings; empty for dangling images.
    pub tags: Vec<String>,
    pub size_bytes: u64,
    pub created: Option<DateTime<Utc>>,
}

impl ImageSnapshot {
    /// Case-insensitive substring match on any tag or the id.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || self.id.to_lowercase().contains(needle)
    }

    /// First tag, or `<none>` for untagged images.
    pub fn display_tag(&self) -> &str {
        self.tags.first().map(String::as_str).unwrap_or("<none>")
    }
}
