use crate::domain::utils::REGEX_COLLECTION;
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    /// Enough was auto-detected for the resource to go live unreviewed.
    Approved,
    /// Needs a manual pass from an admin.
    Pending,
}

impl ResourceStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
        }
    }
}

/// What the metadata fetcher scrapes for a single video URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub author_name: String,
    pub description: String,
    pub published_at: Option<Date>,
}

/// A fully categorised resource, ready for the store. Chapters travel
/// separately because they reference the resource id the store hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResource {
    pub url: String,
    pub title: String,
    pub author_name: String,
    pub deck_id: Option<i32>,
    pub decklist_url: Option<String>,
    pub published_at: Option<Date>,
    pub status: ResourceStatus,
}

/// First URL on a description line that mentions a decklist. Creators link
/// plenty of other things (socials, sponsors), so the hint word gates which
/// line we take a URL from.
#[must_use]
pub fn extract_decklist_url(description: &str) -> Option<String> {
    description.lines().find_map(|line| {
        if !REGEX_COLLECTION.decklist_hint.is_match(line) {
            return None;
        }
        REGEX_COLLECTION
            .url
            .find(line)
            .map(|url| {
                url.as_str()
                    .trim_end_matches(|c| matches!(c, ')' | ']' | '.' | ','))
                    .to_string()
            })
    })
}
