use crate::domain::resource::VideoMetadata;
use crate::ports::outbound::metadata_fetcher::{FetchError, MetadataFetcher};
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use time::macros::format_description;
use time::Date;

const OEMBED_ENDPOINT: &str = "https://www.youtube.com/oembed";

// YouTube serves the full page only to something that looks like a browser.
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

const DESCRIPTION_RE: &str = r#""shortDescription":"((?:[^"\\]|\\.)*)""#;
const META_DATE_RE: &str = r#"itemprop="datePublished" content="(\d{4}-\d{2}-\d{2})"#;
const PLAYER_DATE_RE: &str = r#""publishDate":"(\d{4}-\d{2}-\d{2})"#;

static SCRAPE_REGEXES: LazyLock<ScrapeRegexes> = LazyLock::new(|| ScrapeRegexes {
    description: Regex::new(DESCRIPTION_RE).expect("Invalid regex"),
    meta_date: Regex::new(META_DATE_RE).expect("Invalid regex"),
    player_date: Regex::new(PLAYER_DATE_RE).expect("Invalid regex"),
});

struct ScrapeRegexes {
    description: Regex,
    meta_date: Regex,
    player_date: Regex,
}

#[derive(Deserialize)]
struct OEmbed {
    title: String,
    author_name: String,
}

pub struct YouTube {
    client: reqwest::Client,
}

impl YouTube {
    pub fn create() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed building the http client");

        Self { client }
    }
}

#[async_trait]
impl MetadataFetcher for YouTube {
    /// Title and author come from the oEmbed endpoint; the description and
    /// publish date only exist in the watch page itself, so those are
    /// scraped out of the embedded player JSON.
    async fn fetch(&self, url: &str) -> Result<VideoMetadata, FetchError> {
        let oembed: OEmbed = self
            .client
            .get(OEMBED_ENDPOINT)
            .query(&[("url", url), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let page = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let description = scrape_description(&page)
            .ok_or(FetchError::MissingField("shortDescription"))?;
        let published_at = scrape_publish_date(&page)?;

        log::info!(
            "Fetched metadata for {url} - '{}' by {}",
            oembed.title,
            oembed.author_name
        );

        Ok(VideoMetadata {
            title: oembed.title,
            author_name: oembed.author_name,
            description,
            published_at,
        })
    }
}

fn scrape_description(page: &str) -> Option<String> {
    let fragment = SCRAPE_REGEXES
        .description
        .captures(page)?
        .get(1)?
        .as_str()
        .to_string();

    Some(unescape_json_fragment(&fragment))
}

/// The date is optional upstream: pages served to unauthenticated clients
/// occasionally omit it, and the import gate treats that as "recent enough".
fn scrape_publish_date(page: &str) -> Result<Option<Date>, FetchError> {
    let raw = SCRAPE_REGEXES
        .meta_date
        .captures(page)
        .or_else(|| SCRAPE_REGEXES.player_date.captures(page))
        .and_then(|capture| capture.get(1))
        .map(|capture| capture.as_str());

    let Some(raw) = raw else {
        return Ok(None);
    };

    let format = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &format)
        .map(Some)
        .map_err(|_| FetchError::InvalidDate(raw.to_string()))
}

/// The captured description is still JSON-escaped; re-wrapping it in quotes
/// lets serde do the unescaping instead of hand-rolling it.
fn unescape_json_fragment(fragment: &str) -> String {
    serde_json::from_str(&format!("\"{fragment}\""))
        .unwrap_or_else(|_| fragment.replace("\\n", "\n"))
}
