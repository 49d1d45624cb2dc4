use crate::domain::resource::VideoMetadata;
use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed - {0}")]
    Http(#[from] reqwest::Error),
    #[error("Could not find {0} in the video page")]
    MissingField(&'static str),
    #[error("Unparseable publish date - {0}")]
    InvalidDate(String),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait MetadataFetcher {
    async fn fetch(&self, url: &str) -> Result<VideoMetadata, FetchError>;
}
