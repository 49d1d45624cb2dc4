use crate::domain::chapter::ClassifiedChapter;
use crate::domain::deck::DeckCatalogEntry;
use crate::domain::resource::NewResource;
use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Error)]
#[error("Deck store failure - {0}")]
pub struct StoreError(String);

impl StoreError {
    #[must_use]
    pub fn new(msg: String) -> Self {
        Self(msg)
    }
}

/// Persistence boundary for the import pipeline. The catalog side is
/// read-only; resources and chapters are insert-only.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeckStore {
    async fn deck_catalog(&self) -> Result<Vec<DeckCatalogEntry>, StoreError>;
    async fn resource_exists(&self, url: &str) -> Result<bool, StoreError>;
    async fn insert_resource(&self, resource: &NewResource) -> Result<i32, StoreError>;
    async fn insert_chapters(
        &self,
        resource_id: i32,
        chapters: &[ClassifiedChapter],
    ) -> Result<(), StoreError>;
}
