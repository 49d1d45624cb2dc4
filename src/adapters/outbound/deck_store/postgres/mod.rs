mod queries;

use crate::adapters::outbound::deck_store::postgres::queries::{
    DECK_CATALOG, INSERT_CHAPTER, INSERT_RESOURCE, RESOURCE_EXISTS,
};
use crate::domain::chapter::ClassifiedChapter;
use crate::domain::deck::DeckCatalogEntry;
use crate::domain::resource::NewResource;
use crate::ports::outbound::deck_store::{DeckStore, StoreError};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Pool, Row};
use std::env;

pub struct Postgres {
    pool: Pool<sqlx::Postgres>,
}

impl Postgres {
    pub async fn create() -> Self {
        let uri = env::var("PSQL_URI").expect("Postgres uri wasn't in env vars");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&uri)
            .await
            .expect("Failed Postgres connection");

        Self { pool }
    }
}

#[async_trait]
impl DeckStore for Postgres {
    async fn deck_catalog(&self) -> Result<Vec<DeckCatalogEntry>, StoreError> {
        match sqlx::query(DECK_CATALOG).fetch_all(&self.pool).await {
            Err(why) => {
                log::warn!("Failed deck catalog fetch - {why}");
                Err(StoreError::new(why.to_string()))
            }
            Ok(rows) => Ok(rows.iter().map(DeckCatalogEntry::from).collect()),
        }
    }

    async fn resource_exists(&self, url: &str) -> Result<bool, StoreError> {
        match sqlx::query(RESOURCE_EXISTS)
            .bind(url)
            .fetch_one(&self.pool)
            .await
        {
            Err(why) => {
                log::warn!("Failed resource dedup check - {why}");
                Err(StoreError::new(why.to_string()))
            }
            Ok(row) => Ok(row.get::<bool, &str>("already_imported")),
        }
    }

    async fn insert_resource(&self, resource: &NewResource) -> Result<i32, StoreError> {
        match sqlx::query(INSERT_RESOURCE)
            .bind(&resource.url)
            .bind(&resource.title)
            .bind(&resource.author_name)
            .bind(resource.deck_id)
            .bind(&resource.decklist_url)
            .bind(resource.published_at)
            .bind(resource.status.as_str())
            .fetch_one(&self.pool)
            .await
        {
            Err(why) => {
                log::warn!("Failed resource insert - {why}");
                Err(StoreError::new(why.to_string()))
            }
            Ok(row) => Ok(row.get::<i32, &str>("id")),
        }
    }

    async fn insert_chapters(
        &self,
        resource_id: i32,
        chapters: &[ClassifiedChapter],
    ) -> Result<(), StoreError> {
        for chapter in chapters {
            if let Err(why) = sqlx::query(INSERT_CHAPTER)
                .bind(resource_id)
                .bind(&chapter.timestamp)
                .bind(&chapter.title)
                .bind(chapter.kind.as_str())
                .bind(chapter.opposing_deck_id)
                .execute(&self.pool)
                .await
            {
                log::warn!("Failed chapter insert for resource {resource_id} - {why}");
                return Err(StoreError::new(why.to_string()));
            }
        }

        Ok(())
    }
}

impl DeckCatalogEntry {
    fn from(row: &PgRow) -> Self {
        Self {
            id: row.get::<i32, &str>("id"),
            name: row.get::<String, &str>("name"),
        }
    }
}
