use crate::domain::app::App;
use crate::domain::chapter::{classify_description, ChapterKind};
use crate::domain::resource::{extract_decklist_url, NewResource, ResourceStatus};
use crate::domain::utils::matcher;
use crate::ports::outbound::deck_store::{DeckStore, StoreError};
use crate::ports::outbound::metadata_fetcher::{FetchError, MetadataFetcher};
use thiserror::Error;
use time::macros::date;
use time::Date;

/// Videos published before the current format rotation describe decks that
/// no longer exist in that shape; they are rejected outright.
pub const FORMAT_CUTOFF: Date = date!(2023 - 03 - 31);

#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Duplicate,
    OutdatedFormat,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported {
        resource_id: i32,
        status: ResourceStatus,
        deck_id: Option<i32>,
        chapter_count: usize,
    },
    Skipped(SkipReason),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl<DS, MF> App<DS, MF>
where
    DS: DeckStore + Send + Sync,
    MF: MetadataFetcher + Send + Sync,
{
    /// Imports one video URL: duplicate and format-cutoff gates, then the
    /// classify/match pipeline, then persistence. A resource is approved
    /// without review when a deck was auto-detected from the title or it
    /// carries usable matchup chapters or a decklist link.
    pub async fn import_url(&self, url: &str) -> Result<ImportOutcome, ImportError> {
        if self.deck_store.resource_exists(url).await? {
            log::info!("Skipping {url} - already imported");
            return Ok(ImportOutcome::Skipped(SkipReason::Duplicate));
        }

        let metadata = self.metadata_fetcher.fetch(url).await?;
        if let Some(published) = metadata.published_at {
            if published < FORMAT_CUTOFF {
                log::info!("Skipping {url} - published {published} predates the format cutoff");
                return Ok(ImportOutcome::Skipped(SkipReason::OutdatedFormat));
            }
        }

        let catalog = self.deck_store.deck_catalog().await?;
        let chapters = classify_description(&metadata.description, &catalog);
        let deck_id =
            matcher::match_opponent_deck(&metadata.title, &catalog).map(|candidate| candidate.deck_id);
        let decklist_url = extract_decklist_url(&metadata.description);

        let has_matchups = chapters
            .iter()
            .any(|chapter| chapter.kind == ChapterKind::Matchup);
        let status = if deck_id.is_some() || has_matchups || decklist_url.is_some() {
            ResourceStatus::Approved
        } else {
            ResourceStatus::Pending
        };

        let resource = NewResource {
            url: url.to_string(),
            title: metadata.title,
            author_name: metadata.author_name,
            deck_id,
            decklist_url,
            published_at: metadata.published_at,
            status,
        };

        let resource_id = self.deck_store.insert_resource(&resource).await?;
        self.deck_store
            .insert_chapters(resource_id, &chapters)
            .await?;

        log::info!(
            "Imported {url} as resource {resource_id} ({}, {} chapters)",
            status.as_str(),
            chapters.len()
        );

        Ok(ImportOutcome::Imported {
            resource_id,
            status,
            deck_id,
            chapter_count: chapters.len(),
        })
    }

    /// Imports a batch of URLs. One bad URL never aborts the run; failures
    /// are logged and tallied instead.
    pub async fn import_urls(&self, urls: &[String]) -> ImportReport {
        let mut report = ImportReport::default();
        for url in urls {
            match self.import_url(url).await {
                Ok(ImportOutcome::Imported { .. }) => report.imported += 1,
                Ok(ImportOutcome::Skipped(_)) => report.skipped += 1,
                Err(why) => {
                    log::warn!("Failed to import {url} - {why}");
                    report.failed += 1;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::resource::VideoMetadata;
    use crate::ports::outbound::deck_store::MockDeckStore;
    use crate::ports::outbound::metadata_fetcher::MockMetadataFetcher;
    use crate::domain::deck::DeckCatalogEntry;

    fn metadata(title: &str, description: &str, published_at: Option<Date>) -> VideoMetadata {
        VideoMetadata {
            title: title.to_string(),
            author_name: String::from("SomeCaster"),
            description: description.to_string(),
            published_at,
        }
    }

    fn catalog() -> Vec<DeckCatalogEntry> {
        vec![
            DeckCatalogEntry::new(7, String::from("Mega Lucario ex")),
            DeckCatalogEntry::new(11, String::from("Gardevoir ex")),
        ]
    }

    #[tokio::test]
    async fn test_duplicate_url_skips_without_fetching() {
        let mut store = MockDeckStore::new();
        store
            .expect_resource_exists()
            .withf(|url| url == "https://youtu.be/abc")
            .times(1)
            .returning(|_| Ok(true));

        let mut fetcher = MockMetadataFetcher::new();
        fetcher.expect_fetch().times(0);

        let app = App::new(store, fetcher);
        let outcome = app.import_url("https://youtu.be/abc").await.unwrap();

        assert_eq!(outcome, ImportOutcome::Skipped(SkipReason::Duplicate));
    }

    #[tokio::test]
    async fn test_pre_cutoff_video_skipped() {
        let mut store = MockDeckStore::new();
        store.expect_resource_exists().returning(|_| Ok(false));
        store.expect_deck_catalog().times(0);
        store.expect_insert_resource().times(0);

        let mut fetcher = MockMetadataFetcher::new();
        fetcher.expect_fetch().returning(|_| {
            Ok(metadata(
                "Old format deck profile",
                "",
                Some(date!(2022 - 06 - 01)),
            ))
        });

        let app = App::new(store, fetcher);
        let outcome = app.import_url("https://youtu.be/old").await.unwrap();

        assert_eq!(outcome, ImportOutcome::Skipped(SkipReason::OutdatedFormat));
    }

    #[tokio::test]
    async fn test_title_match_imports_as_approved() {
        let mut store = MockDeckStore::new();
        store.expect_resource_exists().returning(|_| Ok(false));
        store.expect_deck_catalog().returning(|| Ok(catalog()));
        store
            .expect_insert_resource()
            .withf(|resource| {
                resource.status == ResourceStatus::Approved
                    && resource.deck_id == Some(11)
                    && resource.decklist_url.is_none()
            })
            .times(1)
            .returning(|_| Ok(42));
        store
            .expect_insert_chapters()
            .withf(|resource_id, chapters| *resource_id == 42 && chapters.is_empty())
            .times(1)
            .returning(|_, _| Ok(()));

        let mut fetcher = MockMetadataFetcher::new();
        fetcher.expect_fetch().returning(|_| {
            Ok(metadata(
                "Gardevoir ex is BACK!",
                "no chapters here",
                Some(date!(2025 - 02 - 14)),
            ))
        });

        let app = App::new(store, fetcher);
        let outcome = app.import_url("https://youtu.be/gard").await.unwrap();

        assert_eq!(
            outcome,
            ImportOutcome::Imported {
                resource_id: 42,
                status: ResourceStatus::Approved,
                deck_id: Some(11),
                chapter_count: 0,
            }
        );
    }

    #[tokio::test]
    async fn test_matchup_chapters_approve_without_title_match() {
        let mut store = MockDeckStore::new();
        store.expect_resource_exists().returning(|_| Ok(false));
        store.expect_deck_catalog().returning(|| Ok(catalog()));
        store
            .expect_insert_resource()
            .withf(|resource| {
                resource.status == ResourceStatus::Approved && resource.deck_id.is_none()
            })
            .times(1)
            .returning(|_| Ok(7));
        store
            .expect_insert_chapters()
            .withf(|_, chapters| {
                chapters.len() == 2 && chapters[1].opposing_deck_id == Some(7)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut fetcher = MockMetadataFetcher::new();
        fetcher.expect_fetch().returning(|_| {
            Ok(metadata(
                "Tournament top 8 run!",
                "0:00 Intro\n3:45 Game 2: vs Mega Lucario ex deck",
                Some(date!(2025 - 02 - 14)),
            ))
        });

        let app = App::new(store, fetcher);
        let outcome = app.import_url("https://youtu.be/top8").await.unwrap();

        assert!(matches!(
            outcome,
            ImportOutcome::Imported {
                status: ResourceStatus::Approved,
                deck_id: None,
                chapter_count: 2,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_nothing_detected_imports_as_pending() {
        let mut store = MockDeckStore::new();
        store.expect_resource_exists().returning(|_| Ok(false));
        store.expect_deck_catalog().returning(|| Ok(catalog()));
        store
            .expect_insert_resource()
            .withf(|resource| resource.status == ResourceStatus::Pending)
            .times(1)
            .returning(|_| Ok(9));
        store
            .expect_insert_chapters()
            .returning(|_, _| Ok(()));

        let mut fetcher = MockMetadataFetcher::new();
        fetcher.expect_fetch().returning(|_| {
            Ok(metadata(
                "Road trip vlog",
                "just vibes",
                Some(date!(2025 - 01 - 01)),
            ))
        });

        let app = App::new(store, fetcher);
        let outcome = app.import_url("https://youtu.be/vlog").await.unwrap();

        assert!(matches!(
            outcome,
            ImportOutcome::Imported {
                status: ResourceStatus::Pending,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_decklist_link_approves() {
        let mut store = MockDeckStore::new();
        store.expect_resource_exists().returning(|_| Ok(false));
        store.expect_deck_catalog().returning(|| Ok(catalog()));
        store
            .expect_insert_resource()
            .withf(|resource| {
                resource.status == ResourceStatus::Approved
                    && resource.decklist_url.as_deref()
                        == Some("https://limitlesstcg.com/decks/list/555")
            })
            .times(1)
            .returning(|_| Ok(3));
        store.expect_insert_chapters().returning(|_, _| Ok(()));

        let mut fetcher = MockMetadataFetcher::new();
        fetcher.expect_fetch().returning(|_| {
            Ok(metadata(
                "Rogue brew showcase",
                "Decklist: https://limitlesstcg.com/decks/list/555",
                None,
            ))
        });

        let app = App::new(store, fetcher);
        let outcome = app.import_url("https://youtu.be/rogue").await.unwrap();

        assert!(matches!(
            outcome,
            ImportOutcome::Imported {
                status: ResourceStatus::Approved,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_import_urls_keeps_going_past_failures() {
        let mut store = MockDeckStore::new();
        store
            .expect_resource_exists()
            .returning(|url| Ok(url == "https://youtu.be/dupe"));
        store.expect_deck_catalog().returning(|| Ok(catalog()));
        store.expect_insert_resource().returning(|_| Ok(1));
        store.expect_insert_chapters().returning(|_, _| Ok(()));

        let mut fetcher = MockMetadataFetcher::new();
        fetcher.expect_fetch().returning(|url| {
            if url == "https://youtu.be/dead" {
                Err(FetchError::MissingField("description"))
            } else {
                Ok(metadata("Gardevoir ex guide", "", None))
            }
        });

        let app = App::new(store, fetcher);
        let urls = vec![
            String::from("https://youtu.be/dupe"),
            String::from("https://youtu.be/dead"),
            String::from("https://youtu.be/fine"),
        ];
        let report = app.import_urls(&urls).await;

        assert_eq!(
            report,
            ImportReport {
                imported: 1,
                skipped: 1,
                failed: 1,
            }
        );
    }
}
