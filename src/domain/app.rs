use crate::ports::outbound::deck_store::DeckStore;
use crate::ports::outbound::metadata_fetcher::MetadataFetcher;

pub struct App<DS, MF> {
    pub deck_store: DS,
    pub metadata_fetcher: MF,
}

impl<DS, MF> App<DS, MF>
where
    DS: DeckStore + Send + Sync,
    MF: MetadataFetcher + Send + Sync,
{
    pub fn new(deck_store: DS, metadata_fetcher: MF) -> Self {
        Self {
            deck_store,
            metadata_fetcher,
        }
    }
}
