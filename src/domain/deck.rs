/// One known archetype from the deck catalog. Snapshot data: fetched once
/// per import run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckCatalogEntry {
    pub id: i32,
    pub name: String,
}

impl DeckCatalogEntry {
    #[must_use]
    pub fn new(id: i32, name: String) -> Self {
        Self { id, name }
    }
}
