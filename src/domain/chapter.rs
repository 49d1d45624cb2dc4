use crate::domain::deck::DeckCatalogEntry;
use crate::domain::utils::matcher;
use crate::domain::utils::{normalise, REGEX_COLLECTION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterKind {
    Guide,
    Matchup,
}

impl ChapterKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guide => "guide",
            Self::Matchup => "matchup",
        }
    }
}

/// A description line that starts with a timestamp token. Everything else in
/// a video description is not a chapter and gets dropped before this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChapterLine {
    pub timestamp: String,
    pub text: String,
}

impl RawChapterLine {
    /// Descriptions are free-form text, so timestamp-less lines (links,
    /// sponsor blurbs) are expected and dropped without complaint.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let timestamp = REGEX_COLLECTION.timestamp.find(line)?;
        let text = line[timestamp.end()..].trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            timestamp: timestamp.as_str().to_string(),
            text: text.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub timestamp: String,
    pub title: String,
    pub kind: ChapterKind,
    pub opponent_name_text: Option<String>,
}

impl ClassifiedLine {
    /// Decides Guide vs Matchup and, for matchups, derives the opponent name
    /// by stripping the "Game N: vs" prefix and "deck"/"game" style suffixes.
    /// The title always stays the chapter text as written.
    #[must_use]
    pub fn classify(line: RawChapterLine) -> Self {
        let RawChapterLine { timestamp, text } = line;

        if !REGEX_COLLECTION.matchup_marker.is_match(&text) {
            return Self {
                timestamp,
                title: text,
                kind: ChapterKind::Guide,
                opponent_name_text: None,
            };
        }

        let stripped = REGEX_COLLECTION.matchup_prefix.replace(&text, "");
        let stripped = REGEX_COLLECTION.matchup_suffix.replace(&stripped, "");
        let opponent = stripped.trim().to_string();

        Self {
            timestamp,
            title: text,
            kind: ChapterKind::Matchup,
            opponent_name_text: (!opponent.is_empty()).then_some(opponent),
        }
    }
}

/// Persisted chapter record. `opposing_deck_id` is only ever set on a
/// Matchup chapter whose opponent matched the catalog at or above the
/// confidence threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedChapter {
    pub timestamp: String,
    pub title: String,
    pub kind: ChapterKind,
    pub opposing_deck_id: Option<i32>,
}

impl ClassifiedChapter {
    #[must_use]
    pub fn from_line(line: ClassifiedLine, catalog: &[DeckCatalogEntry]) -> Self {
        let opposing_deck_id = match (line.kind, &line.opponent_name_text) {
            (ChapterKind::Matchup, Some(opponent)) => {
                // Chapter text is matched on its canonical form; the raw
                // text only survives as the display title.
                matcher::match_opponent_deck(&normalise(opponent), catalog)
                    .map(|candidate| candidate.deck_id)
            }
            _ => None,
        };

        Self {
            timestamp: line.timestamp,
            title: line.title,
            kind: line.kind,
            opposing_deck_id,
        }
    }
}

/// Runs the whole pipeline over a video description: parse each line, keep
/// the chapters, classify them, and resolve matchup opponents against the
/// catalog snapshot.
#[must_use]
pub fn classify_description(
    description: &str,
    catalog: &[DeckCatalogEntry],
) -> Vec<ClassifiedChapter> {
    description
        .lines()
        .filter_map(RawChapterLine::parse)
        .map(ClassifiedLine::classify)
        .map(|line| ClassifiedChapter::from_line(line, catalog))
        .collect()
}
