use std::collections::HashSet;

use crate::domain::deck::DeckCatalogEntry;
use crate::domain::utils::normalise;

/// Minimum token score a candidate needs before it is trusted.
pub const MIN_CONFIDENCE: u32 = 50;

const EXACT_SCORE: u32 = 1000;
const NORMALISED_SCORE: u32 = 900;
const TOKEN_SCORE: u32 = 100;
const PREFIX_SCORE: u32 = 50;
const VALIDITY_BOOST: u32 = 50;

// Connectives in multi-Pokémon archetype names ("Raging Bolt and Ogerpon").
const STOPWORDS: [&str; 3] = ["and", "the", "of"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCandidate {
    pub deck_id: i32,
    pub score: u32,
}

/// Picks the catalog deck a free-text opponent name most likely refers to.
///
/// Archetypes are named after their headline Pokémon, often with a second
/// Pokémon attached and informally abbreviated, so the scorer leans on the
/// first two name tokens rather than edit distance. Deterministic for a
/// fixed catalog order; ties keep the first entry seen.
#[must_use]
pub fn match_opponent_deck(
    opponent_name: &str,
    catalog: &[DeckCatalogEntry],
) -> Option<MatchCandidate> {
    let opponent_lower = opponent_name.trim().to_lowercase();
    if opponent_lower.is_empty() {
        return None;
    }

    for entry in catalog {
        if entry.name.to_lowercase() == opponent_lower {
            return Some(MatchCandidate {
                deck_id: entry.id,
                score: EXACT_SCORE,
            });
        }
    }

    let opponent_norm = normalise(opponent_name);
    for entry in catalog {
        if normalise(&entry.name) == opponent_norm {
            return Some(MatchCandidate {
                deck_id: entry.id,
                score: NORMALISED_SCORE,
            });
        }
    }

    best_token_match(&opponent_norm, catalog).filter(|candidate| candidate.score >= MIN_CONFIDENCE)
}

fn best_token_match(opponent_norm: &str, catalog: &[DeckCatalogEntry]) -> Option<MatchCandidate> {
    let opponent_tokens = tokens(opponent_norm);
    if opponent_tokens.is_empty() {
        return None;
    }

    let known_tokens: HashSet<String> = catalog
        .iter()
        .flat_map(|entry| {
            let name = normalise(&entry.name);
            tokens(&name)
                .into_iter()
                .map(str::to_owned)
                .collect::<Vec<String>>()
        })
        .collect();

    let mut best: Option<MatchCandidate> = None;
    for entry in catalog {
        let deck_norm = normalise(&entry.name);
        let deck_tokens = tokens(&deck_norm);
        if deck_tokens.is_empty() {
            continue;
        }

        let mut score = 0;
        let mut matched = 0;
        for (position, opponent_token) in opponent_tokens.iter().take(2).enumerate() {
            // The primary Pokémon name is the stronger signal.
            let weight = if position == 0 { 2 } else { 1 };
            if deck_tokens.iter().any(|deck_token| deck_token == opponent_token) {
                score += TOKEN_SCORE * weight;
                matched += 1;
            } else if deck_tokens.iter().any(|deck_token| {
                deck_token.starts_with(opponent_token) || opponent_token.starts_with(deck_token)
            }) {
                score += PREFIX_SCORE * weight;
                matched += 1;
            }
        }

        // A second token no catalog deck uses is likely noise; don't let it
        // drag down a real single-Pokémon match.
        if matched == 1 && opponent_tokens.len() >= 2 && !known_tokens.contains(opponent_tokens[1])
        {
            score += VALIDITY_BOOST;
        }

        if score > best.map_or(0, |candidate| candidate.score) {
            best = Some(MatchCandidate {
                deck_id: entry.id,
                score,
            });
        }
    }

    best
}

fn tokens(name: &str) -> Vec<&str> {
    name.split_whitespace()
        .filter(|token| token.len() > 2 && !STOPWORDS.contains(token))
        .collect()
}
