use std::collections::HashSet;

use crate::error::IgdbError;
use crate::types::EnrichedGame;

/// Deduplication key for repeated searches: normalized title plus the
/// sorted set of selected genre display names. Distinct from per-record id
/// dedup, which lives in the session ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchKey {
    title: String,
    genres: Vec<String>,
}

impl SearchKey {
    pub fn new(title: &str, genre_names: &[String]) -> Self {
        let mut genres: Vec<String> = genre_names.to_vec();
        genres.sort_unstable();
        Self {
            title: title.trim().to_lowercase(),
            genres,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
    }
}

impl std::fmt::Display for SearchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.genres.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{} | {}", self.title, self.genres.join(","))
        }
    }
}

/// Mutable state of one interactive session: the record-id ledger, the
/// search history, and the accumulated exportable result collection.
///
/// The ledger and collection are append-only during a session; a record id,
/// once in the ledger, is never re-enriched or re-appended. Only an
/// explicit [`reset`](SearchSession::reset) clears them (the "back to the
/// start screen" boundary).
#[derive(Debug, Default)]
pub struct SearchSession {
    seen_ids: HashSet<u64>,
    searched_keys: Vec<SearchKey>,
    results: Vec<EnrichedGame>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a search key before any network call: the title must be
    /// non-empty and the key must not have been searched this session.
    pub fn validate_search(&self, key: &SearchKey) -> Result<(), IgdbError> {
        if key.is_empty() {
            return Err(IgdbError::EmptyTitle);
        }
        if self.searched_keys.contains(key) {
            return Err(IgdbError::DuplicateSearch(key.to_string()));
        }
        Ok(())
    }

    /// Record a completed search in the history, whether or not it
    /// produced results.
    pub fn record_search(&mut self, key: SearchKey) {
        if !self.searched_keys.contains(&key) {
            self.searched_keys.push(key);
        }
    }

    pub fn is_seen(&self, id: u64) -> bool {
        self.seen_ids.contains(&id)
    }

    /// Add an enriched record to the collection and its id to the ledger.
    /// Returns false (and appends nothing) if the id was already seen.
    pub fn add_result(&mut self, id: u64, game: EnrichedGame) -> bool {
        if !self.seen_ids.insert(id) {
            return false;
        }
        self.results.push(game);
        true
    }

    /// Number of unique games added so far.
    pub fn unique_count(&self) -> usize {
        self.seen_ids.len()
    }

    pub fn results(&self) -> &[EnrichedGame] {
        &self.results
    }

    /// Search history, most recent last.
    pub fn history(&self) -> impl Iterator<Item = &SearchKey> {
        self.searched_keys.iter()
    }

    /// Clear everything: the session boundary when the user returns to the
    /// start screen.
    pub fn reset(&mut self) {
        self.seen_ids.clear();
        self.searched_keys.clear();
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enriched(name: &str) -> EnrichedGame {
        EnrichedGame {
            name: name.to_string(),
            release_date: "Not Available".to_string(),
            rating: "Not Available".to_string(),
            genres: "Not Available".to_string(),
            storyline: "Not Available".to_string(),
            summary: "Not Available".to_string(),
            platforms: "Not Available".to_string(),
            cover_url: "No cover available".to_string(),
        }
    }

    #[test]
    fn key_normalizes_title_and_sorts_genres() {
        let a = SearchKey::new("  Mario ", &["Shooter".to_string(), "Adventure".to_string()]);
        let b = SearchKey::new("mario", &["Adventure".to_string(), "Shooter".to_string()]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "mario | Adventure,Shooter");
    }

    #[test]
    fn key_without_genres_displays_title_only() {
        let key = SearchKey::new("Zelda", &[]);
        assert_eq!(key.to_string(), "zelda");
    }

    #[test]
    fn empty_title_is_rejected() {
        let session = SearchSession::new();
        let key = SearchKey::new("   ", &[]);
        assert!(matches!(
            session.validate_search(&key),
            Err(IgdbError::EmptyTitle)
        ));
    }

    #[test]
    fn duplicate_search_is_rejected_locally() {
        let mut session = SearchSession::new();
        let key = SearchKey::new("mario", &["Platform".to_string()]);
        session.validate_search(&key).unwrap();
        session.record_search(key.clone());
        assert!(matches!(
            session.validate_search(&key),
            Err(IgdbError::DuplicateSearch(_))
        ));
    }

    #[test]
    fn ledger_never_double_appends() {
        let mut session = SearchSession::new();
        assert!(session.add_result(7, enriched("First")));
        assert!(!session.add_result(7, enriched("Again")));
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.unique_count(), 1);
    }

    #[test]
    fn reset_clears_ledger_history_and_results() {
        let mut session = SearchSession::new();
        session.add_result(1, enriched("A"));
        session.record_search(SearchKey::new("a", &[]));
        session.reset();
        assert_eq!(session.unique_count(), 0);
        assert_eq!(session.results().len(), 0);
        assert!(session.history().next().is_none());
        // The same key is searchable again after a reset
        assert!(session.validate_search(&SearchKey::new("a", &[])).is_ok());
    }
}
