use std::collections::HashMap;

use crate::client::IgdbClient;
use crate::error::IgdbError;
use crate::types::NamedEntry;

/// Placeholder for fields the API did not populate.
pub const NOT_AVAILABLE: &str = "Not Available";

/// Immutable id-to-name mapping for one reference resource.
///
/// Built once at startup and read for the process lifetime; never refreshed
/// mid-session. Ids absent from the table resolve to a synthesized
/// "Unknown <Kind> <id>" string on purpose: IGDB records can reference
/// deprecated category ids the reference tables no longer list.
#[derive(Debug, Clone)]
pub struct LookupTable {
    kind: &'static str,
    entries: HashMap<u64, String>,
}

impl LookupTable {
    pub fn new(kind: &'static str, entries: HashMap<u64, String>) -> Self {
        Self { kind, entries }
    }

    /// Fetch the full reference table for a resource and build the mapping.
    /// The datasets are small and bounded, so a single full page suffices.
    pub async fn fetch(
        client: &IgdbClient,
        kind: &'static str,
        resource: &str,
    ) -> Result<Self, IgdbError> {
        let rows: Vec<NamedEntry> = client.query(resource, "fields id, name; limit 500;").await?;
        let entries = rows.into_iter().map(|row| (row.id, row.name)).collect();
        Ok(Self { kind, entries })
    }

    /// Display name for an id, never failing.
    pub fn name_of(&self, id: u64) -> String {
        self.entries
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Unknown {} {}", self.kind, id))
    }

    /// Display names for an id list; an empty list maps to the
    /// "Not Available" placeholder.
    pub fn names_of(&self, ids: &[u64]) -> Vec<String> {
        if ids.is_empty() {
            return vec![NOT_AVAILABLE.to_string()];
        }
        ids.iter().map(|&id| self.name_of(id)).collect()
    }

    /// Comma-joined display names, the form shown in the UI and export.
    pub fn joined_names(&self, ids: &[u64]) -> String {
        self.names_of(ids).join(", ")
    }

    /// Map display names back to ids, case-insensitively. Names that match
    /// nothing in the table are returned separately so the caller can
    /// report them.
    pub fn ids_for_names(&self, names: &[String]) -> (Vec<u64>, Vec<String>) {
        let mut ids = Vec::new();
        let mut unknown = Vec::new();
        for name in names {
            match self
                .entries
                .iter()
                .find(|(_, n)| n.eq_ignore_ascii_case(name))
            {
                Some((&id, _)) => ids.push(id),
                None => unknown.push(name.clone()),
            }
        }
        (ids, unknown)
    }

    /// All names in the table, sorted for display.
    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.values().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The genre and platform tables, fetched together at startup.
#[derive(Debug, Clone)]
pub struct LookupTables {
    pub genres: LookupTable,
    pub platforms: LookupTable,
}

impl LookupTables {
    pub async fn fetch(client: &IgdbClient) -> Result<Self, IgdbError> {
        let genres = LookupTable::fetch(client, "Genre", "genres").await?;
        let platforms = LookupTable::fetch(client, "Platform", "platforms").await?;
        Ok(Self { genres, platforms })
    }
}

/// Format a Unix release timestamp as `dd-mm-yyyy` (UTC), or the
/// "Not Available" placeholder when absent.
pub fn format_release_date(timestamp: Option<i64>) -> String {
    match timestamp.and_then(|ts| chrono::DateTime::from_timestamp(ts, 0)) {
        Some(dt) => dt.format("%d-%m-%Y").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre_table() -> LookupTable {
        let entries = HashMap::from([
            (12, "Role-playing (RPG)".to_string()),
            (31, "Adventure".to_string()),
            (5, "Shooter".to_string()),
        ]);
        LookupTable::new("Genre", entries)
    }

    #[test]
    fn known_id_resolves_to_name() {
        assert_eq!(genre_table().name_of(31), "Adventure");
    }

    #[test]
    fn unknown_id_synthesizes_placeholder() {
        assert_eq!(genre_table().name_of(999), "Unknown Genre 999");
    }

    #[test]
    fn empty_id_list_is_not_available() {
        assert_eq!(genre_table().names_of(&[]), vec![NOT_AVAILABLE]);
    }

    #[test]
    fn joined_names_are_comma_separated() {
        assert_eq!(
            genre_table().joined_names(&[5, 12, 777]),
            "Shooter, Role-playing (RPG), Unknown Genre 777"
        );
    }

    #[test]
    fn ids_for_names_is_case_insensitive() {
        let (ids, unknown) =
            genre_table().ids_for_names(&["adventure".to_string(), "Puzzle".to_string()]);
        assert_eq!(ids, vec![31]);
        assert_eq!(unknown, vec!["Puzzle"]);
    }

    #[test]
    fn release_date_formats_as_day_month_year() {
        // 1996-06-23, the N64 launch
        assert_eq!(format_release_date(Some(835488000)), "23-06-1996");
        assert_eq!(format_release_date(None), NOT_AVAILABLE);
    }
}
