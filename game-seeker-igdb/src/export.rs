use std::path::{Path, PathBuf};

use crate::error::IgdbError;
use crate::types::EnrichedGame;

/// Write the accumulated result collection to a CSV file, one row per game
/// in the fixed column order (Name, Release Date, Rating, Genres,
/// Storyline, Summary, Platforms, Cover URL).
///
/// An empty collection is an error; a write failure leaves the in-memory
/// collection untouched. Returns the path written.
pub fn export_csv(path: &Path, games: &[EnrichedGame]) -> Result<PathBuf, IgdbError> {
    if games.is_empty() {
        return Err(IgdbError::NoData);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for game in games {
        writer.serialize(game)?;
    }
    writer.flush()?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str) -> EnrichedGame {
        EnrichedGame {
            name: name.to_string(),
            release_date: "23-06-1996".to_string(),
            rating: "92.5".to_string(),
            genres: "Platform".to_string(),
            storyline: "Not Available".to_string(),
            summary: "A summary, with a comma".to_string(),
            platforms: "Nintendo 64".to_string(),
            cover_url: "No cover available".to_string(),
        }
    }

    #[test]
    fn empty_collection_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        assert!(matches!(export_csv(&path, &[]), Err(IgdbError::NoData)));
        assert!(!path.exists());
    }

    #[test]
    fn writes_header_in_fixed_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.csv");
        export_csv(&path, &[row("Super Mario 64")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(
            header,
            "Name,Release Date,Rating,Genres,Storyline,Summary,Platforms,Cover URL"
        );
        assert!(content.contains("Super Mario 64"));
        // The comma-bearing field round-trips quoted
        assert!(content.contains("\"A summary, with a comma\""));
    }

    #[test]
    fn writes_one_row_per_game() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.csv");
        export_csv(&path, &[row("A"), row("B"), row("C")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4); // header + 3 rows
    }
}
