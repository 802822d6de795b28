use serde::{Deserialize, Serialize};

/// A raw game record as returned by the `/games` resource.
///
/// IGDB omits absent fields entirely, so everything beyond the id is
/// optional or defaulted. Genre and platform lists carry numeric foreign
/// keys into the reference tables fetched at startup.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameRecord {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_release_date: Option<i64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub genres: Vec<u64>,
    #[serde(default)]
    pub platforms: Vec<u64>,
    #[serde(default)]
    pub storyline: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub cover: Option<u64>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl GameRecord {
    /// Public IGDB page for this game, if it has a slug.
    pub fn game_url(&self) -> Option<String> {
        self.slug
            .as_ref()
            .map(|slug| format!("https://www.igdb.com/games/{slug}"))
    }
}

/// Display-ready projection of a [`GameRecord`], the unit appended to the
/// exportable result collection. Serializes in the fixed export column order.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct EnrichedGame {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Release Date")]
    pub release_date: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Genres")]
    pub genres: String,
    #[serde(rename = "Storyline")]
    pub storyline: String,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Platforms")]
    pub platforms: String,
    #[serde(rename = "Cover URL")]
    pub cover_url: String,
}

/// One row of a reference table (`/genres`, `/platforms`).
#[derive(Debug, Deserialize, Clone)]
pub struct NamedEntry {
    pub id: u64,
    pub name: String,
}

/// Row from the `/covers` resource.
#[derive(Debug, Deserialize)]
pub struct CoverRecord {
    #[serde(default)]
    pub image_id: Option<String>,
}

/// Response of the `/games/count` endpoint.
#[derive(Debug, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Response of the Twitch OAuth token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Error body the token endpoint returns on rejected credentials.
#[derive(Debug, Deserialize)]
pub struct TokenErrorResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_record_deserializes_with_missing_fields() {
        let record: GameRecord = serde_json::from_str(r#"{"id": 1074}"#).unwrap();
        assert_eq!(record.id, 1074);
        assert!(record.name.is_none());
        assert!(record.genres.is_empty());
        assert!(record.cover.is_none());
    }

    #[test]
    fn game_url_requires_slug() {
        let with_slug: GameRecord =
            serde_json::from_str(r#"{"id": 1074, "slug": "super-mario-64"}"#).unwrap();
        assert_eq!(
            with_slug.game_url().as_deref(),
            Some("https://www.igdb.com/games/super-mario-64")
        );

        let without: GameRecord = serde_json::from_str(r#"{"id": 2}"#).unwrap();
        assert!(without.game_url().is_none());
    }
}
