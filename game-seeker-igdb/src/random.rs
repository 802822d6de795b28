use rand::Rng;

use crate::client::IgdbClient;
use crate::error::IgdbError;
use crate::lookup::LookupTables;
use crate::search::build_enriched;
use crate::types::EnrichedGame;

/// Field list for the single-record random fetch; includes the slug so the
/// public IGDB page link can be built.
const RANDOM_FIELDS: &str =
    "name, first_release_date, rating, genres, storyline, summary, platforms, cover, slug, id";

/// One uniformly-selected game, display-ready.
#[derive(Debug, Clone)]
pub struct RandomGame {
    pub game: EnrichedGame,
    /// Public IGDB page, when the record has a slug.
    pub url: Option<String>,
}

/// Fetch one uniformly-selected record from the whole games collection.
///
/// Asks for the total count, draws a uniform offset in `[0, N-1]`, and
/// issues a single limit-1 request at that offset. The count can change
/// between the two calls; if the drawn offset has fallen off the end the
/// fetch comes back empty and is reported as an upstream error.
pub async fn fetch_random(
    client: &IgdbClient,
    tables: &LookupTables,
) -> Result<RandomGame, IgdbError> {
    let total = client.games_count().await?;
    let offset = draw_offset(total)?;
    let body = format!("fields {RANDOM_FIELDS}; limit 1; offset {offset};");
    let page = client.games(&body).await?;

    let record = page.into_iter().next().ok_or_else(|| IgdbError::Upstream {
        status: 200,
        body: format!("empty page at offset {offset}; the count may have changed"),
    })?;

    let url = record.game_url();
    let cover_url = client.resolve_cover(record.cover).await;
    let game = build_enriched(&record, tables, cover_url);

    Ok(RandomGame { game, url })
}

/// Draw a uniform offset into a collection of `total` records. A count of
/// zero is the explicit "empty database" condition; no page request is
/// issued for it.
fn draw_offset(total: u64) -> Result<u64, IgdbError> {
    if total == 0 {
        return Err(IgdbError::EmptyDatabase);
    }
    Ok(rand::thread_rng().gen_range(0..total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_empty_database() {
        assert!(matches!(draw_offset(0), Err(IgdbError::EmptyDatabase)));
    }

    #[test]
    fn offset_is_always_in_range() {
        for _ in 0..1000 {
            let offset = draw_offset(7).unwrap();
            assert!(offset < 7);
        }
        assert_eq!(draw_offset(1).unwrap(), 0);
    }
}
