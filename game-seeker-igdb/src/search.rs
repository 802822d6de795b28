use std::collections::HashSet;
use std::future::Future;

use tokio::sync::mpsc;

use crate::client::IgdbClient;
use crate::error::IgdbError;
use crate::lookup::{self, LookupTables, NOT_AVAILABLE};
use crate::session::{SearchKey, SearchSession};
use crate::types::{EnrichedGame, GameRecord};

/// Fixed page size for offset-based pagination against `/games`.
pub const PAGE_SIZE: usize = 500;

/// Field list requested for every search page.
pub const GAMES_FIELDS: &str =
    "name, first_release_date, rating, genres, storyline, summary, platforms, cover, id";

/// Progress events emitted during a search, consumed by the CLI.
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// One page request completed.
    PageFetched { offset: usize, count: usize },
    /// All pages collected.
    Aggregated { total: usize },
    /// Genre filter applied.
    Filtered { total: usize },
    /// A record was processed (kept or skipped); emitted for every record
    /// so the progress indicator advances deterministically. `index` is
    /// 1-based: the last event of a pass carries `index == total`.
    Processed {
        index: usize,
        total: usize,
        unique_total: usize,
    },
    /// A record passed the ledger and was appended to the collection.
    /// `index` is 1-based, the same position `Processed` reports.
    Added { index: usize, name: String },
    /// The dedup/enrich pass finished.
    Done { added: usize, skipped: usize },
}

/// Summary of one completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Records returned by the upstream search, before genre filtering.
    pub fetched: usize,
    /// Records remaining after the genre filter.
    pub matched: usize,
    /// Records newly appended to the session collection.
    pub added: usize,
    /// Records skipped because their id was already in the ledger.
    pub skipped: usize,
}

/// Walk offset-based pagination until a short page signals end-of-results,
/// concatenating all pages in upstream order.
///
/// A page of exactly `PAGE_SIZE` records is always followed by one more
/// request; that extra (possibly empty) page is the only way to detect a
/// total count that is an exact multiple of the page size. A failed page
/// request propagates its error instead of posing as end-of-results, so
/// callers can tell an outage from "nothing matched".
pub async fn fetch_all_pages<F, Fut>(
    mut fetch_page: F,
    events: &mpsc::UnboundedSender<SearchEvent>,
) -> Result<Vec<GameRecord>, IgdbError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<GameRecord>, IgdbError>>,
{
    let mut all = Vec::new();
    let mut offset = 0;

    loop {
        let page = fetch_page(offset).await?;
        let count = page.len();
        let _ = events.send(SearchEvent::PageFetched { offset, count });

        all.extend(page);
        if count < PAGE_SIZE {
            break;
        }
        offset += PAGE_SIZE;
    }

    let _ = events.send(SearchEvent::Aggregated { total: all.len() });
    Ok(all)
}

/// Keep only records whose genre-id list intersects the selected set.
/// An empty selection is a no-op: every record passes.
pub fn filter_by_genres(records: Vec<GameRecord>, selected: &HashSet<u64>) -> Vec<GameRecord> {
    if selected.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| record.genres.iter().any(|id| selected.contains(id)))
        .collect()
}

/// Build the display projection of a record from the lookup tables and a
/// resolved cover string.
pub fn build_enriched(record: &GameRecord, tables: &LookupTables, cover_url: String) -> EnrichedGame {
    EnrichedGame {
        name: record
            .name
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        release_date: lookup::format_release_date(record.first_release_date),
        rating: record
            .rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        genres: tables.genres.joined_names(&record.genres),
        storyline: record
            .storyline
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        summary: record
            .summary
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        platforms: tables.platforms.joined_names(&record.platforms),
        cover_url,
    }
}

/// Convert filtered records into exportable rows, enforcing the session
/// ledger. Ledger hits are skipped but still counted toward progress;
/// misses cost one cover-resolution call each and are appended to the
/// session collection.
pub async fn enrich_records<C, Fut>(
    records: &[GameRecord],
    tables: &LookupTables,
    session: &mut SearchSession,
    mut resolve_cover: C,
    events: &mpsc::UnboundedSender<SearchEvent>,
) -> (usize, usize)
where
    C: FnMut(Option<u64>) -> Fut,
    Fut: Future<Output = String>,
{
    let total = records.len();
    let mut added = 0;
    let mut skipped = 0;

    for (index, record) in records.iter().enumerate() {
        if session.is_seen(record.id) {
            skipped += 1;
        } else {
            let cover_url = resolve_cover(record.cover).await;
            let enriched = build_enriched(record, tables, cover_url);
            let name = enriched.name.clone();
            if session.add_result(record.id, enriched) {
                added += 1;
                let _ = events.send(SearchEvent::Added {
                    index: index + 1,
                    name,
                });
            }
        }

        let _ = events.send(SearchEvent::Processed {
            index: index + 1,
            total,
            unique_total: session.unique_count(),
        });
    }

    let _ = events.send(SearchEvent::Done { added, skipped });
    (added, skipped)
}

/// Run one full search against the live API: validate, aggregate all pages,
/// filter by genre, then dedup and enrich into the session collection.
pub async fn run_search(
    client: &IgdbClient,
    tables: &LookupTables,
    session: &mut SearchSession,
    key: &SearchKey,
    selected_genre_ids: &HashSet<u64>,
    events: &mpsc::UnboundedSender<SearchEvent>,
) -> Result<SearchOutcome, IgdbError> {
    // The query language delimits search text with double quotes; drop any
    // embedded quotes rather than trying to escape them.
    let title = key.title().replace('"', "");

    run_search_with(
        tables,
        session,
        key,
        selected_genre_ids,
        |offset| {
            let body = format!(
                "fields {GAMES_FIELDS}; search \"{title}\"; limit {PAGE_SIZE}; offset {offset};"
            );
            async move { client.games(&body).await }
        },
        |cover_id| client.resolve_cover(cover_id),
        events,
    )
    .await
}

/// The search pipeline over injected page and cover sources. Validation
/// runs before the first page request, so a rejected key costs no network
/// traffic at all.
pub async fn run_search_with<F, Fut, C, CFut>(
    tables: &LookupTables,
    session: &mut SearchSession,
    key: &SearchKey,
    selected_genre_ids: &HashSet<u64>,
    fetch_page: F,
    resolve_cover: C,
    events: &mpsc::UnboundedSender<SearchEvent>,
) -> Result<SearchOutcome, IgdbError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<GameRecord>, IgdbError>>,
    C: FnMut(Option<u64>) -> CFut,
    CFut: Future<Output = String>,
{
    session.validate_search(key)?;

    let all = fetch_all_pages(fetch_page, events).await?;
    let fetched = all.len();

    let filtered = filter_by_genres(all, selected_genre_ids);
    let matched = filtered.len();
    let _ = events.send(SearchEvent::Filtered { total: matched });

    let (added, skipped) = enrich_records(&filtered, tables, session, resolve_cover, events).await;

    // Record the key even for empty outcomes, matching the session history
    // semantics: a searched title is not searched again.
    session.record_search(key.clone());

    Ok(SearchOutcome {
        fetched,
        matched,
        added,
        skipped,
    })
}
