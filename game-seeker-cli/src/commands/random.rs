use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_seeker_igdb::{IgdbClient, IgdbError, LookupTables, fetch_random};

use crate::connect;

/// Fetch and display one uniformly random game from the whole database.
pub(crate) async fn run(client: &IgdbClient, tables: &LookupTables) {
    let pb = connect::spinner("Fetching a random game...");
    let result = fetch_random(client, tables).await;
    pb.finish_and_clear();

    let random = match result {
        Ok(r) => r,
        Err(e @ IgdbError::EmptyDatabase) => {
            eprintln!(
                "{} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            return;
        }
        Err(e) => {
            eprintln!(
                "{} Random fetch failed: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            return;
        }
    };

    let game = &random.game;
    println!();
    println!("{}", game.name.if_supports_color(Stdout, |t| t.bold()));
    field("Release Date", &game.release_date);
    field("Rating", &game.rating);
    field("Genres", &game.genres);
    field("Platforms", &game.platforms);
    field("Storyline", &game.storyline);
    field("Summary", &game.summary);
    field("Cover", &game.cover_url);
    match &random.url {
        Some(url) => field("Link", url),
        None => field("Link", "Not Available"),
    }
}

fn field(label: &str, value: &str) {
    println!(
        "  {} {}",
        format!("{}:", label).if_supports_color(Stdout, |t| t.cyan()),
        value,
    );
}
