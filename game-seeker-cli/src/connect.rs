//! Startup: credentials, token exchange, and the one-time lookup-table
//! fetch shared by every online command.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_seeker_igdb::{Credentials, IgdbClient, LookupTables};

/// Spinner in the house style.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {msg}")
            .expect("static pattern")
            .tick_chars("/-\\|"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Load credentials, exchange them for a token, and fetch the genre and
/// platform reference tables. Any failure here is fatal for the command;
/// the error messages distinguish exactly which credential is missing or
/// rejected.
pub(crate) async fn connect() -> Option<(IgdbClient, LookupTables)> {
    let creds = match Credentials::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!(
                "{} {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            eprintln!();
            eprintln!("Set credentials via environment variables:");
            eprintln!("  IGDB_CLIENT_ID, IGDB_CLIENT_SECRET");
            eprintln!();
            eprintln!("Or run 'game-seeker config setup' to configure credentials.");
            return None;
        }
    };

    let pb = spinner("Connecting to IGDB...");

    let client = match IgdbClient::new(creds).await {
        Ok(client) => client,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!(
                "{} Failed to connect to IGDB: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            return None;
        }
    };

    pb.set_message("Fetching genre and platform tables...");
    let tables = match LookupTables::fetch(&client).await {
        Ok(tables) => tables,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!(
                "{} Failed to fetch reference tables: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            return None;
        }
    };
    pb.finish_and_clear();

    println!(
        "{} Connected to IGDB ({} genres, {} platforms)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        tables.genres.len(),
        tables.platforms.len(),
    );

    Some((client, tables))
}
