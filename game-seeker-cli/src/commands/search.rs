use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio::sync::mpsc;

use game_seeker_igdb::{
    IgdbClient, IgdbError, LookupTables, SearchEvent, SearchKey, SearchOutcome, SearchSession,
    export_csv, run_search,
};

use crate::connect;

/// One-shot search: a single title (and optional genre narrowing) against a
/// fresh session, optionally exported straight to CSV.
pub(crate) async fn run_once(
    client: &IgdbClient,
    tables: &LookupTables,
    title: Option<String>,
    genres: Option<Vec<String>>,
    out: Option<PathBuf>,
) {
    let title = title.unwrap_or_default();
    let mut session = SearchSession::new();

    let Some((ids, names)) = resolve_genres(tables, genres.unwrap_or_default()) else {
        return;
    };
    let key = SearchKey::new(&title, &names);

    let completed = search_and_report(client, tables, &mut session, &key, &ids).await;
    if completed {
        if let Some(path) = out {
            export(&path, &session);
        }
    }
}

/// Interactive session: repeated searches share one ledger and result
/// collection until the user saves, resets, or quits.
pub(crate) async fn run_interactive(client: &IgdbClient, tables: &LookupTables) {
    println!();
    println!(
        "{}",
        "Interactive search session".if_supports_color(Stdout, |t| t.bold()),
    );
    println!("  Enter a game title to search, or a command:");
    println!("    :save <path>   export collected results to a CSV file");
    println!("    :history       show searches done this session");
    println!("    :genres        list known genre names");
    println!("    :reset         clear the session (ledger, history, results)");
    println!("    :quit          exit");
    println!();

    let mut session = SearchSession::new();

    loop {
        let Some(line) = prompt("search> ") else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix(':') {
            match handle_command(command, &mut session, tables) {
                LoopAction::Continue => continue,
                LoopAction::Quit => break,
            }
        }

        // A title: ask for optional genre narrowing, then search.
        let genre_input = prompt("genres (comma-separated, empty for all)> ").unwrap_or_default();
        let genre_names: Vec<String> = genre_input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        let Some((ids, names)) = resolve_genres(tables, genre_names) else {
            continue;
        };
        let key = SearchKey::new(&line, &names);
        search_and_report(client, tables, &mut session, &key, &ids).await;

        println!(
            "  Session: {} unique games collected",
            session.unique_count(),
        );
        println!();
    }
}

enum LoopAction {
    Continue,
    Quit,
}

fn handle_command(command: &str, session: &mut SearchSession, tables: &LookupTables) -> LoopAction {
    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "save" => {
            if arg.is_empty() {
                eprintln!("  Usage: :save <path>");
            } else {
                export(Path::new(arg), session);
            }
        }
        "history" => {
            let mut any = false;
            for (i, key) in session.history().enumerate() {
                println!("  {}) {}", i + 1, key);
                any = true;
            }
            if !any {
                println!(
                    "  {}",
                    "No searches yet this session".if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
        "genres" => {
            for name in tables.genres.sorted_names() {
                println!("  {}", name);
            }
        }
        "reset" => {
            session.reset();
            println!(
                "  {} Session cleared",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            );
        }
        "quit" | "q" | "exit" => return LoopAction::Quit,
        other => {
            eprintln!("  Unknown command ':{}'", other);
        }
    }
    LoopAction::Continue
}

/// Map user-supplied genre names to table ids and canonical display names.
/// Unknown names abort the search so a typo doesn't silently widen it.
fn resolve_genres(
    tables: &LookupTables,
    genre_names: Vec<String>,
) -> Option<(HashSet<u64>, Vec<String>)> {
    let (ids, unknown) = tables.genres.ids_for_names(&genre_names);
    if !unknown.is_empty() {
        eprintln!(
            "{} Unknown genre{}: {} (run 'game-seeker genres' for the full list)",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            if unknown.len() == 1 { "" } else { "s" },
            unknown.join(", "),
        );
        return None;
    }
    let names: Vec<String> = ids.iter().map(|&id| tables.genres.name_of(id)).collect();
    Some((ids.into_iter().collect(), names))
}

/// Run one search with a live progress display and report the outcome.
/// Returns true if the search completed (even with no results).
async fn search_and_report(
    client: &IgdbClient,
    tables: &LookupTables,
    session: &mut SearchSession,
    key: &SearchKey,
    selected_genre_ids: &HashSet<u64>,
) -> bool {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let pb = connect::spinner(&format!("Searching for \"{}\"...", key.title()));

    let progress = async {
        while let Some(event) = rx.recv().await {
            match event {
                SearchEvent::PageFetched { offset, count } => {
                    pb.set_message(format!("Fetched {} games...", offset + count));
                }
                SearchEvent::Aggregated { total } => {
                    pb.set_message(format!("{} games fetched", total));
                }
                SearchEvent::Filtered { total } => {
                    // Switch from spinner to a deterministic bar: one tick
                    // per processed record, skips included.
                    pb.disable_steady_tick();
                    pb.set_style(
                        ProgressStyle::with_template("  [{bar:40.cyan}] {pos}/{len} {msg}")
                            .expect("static pattern")
                            .progress_chars("=> "),
                    );
                    pb.set_length(total as u64);
                    pb.set_position(0);
                }
                SearchEvent::Processed {
                    index,
                    unique_total,
                    ..
                } => {
                    pb.set_position(index as u64);
                    pb.set_message(format!("Unique games added: {}", unique_total));
                }
                SearchEvent::Added { .. } | SearchEvent::Done { .. } => {}
            }
        }
    };

    let search = async {
        let result = run_search(client, tables, session, key, selected_genre_ids, &tx).await;
        drop(tx);
        result
    };

    let (result, ()) = tokio::join!(search, progress);
    pb.finish_and_clear();

    match result {
        Ok(outcome) => {
            report_outcome(key, outcome);
            true
        }
        Err(e @ (IgdbError::EmptyTitle | IgdbError::DuplicateSearch(_))) => {
            eprintln!(
                "{} {}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                e,
            );
            false
        }
        Err(e) => {
            eprintln!(
                "{} Search failed: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
            eprintln!("  The IGDB API may be unreachable; try again in a moment.");
            false
        }
    }
}

fn report_outcome(key: &SearchKey, outcome: SearchOutcome) {
    if outcome.fetched == 0 {
        println!(
            "{} No game data found for '{}'",
            "?".if_supports_color(Stdout, |t| t.yellow()),
            key,
        );
    } else if outcome.matched == 0 {
        println!(
            "{} No games match the selected genres",
            "?".if_supports_color(Stdout, |t| t.yellow()),
        );
    } else {
        println!(
            "{} {} new games added for '{}' ({} duplicates skipped)",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            outcome.added,
            key,
            outcome.skipped,
        );
    }
}

fn export(path: &Path, session: &SearchSession) {
    match export_csv(path, session.results()) {
        Ok(written) => {
            println!(
                "{} {} games saved to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                session.results().len(),
                written.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        Err(e) => {
            eprintln!(
                "{} Export failed: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
        }
    }
}

fn prompt(text: &str) -> Option<String> {
    print!("{}", text);
    std::io::stdout().flush().ok()?;

    let mut input = String::new();
    match std::io::stdin().read_line(&mut input) {
        Ok(0) => None, // EOF
        Ok(_) => Some(input.trim().to_string()),
        Err(_) => None,
    }
}
