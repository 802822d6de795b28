use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_seeker_igdb::LookupTables;

/// List all genre names known to IGDB.
pub(crate) fn run_genres(tables: &LookupTables) {
    print_table("Genres", tables.genres.sorted_names());
}

/// List all platform names known to IGDB.
pub(crate) fn run_platforms(tables: &LookupTables) {
    print_table("Platforms", tables.platforms.sorted_names());
}

fn print_table(title: &str, names: Vec<&str>) {
    println!("{}:", title.if_supports_color(Stdout, |t| t.bold()));
    for name in &names {
        println!("  {}", name);
    }
    println!();
    println!("Total: {}", names.len());
}
