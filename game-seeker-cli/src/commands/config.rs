use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_seeker_igdb::{CredentialSource, Credentials, config_path, credential_sources, save_to_file};

/// Mask a secret, showing only the first 2 characters. Counts characters,
/// not bytes, so a pasted multibyte value cannot split a char boundary.
fn mask_value(s: &str) -> String {
    if s.chars().count() <= 2 {
        "****".to_string()
    } else {
        let prefix: String = s.chars().take(2).collect();
        format!("{}****", prefix)
    }
}

/// Show current credentials and their sources.
pub(crate) fn run_show() {
    let path = config_path();
    let sources = credential_sources();

    println!(
        "{}",
        "IGDB Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();

    match &path {
        Some(p) if p.exists() => {
            println!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            println!(
                "  Config file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            println!(
                "  Config file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    println!();

    let creds = Credentials::load().ok();

    let get_value = |source: &CredentialSource, from_creds: Option<String>, is_secret: bool| {
        match source {
            CredentialSource::Missing => None,
            CredentialSource::EnvVar(var) => {
                let v = std::env::var(var).ok()?;
                Some(if is_secret { mask_value(&v) } else { v })
            }
            CredentialSource::ConfigFile => {
                from_creds.map(|v| if is_secret { mask_value(&v) } else { v })
            }
        }
    };

    let fields: &[(&str, &CredentialSource, Option<String>)] = &[
        (
            "client_id",
            &sources.client_id,
            get_value(
                &sources.client_id,
                creds.as_ref().map(|c| c.client_id.clone()),
                false,
            ),
        ),
        (
            "client_secret",
            &sources.client_secret,
            get_value(
                &sources.client_secret,
                creds.as_ref().map(|c| c.client_secret.clone()),
                true,
            ),
        ),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => {
                println!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    v,
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
            None => {
                println!(
                    "  {} {} {}",
                    format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                    "not set".if_supports_color(Stdout, |t| t.yellow()),
                    source_str.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
    }
}

/// Interactively set up credentials.
pub(crate) fn run_setup() {
    println!(
        "{}",
        "IGDB Credential Setup".if_supports_color(Stdout, |t| t.bold()),
    );
    println!();
    println!(
        "  {}",
        "Register an application at https://dev.twitch.tv/console to obtain these."
            .if_supports_color(Stdout, |t| t.dimmed()),
    );
    println!();

    let existing = Credentials::load().ok();

    let read_line = |prompt: &str, default: Option<&str>| -> String {
        loop {
            if let Some(def) = default {
                print!("  {} [{}]: ", prompt, def);
            } else {
                print!("  {}: ", prompt);
            }
            std::io::stdout().flush().expect("stdout flush");

            let mut input = String::new();
            std::io::stdin().read_line(&mut input).expect("stdin read");
            let trimmed = input.trim().to_string();

            if trimmed.is_empty() {
                if let Some(def) = default {
                    return def.to_string();
                }
                println!(
                    "    {}",
                    "This field is required.".if_supports_color(Stdout, |t| t.yellow()),
                );
                continue;
            }
            return trimmed;
        }
    };

    let client_id = read_line("client_id", existing.as_ref().map(|c| c.client_id.as_str()));
    let client_secret = read_line(
        "client_secret",
        existing.as_ref().map(|c| c.client_secret.as_str()),
    );

    let creds = Credentials {
        client_id,
        client_secret,
    };

    match save_to_file(&creds) {
        Ok(path) => {
            println!();
            println!(
                "{} Credentials saved to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                path.display().if_supports_color(Stdout, |t| t.cyan()),
            );
        }
        Err(e) => {
            eprintln!();
            eprintln!(
                "{} Failed to save credentials: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                e,
            );
        }
    }
}

/// Print the config file path.
pub(crate) fn run_path() {
    match config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Could not determine config directory");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_shows_only_a_short_prefix() {
        assert_eq!(mask_value("abcdef123"), "ab****");
        assert_eq!(mask_value("ab"), "****");
        assert_eq!(mask_value(""), "****");
    }

    #[test]
    fn mask_handles_multibyte_values() {
        assert_eq!(mask_value("日本語のシークレット"), "日本****");
        assert_eq!(mask_value("é"), "****");
    }
}
