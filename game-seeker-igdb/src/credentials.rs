use std::path::PathBuf;

use crate::error::IgdbError;

/// Twitch client credentials used to obtain an IGDB access token.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Where a credential field's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the config file.
    ConfigFile,
    /// Not set anywhere.
    Missing,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Missing => write!(f, "not set"),
        }
    }
}

/// Provenance of each credential field.
#[derive(Debug)]
pub struct CredentialSources {
    pub client_id: CredentialSource,
    pub client_secret: CredentialSource,
}

/// TOML config file format.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct ConfigFile {
    igdb: Option<IgdbConfig>,
}

#[derive(Debug, serde::Deserialize, serde::Serialize)]
struct IgdbConfig {
    client_id: Option<String>,
    client_secret: Option<String>,
}

impl Credentials {
    /// Load credentials from environment variables or the config file.
    ///
    /// Priority: env vars > config file. Both fields are required; the
    /// error message distinguishes "both missing", "id missing", and
    /// "secret missing" so the user knows exactly what to fix.
    pub fn load() -> Result<Self, IgdbError> {
        Self::resolve(
            std::env::var("IGDB_CLIENT_ID").ok(),
            std::env::var("IGDB_CLIENT_SECRET").ok(),
            load_config_file(),
        )
    }

    /// Combine the environment values with the config file, env winning
    /// per field. Split out of [`load`](Self::load) so the precedence
    /// rules are testable without touching the process environment.
    fn resolve(
        env_id: Option<String>,
        env_secret: Option<String>,
        config: Option<IgdbConfig>,
    ) -> Result<Self, IgdbError> {
        let client_id = env_id.or_else(|| config.as_ref().and_then(|c| c.client_id.clone()));
        let client_secret =
            env_secret.or_else(|| config.as_ref().and_then(|c| c.client_secret.clone()));

        match (client_id, client_secret) {
            (Some(client_id), Some(client_secret)) => Ok(Self {
                client_id,
                client_secret,
            }),
            (None, None) => Err(IgdbError::Config(
                "Both the client ID and client secret are missing. \
                 Set IGDB_CLIENT_ID and IGDB_CLIENT_SECRET or add them to the config file"
                    .to_string(),
            )),
            (None, Some(_)) => Err(IgdbError::Config(
                "The client ID is missing. \
                 Set IGDB_CLIENT_ID or add it to the config file"
                    .to_string(),
            )),
            (Some(_), None) => Err(IgdbError::Config(
                "The client secret is missing. \
                 Set IGDB_CLIENT_SECRET or add it to the config file"
                    .to_string(),
            )),
        }
    }
}

/// Return the path to the credentials config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("game-seeker").join("credentials.toml"))
}

/// Save credentials to the config file, creating parent directories as needed.
/// Returns the path the file was written to.
pub fn save_to_file(creds: &Credentials) -> Result<PathBuf, IgdbError> {
    let path = config_path()
        .ok_or_else(|| IgdbError::Config("Could not determine config directory".to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config = ConfigFile {
        igdb: Some(IgdbConfig {
            client_id: Some(creds.client_id.clone()),
            client_secret: Some(creds.client_secret.clone()),
        }),
    };

    let toml_str = toml::to_string_pretty(&config)
        .map_err(|e| IgdbError::Config(format!("Failed to serialize config: {}", e)))?;

    std::fs::write(&path, toml_str)?;
    Ok(path)
}

/// Determine where each credential field is coming from.
pub fn credential_sources() -> CredentialSources {
    let config = load_config_file();

    let client_id = if std::env::var("IGDB_CLIENT_ID").is_ok() {
        CredentialSource::EnvVar("IGDB_CLIENT_ID")
    } else if config.as_ref().and_then(|c| c.client_id.as_ref()).is_some() {
        CredentialSource::ConfigFile
    } else {
        CredentialSource::Missing
    };

    let client_secret = if std::env::var("IGDB_CLIENT_SECRET").is_ok() {
        CredentialSource::EnvVar("IGDB_CLIENT_SECRET")
    } else if config
        .as_ref()
        .and_then(|c| c.client_secret.as_ref())
        .is_some()
    {
        CredentialSource::ConfigFile
    } else {
        CredentialSource::Missing
    };

    CredentialSources {
        client_id,
        client_secret,
    }
}

fn load_config_file() -> Option<IgdbConfig> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    let config: ConfigFile = toml::from_str(&content).ok()?;
    config.igdb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(id: Option<&str>, secret: Option<&str>) -> Option<IgdbConfig> {
        Some(IgdbConfig {
            client_id: id.map(str::to_string),
            client_secret: secret.map(str::to_string),
        })
    }

    fn config_message(result: Result<Credentials, IgdbError>) -> String {
        match result {
            Err(IgdbError::Config(msg)) => msg,
            other => panic!("expected a config error, got {other:?}"),
        }
    }

    #[test]
    fn env_wins_over_config_file_per_field() {
        let creds = Credentials::resolve(
            Some("env-id".to_string()),
            None,
            config(Some("file-id"), Some("file-secret")),
        )
        .unwrap();
        assert_eq!(creds.client_id, "env-id");
        assert_eq!(creds.client_secret, "file-secret");
    }

    #[test]
    fn config_file_alone_is_sufficient() {
        let creds =
            Credentials::resolve(None, None, config(Some("file-id"), Some("file-secret"))).unwrap();
        assert_eq!(creds.client_id, "file-id");
        assert_eq!(creds.client_secret, "file-secret");
    }

    #[test]
    fn both_missing_names_both_fields() {
        let msg = config_message(Credentials::resolve(None, None, None));
        assert!(msg.contains("Both the client ID and client secret are missing"));
    }

    #[test]
    fn missing_id_is_reported_alone() {
        let msg = config_message(Credentials::resolve(
            None,
            Some("env-secret".to_string()),
            None,
        ));
        assert!(msg.contains("The client ID is missing"));
        assert!(msg.contains("IGDB_CLIENT_ID"));
    }

    #[test]
    fn missing_secret_is_reported_alone() {
        let msg = config_message(Credentials::resolve(
            None,
            None,
            config(Some("file-id"), None),
        ));
        assert!(msg.contains("The client secret is missing"));
        assert!(msg.contains("IGDB_CLIENT_SECRET"));
    }
}
