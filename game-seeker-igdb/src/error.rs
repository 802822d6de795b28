/// Errors that can occur while talking to IGDB or managing a search session.
#[derive(Debug, thiserror::Error)]
pub enum IgdbError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Your client ID is invalid, or both the client ID and client secret are incorrect")]
    InvalidClientId,

    #[error("Your client secret is invalid")]
    InvalidClientSecret,

    #[error("IGDB returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Search title is empty")]
    EmptyTitle,

    #[error("Search for '{0}' has already been done this session")]
    DuplicateSearch(String),

    #[error("No games found in the database")]
    EmptyDatabase,

    #[error("There are no games to export")]
    NoData,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IgdbError {
    /// True for errors that should abort the whole session rather than a
    /// single operation (credential problems are unrecoverable mid-run).
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            IgdbError::InvalidClientId | IgdbError::InvalidClientSecret | IgdbError::Config(_)
        )
    }
}
