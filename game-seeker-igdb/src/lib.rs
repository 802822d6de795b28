pub mod client;
pub mod credentials;
pub mod error;
pub mod export;
pub mod lookup;
pub mod random;
pub mod search;
pub mod session;
pub mod types;

pub use client::{COVER_FETCH_ERROR, COVER_NONE, COVER_NOT_FOUND, IgdbClient};
pub use credentials::{
    CredentialSource, CredentialSources, Credentials, config_path, credential_sources,
    save_to_file,
};
pub use error::IgdbError;
pub use export::export_csv;
pub use lookup::{LookupTable, LookupTables, NOT_AVAILABLE, format_release_date};
pub use random::{RandomGame, fetch_random};
pub use search::{PAGE_SIZE, SearchEvent, SearchOutcome, filter_by_genres, run_search};
pub use session::{SearchKey, SearchSession};
pub use types::{EnrichedGame, GameRecord};
