use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected response structure: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API error (status {status}): {message}")]
    Transport { status: u16, message: String },

    #[error("GraphQL errors: {}\n{payload}", messages.join(", "))]
    RemoteQuery {
        messages: Vec<String>,
        payload: String,
    },

    #[error("Unknown user edge format: {edge}")]
    UnknownEdgeShape { edge: String },

    #[error("Duplicate team: {0}")]
    DuplicateTeam(String),

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Organization not found: {0}")]
    OrganizationNotFound(String),

    #[error("Team not found: {0}")]
    TeamNotFound(String),

    #[error("Page of {field} reports more results but carries no end cursor")]
    MissingCursor { field: &'static str },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No API token found. Set GITHUB_PRODUCTION_TOKEN or add token to ~/.config/team-snapshot/config.toml"
    )]
    MissingToken,

    #[error("Organization not specified. Pass --org, set GITHUB_ORG, or add org to the config file")]
    MissingOrganization,

    #[error("Invalid organization login: {0}")]
    InvalidOrganization(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid {field} chunk size {value}: must be between 1 and {max}")]
    InvalidChunkSize {
        field: &'static str,
        value: u32,
        max: u32,
    },

    #[error("Failed to write snapshot to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
