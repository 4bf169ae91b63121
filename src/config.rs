use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::time::Duration;

use directories::ProjectDirs;
use regex::Regex;
use serde::Deserialize;
use url::Url;

use crate::client::DEFAULT_ENDPOINT;
use crate::error::{Result, SnapshotError};
use crate::query::ChunkSizes;

pub const TOKEN_ENV: &str = "GITHUB_PRODUCTION_TOKEN";
pub const ORG_ENV: &str = "GITHUB_ORG";
pub const ENDPOINT_ENV: &str = "GITHUB_GRAPHQL_URL";
pub const CONFIG_PATH_ENV: &str = "TEAM_SNAPSHOT_CONFIG";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

static ORG_LOGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*$").expect("organization pattern"));

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub token: Option<String>,
    pub org: Option<String>,
    pub endpoint: Option<String>,
    pub teams_chunk: Option<u32>,
    pub members_chunk: Option<u32>,
    pub invitations_chunk: Option<u32>,
    pub timeout_secs: Option<u64>,
}

/// Chunk sizes given on the command line; each wins over the config file.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChunkOverrides {
    pub teams: Option<u32>,
    pub members: Option<u32>,
    pub invitations: Option<u32>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| SnapshotError::ConfigRead {
                path: config_path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| SnapshotError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = env_value(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        ProjectDirs::from("", "", "team-snapshot")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(SnapshotError::NoConfigDir)
    }

    /// Get API token with env var taking precedence over config file
    pub fn token(&self) -> Result<String> {
        self.token_from(env_value(TOKEN_ENV))
    }

    fn token_from(&self, env: Option<String>) -> Result<String> {
        env.or_else(|| self.token.clone())
            .ok_or(SnapshotError::MissingToken)
    }

    /// Get organization, preferring explicit argument, then env, then config
    pub fn resolve_org(&self, explicit: Option<&str>) -> Result<String> {
        self.org_from(explicit, env_value(ORG_ENV))
    }

    fn org_from(&self, explicit: Option<&str>, env: Option<String>) -> Result<String> {
        let org = explicit
            .filter(|org| !org.is_empty())
            .map(String::from)
            .or(env)
            .or_else(|| self.org.clone())
            .ok_or(SnapshotError::MissingOrganization)?;

        if !ORG_LOGIN.is_match(&org) {
            return Err(SnapshotError::InvalidOrganization(org));
        }
        Ok(org.to_lowercase())
    }

    pub fn endpoint(&self) -> Result<Url> {
        self.endpoint_from(env_value(ENDPOINT_ENV))
    }

    fn endpoint_from(&self, env: Option<String>) -> Result<Url> {
        let raw = env
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        Url::parse(&raw).map_err(|_| SnapshotError::InvalidUrl(raw))
    }

    pub fn chunk_sizes(&self, overrides: ChunkOverrides) -> Result<ChunkSizes> {
        let defaults = ChunkSizes::default();
        ChunkSizes {
            teams: overrides
                .teams
                .or(self.teams_chunk)
                .unwrap_or(defaults.teams),
            members: overrides
                .members
                .or(self.members_chunk)
                .unwrap_or(defaults.members),
            invitations: overrides
                .invitations
                .or(self.invitations_chunk)
                .unwrap_or(defaults.invitations),
        }
        .validate()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}
