//! Shared GraphQL response types for the bulk and team queries.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SnapshotError};
use crate::query::Cursor;

/// Pagination info for cursor-based pagination.
#[derive(Deserialize, Debug, Clone)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

impl PageInfo {
    /// Cursor for the following page, or `None` once the field is exhausted.
    pub fn next_cursor(&self, field: &'static str) -> Result<Option<Cursor>> {
        if !self.has_next_page {
            return Ok(None);
        }
        self.end_cursor
            .clone()
            .map(|c| Some(Cursor::new(c)))
            .ok_or(SnapshotError::MissingCursor { field })
    }
}

/// A paginated field. Edges stay raw until the caller normalizes them.
#[derive(Deserialize, Debug, Clone)]
pub struct Connection<E = Value> {
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    pub edges: Vec<E>,
}

/// `organization { teams { .. } }` from the bulk query.
#[derive(Deserialize, Debug)]
pub struct OrgTeamsResponse {
    pub organization: Option<OrgTeams>,
}

#[derive(Deserialize, Debug)]
pub struct OrgTeams {
    pub teams: Connection<TeamEdge>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TeamEdge {
    pub node: TeamNode,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TeamNode {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub members: Connection,
    pub invitations: Connection,
}

/// `organization { team(slug:) { .. } }` from the team query.
#[derive(Deserialize, Debug)]
pub struct OrgTeamResponse {
    pub organization: Option<OrgTeam>,
}

#[derive(Deserialize, Debug)]
pub struct OrgTeam {
    pub team: Option<TeamPage>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TeamPage {
    pub members: Connection,
    pub invitations: Connection,
}
