//! GraphQL query rendering for the bulk organization scan and the
//! single-team deep pagination.

use std::fmt;

use const_format::concatcp;
use serde_json::Value;

use crate::error::{Result, SnapshotError};

/// The endpoint refuses any single connection larger than this.
pub const MAX_CHUNK: u32 = 100;

const PAGE_INFO: &str = "pageInfo { endCursor hasNextPage }";
const MEMBER_SELECTION: &str = concatcp!("{ ", PAGE_INFO, " edges { node { login } } }");
const INVITATION_SELECTION: &str =
    concatcp!("{ ", PAGE_INFO, " edges { node { invitee { login } } } }");

/// Opaque position in a paginated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Requested page sizes.
///
/// Members and invitations are nested under teams in the bulk form, so the
/// endpoint's node budget grows with `teams * members` and
/// `teams * invitations`; both products must stay within that budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSizes {
    pub teams: u32,
    pub members: u32,
    pub invitations: u32,
}

impl Default for ChunkSizes {
    fn default() -> Self {
        Self {
            teams: MAX_CHUNK,
            members: MAX_CHUNK,
            invitations: MAX_CHUNK,
        }
    }
}

impl ChunkSizes {
    pub fn validate(self) -> Result<Self> {
        for (field, value) in [
            ("teams", self.teams),
            ("members", self.members),
            ("invitations", self.invitations),
        ] {
            if value == 0 || value > MAX_CHUNK {
                return Err(SnapshotError::InvalidChunkSize {
                    field,
                    value,
                    max: MAX_CHUNK,
                });
            }
        }
        Ok(self)
    }
}

/// `after: "<cursor>"`, only ever rendered when a cursor exists.
struct AfterClause<'a>(&'a Cursor);

impl fmt::Display for AfterClause<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ", after: {}", string_literal(self.0.as_str()))
    }
}

/// Arguments of one paginated field: `(first: N[, after: ".."])`.
struct PageArgs<'a> {
    first: u32,
    after: Option<AfterClause<'a>>,
}

impl<'a> PageArgs<'a> {
    fn new(first: u32, after: Option<&'a Cursor>) -> Self {
        Self {
            first,
            after: after.map(AfterClause),
        }
    }
}

impl fmt::Display for PageArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(first: {}", self.first)?;
        if let Some(after) = &self.after {
            write!(f, "{after}")?;
        }
        f.write_str(")")
    }
}

// JSON string escaping is a subset of what GraphQL string literals accept.
fn string_literal(raw: &str) -> String {
    Value::String(raw.to_owned()).to_string()
}

#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    chunks: ChunkSizes,
}

impl QueryBuilder {
    pub fn new(chunks: ChunkSizes) -> Self {
        Self { chunks }
    }

    /// Organization scan: one page of teams with the first page of each
    /// team's members and invitations.
    pub fn bulk(&self, org: &str, teams_after: Option<&Cursor>) -> String {
        format!(
            r#"{{
  organization(login: {org}) {{
    teams{teams_args} {{
      {PAGE_INFO}
      edges {{
        node {{
          name
          slug
          description
          members{members_args} {MEMBER_SELECTION}
          invitations{invitations_args} {INVITATION_SELECTION}
        }}
      }}
    }}
  }}
}}"#,
            org = string_literal(org),
            teams_args = PageArgs::new(self.chunks.teams, teams_after),
            members_args = PageArgs::new(self.chunks.members, None),
            invitations_args = PageArgs::new(self.chunks.invitations, None),
        )
    }

    /// Deep pagination of one team, each field with its own cursor.
    pub fn team(
        &self,
        org: &str,
        slug: &str,
        members_after: Option<&Cursor>,
        invitations_after: Option<&Cursor>,
    ) -> String {
        format!(
            r#"{{
  organization(login: {org}) {{
    team(slug: {slug}) {{
      members{members_args} {MEMBER_SELECTION}
      invitations{invitations_args} {INVITATION_SELECTION}
    }}
  }}
}}"#,
            org = string_literal(org),
            slug = string_literal(slug),
            members_args = PageArgs::new(self.chunks.members, members_after),
            invitations_args = PageArgs::new(self.chunks.invitations, invitations_after),
        )
    }
}
