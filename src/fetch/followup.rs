use crate::client::Transport;
use crate::error::{Result, SnapshotError};
use crate::logging::RunLog;
use crate::query::{Cursor, QueryBuilder};
use crate::responses::{Connection, OrgTeamResponse, TeamPage};
use crate::types::{normalize_edges, TeamRecord, UserIdentifier};

/// Accumulated logins and cursor position of one paginated field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldProgress {
    pub logins: Vec<UserIdentifier>,
    after: Option<Cursor>,
    exhausted: bool,
}

impl FieldProgress {
    pub fn after(&self) -> Option<&Cursor> {
        self.after.as_ref()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Append one page and advance this field's cursor.
    ///
    /// Once exhausted, later pages for the field are ignored: the query still
    /// selects it, but the endpoint just repeats the last page.
    pub fn absorb(mut self, page: &Connection, field: &'static str, log: &RunLog) -> Result<Self> {
        if self.exhausted {
            return Ok(self);
        }

        self.logins.extend(normalize_edges(&page.edges, log)?);
        match page.page_info.next_cursor(field)? {
            Some(next) => self.after = Some(next),
            None => self.exhausted = true,
        }
        Ok(self)
    }
}

/// Both cursors of a team under deep pagination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FollowupState {
    pub members: FieldProgress,
    pub invitations: FieldProgress,
}

impl FollowupState {
    pub fn merge(self, page: &TeamPage, log: &RunLog) -> Result<Self> {
        Ok(Self {
            members: self.members.absorb(&page.members, "members", log)?,
            invitations: self.invitations.absorb(&page.invitations, "invitations", log)?,
        })
    }

    pub fn is_done(&self) -> bool {
        self.members.is_exhausted() && self.invitations.is_exhausted()
    }
}

/// Exhausts the member and invitation cursors of a single team.
pub struct FollowupFetcher<'a, T> {
    transport: &'a T,
    queries: &'a QueryBuilder,
    log: &'a RunLog,
}

impl<'a, T: Transport> FollowupFetcher<'a, T> {
    pub fn new(transport: &'a T, queries: &'a QueryBuilder, log: &'a RunLog) -> Self {
        Self {
            transport,
            queries,
            log,
        }
    }

    /// Fetch the full membership of `name`, replacing its bulk placeholder.
    pub async fn fetch(&self, org: &str, name: &str, placeholder: &TeamRecord) -> Result<TeamRecord> {
        let mut state = FollowupState::default();

        while !state.is_done() {
            self.log.info(format_args!("Querying team {name}"));
            let query = self.queries.team(
                org,
                &placeholder.slug,
                state.members.after(),
                state.invitations.after(),
            );
            let data = self.transport.execute(&query).await?;
            let response: OrgTeamResponse = serde_json::from_value(data)?;
            let page = response
                .organization
                .ok_or_else(|| SnapshotError::OrganizationNotFound(org.to_string()))?
                .team
                .ok_or_else(|| SnapshotError::TeamNotFound(name.to_string()))?;

            state = state.merge(&page, self.log)?;
        }

        Ok(TeamRecord {
            slug: placeholder.slug.clone(),
            description: placeholder.description.clone(),
            members: state.members.logins,
            invitations: state.invitations.logins,
            incomplete: false,
        })
    }
}
