use crate::client::Transport;
use crate::error::{Result, SnapshotError};
use crate::logging::RunLog;
use crate::query::{Cursor, QueryBuilder};
use crate::responses::{OrgTeamsResponse, TeamEdge};
use crate::types::{normalize_edges, TeamRecord};

use super::Roster;

/// Walks the organization's teams page by page, absorbing each team's
/// members and invitations whenever both fit in the first nested page.
pub struct BulkFetcher<'a, T> {
    transport: &'a T,
    queries: &'a QueryBuilder,
    log: &'a RunLog,
}

impl<'a, T: Transport> BulkFetcher<'a, T> {
    pub fn new(transport: &'a T, queries: &'a QueryBuilder, log: &'a RunLog) -> Self {
        Self {
            transport,
            queries,
            log,
        }
    }

    pub async fn fetch(&self, org: &str) -> Result<Roster> {
        let mut roster = Roster::new();
        let mut cursor: Option<Cursor> = None;

        loop {
            self.log.info(format_args!("Querying teams for org {org}"));
            let query = self.queries.bulk(org, cursor.as_ref());
            let data = self.transport.execute(&query).await?;
            let response: OrgTeamsResponse = serde_json::from_value(data)?;
            let teams = response
                .organization
                .ok_or_else(|| SnapshotError::OrganizationNotFound(org.to_string()))?
                .teams;

            roster = merge_teams_page(roster, &teams.edges, self.log)?;

            match teams.page_info.next_cursor("teams")? {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(roster)
    }
}

/// Fold one page of team edges into the roster.
///
/// A team whose members or invitations spill past the first page is recorded
/// empty and flagged; none of its edges from this page are kept.
pub fn merge_teams_page(mut roster: Roster, edges: &[TeamEdge], log: &RunLog) -> Result<Roster> {
    for edge in edges {
        let team = &edge.node;
        if roster.contains_key(&team.name) {
            return Err(SnapshotError::DuplicateTeam(team.name.clone()));
        }

        let slug = team
            .slug
            .clone()
            .unwrap_or_else(|| team.name.to_lowercase());
        let mut record = TeamRecord::new(slug, team.description.clone());

        if team.members.page_info.has_next_page || team.invitations.page_info.has_next_page {
            log.debug(format_args!("team {} needs followup", team.name));
            record.incomplete = true;
        } else {
            record
                .members
                .extend(normalize_edges(&team.members.edges, log)?);
            record
                .invitations
                .extend(normalize_edges(&team.invitations.edges, log)?);
        }

        roster.insert(team.name.clone(), record);
    }

    Ok(roster)
}
