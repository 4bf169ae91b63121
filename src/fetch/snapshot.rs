use std::collections::BTreeMap;

use crate::client::Transport;
use crate::error::Result;
use crate::logging::RunLog;
use crate::query::QueryBuilder;
use crate::types::TeamMembership;

use super::bulk::BulkFetcher;
use super::followup::FollowupFetcher;

/// Which pass produced a team's final membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Bulk,
    Followup,
}

/// The assembled organization snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub teams: BTreeMap<String, TeamMembership>,
    /// Teams that needed deep pagination, in the order they were fetched.
    pub followed_up: Vec<String>,
}

impl Snapshot {
    pub fn pass(&self, team: &str) -> Pass {
        if self.followed_up.iter().any(|name| name == team) {
            Pass::Followup
        } else {
            Pass::Bulk
        }
    }
}

/// Runs the bulk pass, then deep-paginates every team it could not complete.
pub struct SnapshotFetcher<'a, T> {
    transport: &'a T,
    queries: &'a QueryBuilder,
    log: &'a RunLog,
}

impl<'a, T: Transport> SnapshotFetcher<'a, T> {
    pub fn new(transport: &'a T, queries: &'a QueryBuilder, log: &'a RunLog) -> Self {
        Self {
            transport,
            queries,
            log,
        }
    }

    pub async fn fetch(&self, org: &str) -> Result<Snapshot> {
        let mut roster = BulkFetcher::new(self.transport, self.queries, self.log)
            .fetch(org)
            .await?;

        let followup = FollowupFetcher::new(self.transport, self.queries, self.log);
        let mut followed_up = Vec::new();

        for (name, record) in roster.iter_mut().filter(|(_, record)| record.incomplete) {
            *record = followup.fetch(org, name, record).await?;
            followed_up.push(name.clone());
        }

        self.log.info(format_args!(
            "Fetched {} teams ({} needed followup)",
            roster.len(),
            followed_up.len()
        ));

        Ok(Snapshot {
            teams: roster
                .into_iter()
                .map(|(name, record)| (name, TeamMembership::from(record)))
                .collect(),
            followed_up,
        })
    }
}
