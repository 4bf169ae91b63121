//! Two-phase membership fetch: a bulk organization scan followed by deep
//! pagination of every team the scan could not complete.

use std::collections::BTreeMap;

use crate::types::TeamRecord;

pub mod bulk;
pub mod followup;
pub mod snapshot;

pub use snapshot::{Pass, Snapshot, SnapshotFetcher};

/// Teams by name while a snapshot is being assembled.
pub type Roster = BTreeMap<String, TeamRecord>;
