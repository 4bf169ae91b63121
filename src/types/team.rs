use serde::Serialize;

use super::UserIdentifier;

/// A team while the snapshot is being assembled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamRecord {
    pub slug: String,
    pub description: Option<String>,
    pub members: Vec<UserIdentifier>,
    pub invitations: Vec<UserIdentifier>,
    /// Set when the bulk pass saw more than one page for members or invitations.
    pub incomplete: bool,
}

impl TeamRecord {
    pub fn new(slug: String, description: Option<String>) -> Self {
        Self {
            slug,
            description,
            ..Self::default()
        }
    }
}

/// A team as written to the snapshot file.
///
/// Fields are declared in key order so the serialized object is sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamMembership {
    pub invitations: Vec<UserIdentifier>,
    pub members: Vec<UserIdentifier>,
}

impl From<TeamRecord> for TeamMembership {
    fn from(record: TeamRecord) -> Self {
        Self {
            invitations: record.invitations,
            members: record.members,
        }
    }
}
