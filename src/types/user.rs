use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SnapshotError};
use crate::logging::RunLog;

/// Canonical lowercase login shared by members and invitees.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserIdentifier(String);

impl UserIdentifier {
    pub fn new(login: &str) -> Self {
        Self(login.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalize one raw connection edge.
    ///
    /// Members arrive as `{"node": {"login": ..}}` while invitees are one level
    /// deeper at `{"node": {"invitee": {"login": ..}}}`. Anything else aborts.
    pub fn from_edge(edge: &Value, log: &RunLog) -> Result<Self> {
        match UserEdge::deserialize(edge) {
            Ok(UserEdge {
                node: UserNode::Member { login },
            }) => Ok(Self::new(&login)),
            Ok(UserEdge {
                node: UserNode::Invitee { invitee },
            }) => Ok(Self::new(&invitee.login)),
            Err(_) => {
                let edge = edge.to_string();
                log.error(format_args!("unknown user data format: {edge}"));
                Err(SnapshotError::UnknownEdgeShape { edge })
            }
        }
    }
}

#[derive(Deserialize)]
struct UserEdge {
    node: UserNode,
}

// Variant order matters: a node exposing `login` directly is a member.
#[derive(Deserialize)]
#[serde(untagged)]
enum UserNode {
    Member { login: String },
    Invitee { invitee: Invitee },
}

#[derive(Deserialize)]
struct Invitee {
    login: String,
}

/// Normalize every edge of one page, preserving order.
pub fn normalize_edges(edges: &[Value], log: &RunLog) -> Result<Vec<UserIdentifier>> {
    edges
        .iter()
        .map(|edge| UserIdentifier::from_edge(edge, log))
        .collect()
}
