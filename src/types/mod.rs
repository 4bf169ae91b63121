mod team;
mod user;

pub use team::{TeamMembership, TeamRecord};
pub use user::{normalize_edges, UserIdentifier};
