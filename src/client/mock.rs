//! In-memory transport for driving the fetchers in tests.
//!
//! Responses are served strictly in the order they were queued, and every
//! query the fetchers render is captured for later assertions.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Transport;
use crate::error::Result;

#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<Value>>>,
    queries: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful `data` payload.
    pub fn with_data(self, data: Value) -> Self {
        self.replies.lock().unwrap().push_back(Ok(data));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: crate::error::SnapshotError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, query: &str) -> Result<Value> {
        self.queries.lock().unwrap().push(query.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("MockTransport has no reply queued for query:\n{query}"))
    }
}

fn page_info(next: Option<&str>) -> Value {
    json!({
        "endCursor": next,
        "hasNextPage": next.is_some(),
    })
}

/// A members connection; `next` is the end cursor when more pages follow.
pub fn members(logins: &[&str], next: Option<&str>) -> Value {
    let edges: Vec<Value> = logins
        .iter()
        .map(|login| json!({"node": {"login": login}}))
        .collect();
    json!({"pageInfo": page_info(next), "edges": edges})
}

/// An invitations connection; invitees are nested one level deeper.
pub fn invitations(logins: &[&str], next: Option<&str>) -> Value {
    let edges: Vec<Value> = logins
        .iter()
        .map(|login| json!({"node": {"invitee": {"login": login}}}))
        .collect();
    json!({"pageInfo": page_info(next), "edges": edges})
}

pub fn team_node(name: &str, members: Value, invitations: Value) -> Value {
    json!({
        "node": {
            "name": name,
            "slug": name.to_lowercase().replace(' ', "-"),
            "description": format!("{name} team"),
            "members": members,
            "invitations": invitations,
        }
    })
}

/// One page of the bulk organization query.
pub fn bulk_page(teams: Vec<Value>, next: Option<&str>) -> Value {
    json!({
        "organization": {
            "teams": {
                "pageInfo": page_info(next),
                "edges": teams,
            }
        }
    })
}

/// One page of the single-team query.
pub fn team_page(members: Value, invitations: Value) -> Value {
    json!({
        "organization": {
            "team": {
                "members": members,
                "invitations": invitations,
            }
        }
    })
}

/// `count` generated logins, e.g. `logins("B", 1, 3)` is `B1, B2, B3`.
pub fn logins(prefix: &str, start: usize, count: usize) -> Vec<String> {
    (start..start + count).map(|i| format!("{prefix}{i}")).collect()
}

pub fn as_strs(logins: &[String]) -> Vec<&str> {
    logins.iter().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_served_in_order_and_queries_captured() {
        let mock = MockTransport::new()
            .with_data(json!({"n": 1}))
            .with_data(json!({"n": 2}));

        assert_eq!(mock.execute("first").await.unwrap(), json!({"n": 1}));
        assert_eq!(mock.execute("second").await.unwrap(), json!({"n": 2}));
        assert_eq!(mock.queries(), ["first", "second"]);
        assert_eq!(mock.remaining(), 0);
    }

    #[test]
    fn fixtures_mark_next_page_from_cursor() {
        let conn = members(&["A"], Some("c1"));
        assert_eq!(conn["pageInfo"]["hasNextPage"], true);
        assert_eq!(conn["pageInfo"]["endCursor"], "c1");

        let conn = invitations(&[], None);
        assert_eq!(conn["pageInfo"]["hasNextPage"], false);
    }
}
