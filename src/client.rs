use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{Result, SnapshotError};
use crate::logging::RunLog;

#[cfg(test)]
pub mod mock;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

/// Executes one rendered query and hands back its `data` object.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, query: &str) -> Result<Value>;
}

pub struct GraphQLClient {
    http: Client,
    endpoint: Url,
    token: String,
    log: RunLog,
}

#[derive(Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct GraphQLResponse {
    data: Option<Value>,
    errors: Option<Vec<Value>>,
}

impl GraphQLClient {
    pub fn new(endpoint: Url, token: String, timeout: Duration, log: RunLog) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("team-snapshot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            endpoint,
            token,
            log,
        })
    }
}

#[async_trait]
impl Transport for GraphQLClient {
    async fn execute(&self, query: &str) -> Result<Value> {
        self.log.debug(format_args!("query: {query}"));
        let request = GraphQLRequest { query };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SnapshotError::Transport {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        let body: Value = response.json().await?;
        self.log.debug(format_args!("response: {body}"));
        check_response(body, query, &self.log)
    }
}

/// Split a decoded body into its data, failing on any embedded error list.
fn check_response(body: Value, query: &str, log: &RunLog) -> Result<Value> {
    let payload = body.to_string();
    let gql_response: GraphQLResponse = serde_json::from_value(body)?;

    if let Some(errors) = gql_response.errors {
        log.error(format_args!("got errors for query: {query}"));
        log.error(format_args!("{payload}"));
        return Err(SnapshotError::RemoteQuery {
            messages: errors.iter().map(error_message).collect(),
            payload,
        });
    }

    gql_response.data.ok_or(SnapshotError::EmptyResponse)
}

fn error_message(error: &Value) -> String {
    error
        .get("message")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| error.to_string())
}
