use assert_cmd::prelude::*;
use mockito::{Matcher, Server, ServerGuard};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn page_info(next: Option<&str>) -> Value {
    json!({"endCursor": next, "hasNextPage": next.is_some()})
}

fn members(logins: &[String], next: Option<&str>) -> Value {
    let edges: Vec<Value> = logins
        .iter()
        .map(|login| json!({"node": {"login": login}}))
        .collect();
    json!({"pageInfo": page_info(next), "edges": edges})
}

fn no_invitations() -> Value {
    json!({"pageInfo": page_info(None), "edges": []})
}

fn logins(prefix: &str, range: std::ops::RangeInclusive<usize>) -> Vec<String> {
    range.map(|i| format!("{prefix}{i}")).collect()
}

fn team(name: &str, members: Value) -> Value {
    json!({
        "node": {
            "name": name,
            "slug": name.to_lowercase(),
            "description": null,
            "members": members,
            "invitations": no_invitations(),
        }
    })
}

fn data(body: Value) -> String {
    json!({ "data": body }).to_string()
}

/// Alpha has two members; Beta has 150 spread over two pages.
fn mock_alpha_beta(server: &mut ServerGuard) -> Vec<mockito::Mock> {
    let bulk = data(json!({
        "organization": {
            "teams": {
                "pageInfo": page_info(None),
                "edges": [
                    team("Alpha", members(&["A1".to_string(), "A2".to_string()], None)),
                    team("Beta", members(&logins("B", 1..=100), Some("beta-100"))),
                ]
            }
        }
    }));
    let beta_page = |logins: Vec<String>, next: Option<&str>| {
        data(json!({
            "organization": {
                "team": {
                    "members": members(&logins, next),
                    "invitations": no_invitations(),
                }
            }
        }))
    };

    vec![
        server
            .mock("POST", "/graphql")
            .match_body(Matcher::Regex(r"teams\(first: 100\)".into()))
            .with_status(200)
            .with_body(bulk)
            .create(),
        server
            .mock("POST", "/graphql")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"team\(slug: \\"beta\\"\)"#.into()),
                Matcher::Regex(r"members\(first: 100\) \{".into()),
            ]))
            .with_status(200)
            .with_body(beta_page(logins("B", 1..=100), Some("beta-100")))
            .expect(1)
            .create(),
        server
            .mock("POST", "/graphql")
            .match_body(Matcher::Regex(r#"members\(first: 100, after: \\"beta-100\\"\)"#.into()))
            .with_status(200)
            .with_body(beta_page(logins("B", 101..=150), None))
            .expect(1)
            .create(),
    ]
}

fn snapshot_cmd(server: &ServerGuard, temp: &Path, output: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("team-snapshot"));
    cmd.arg("--org")
        .arg("acme")
        .arg("-o")
        .arg(output)
        .env("GITHUB_PRODUCTION_TOKEN", "test-token")
        .env("GITHUB_GRAPHQL_URL", format!("{}/graphql", server.url()))
        .env("TEAM_SNAPSHOT_CONFIG", temp.join("absent.toml"))
        .env_remove("GITHUB_ORG")
        .env_remove("RUST_LOG");
    cmd
}

fn output_path(temp: &Path) -> PathBuf {
    temp.join("output").join("members-v4.json")
}

#[test]
fn writes_complete_snapshot_with_followup_pages() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::new();
    let mocks = mock_alpha_beta(&mut server);
    let temp = tempdir()?;
    let output = output_path(temp.path());

    snapshot_cmd(&server, temp.path(), &output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    for mock in &mocks[1..] {
        mock.assert();
    }

    let written = fs::read_to_string(&output)?;
    assert!(written.ends_with("}\n"));

    let snapshot: Value = serde_json::from_str(&written)?;
    assert_eq!(
        snapshot["Alpha"],
        json!({"invitations": [], "members": ["a1", "a2"]})
    );
    let beta: Vec<String> = (1..=150).map(|i| format!("b{i}")).collect();
    assert_eq!(snapshot["Beta"]["members"], json!(beta));
    assert_eq!(snapshot["Beta"]["invitations"], json!([]));
    assert!(snapshot["Beta"].get("incomplete").is_none());

    Ok(())
}

#[test]
fn repeated_runs_are_byte_identical() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let first = temp.path().join("first.json");
    let second = temp.path().join("second.json");

    for output in [&first, &second] {
        let mut server = Server::new();
        let _mocks = mock_alpha_beta(&mut server);
        snapshot_cmd(&server, temp.path(), output)
            .arg("--quiet")
            .assert()
            .success();
    }

    assert_eq!(fs::read(&first)?, fs::read(&second)?);
    Ok(())
}

#[test]
fn summary_marks_followup_teams() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::new();
    let _mocks = mock_alpha_beta(&mut server);
    let temp = tempdir()?;

    snapshot_cmd(&server, temp.path(), &output_path(temp.path()))
        .arg("--summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Beta"))
        .stdout(predicate::str::contains("followup"))
        .stdout(predicate::str::contains("150"));

    Ok(())
}

#[test]
fn embedded_errors_abort_without_output() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::new();
    let _m = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body(
            r#"{"data": null, "errors": [{"message": "Could not resolve to an Organization with the login of 'acme'."}]}"#,
        )
        .create();
    let temp = tempdir()?;
    let output = output_path(temp.path());

    snapshot_cmd(&server, temp.path(), &output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("GraphQL errors"))
        .stderr(predicate::str::contains("Could not resolve"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn error_status_aborts_without_output() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::new();
    let _m = server
        .mock("POST", "/graphql")
        .with_status(401)
        .with_body(r#"{"message": "Bad credentials"}"#)
        .create();
    let temp = tempdir()?;
    let output = output_path(temp.path());

    snapshot_cmd(&server, temp.path(), &output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("status 401"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn unknown_edge_shape_aborts_without_output() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = Server::new();
    let bad_members = json!({"pageInfo": page_info(None), "edges": [{"node": {}}]});
    let _m = server
        .mock("POST", "/graphql")
        .with_status(200)
        .with_body(data(json!({
            "organization": {
                "teams": {
                    "pageInfo": page_info(None),
                    "edges": [team("Alpha", bad_members)]
                }
            }
        })))
        .create();
    let temp = tempdir()?;
    let output = output_path(temp.path());

    snapshot_cmd(&server, temp.path(), &output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown user edge format"));

    assert!(!output.exists());
    Ok(())
}

#[test]
fn missing_token_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let server = Server::new();
    let temp = tempdir()?;

    snapshot_cmd(&server, temp.path(), &output_path(temp.path()))
        .env_remove("GITHUB_PRODUCTION_TOKEN")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API token found"));

    Ok(())
}

#[test]
fn oversize_chunk_is_rejected_before_any_request() -> Result<(), Box<dyn std::error::Error>> {
    let server = Server::new();
    let temp = tempdir()?;

    snapshot_cmd(&server, temp.path(), &output_path(temp.path()))
        .arg("--members-chunk")
        .arg("250")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid members chunk size 250"));

    Ok(())
}

#[test]
fn completions_are_generated() {
    Command::new(assert_cmd::cargo::cargo_bin!("team-snapshot"))
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("team-snapshot"));
}
