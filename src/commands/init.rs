use std::io::{self, Write};

use serde::Serialize;

use crate::config::Config;
use crate::error::{Result, SnapshotError};

#[derive(Serialize)]
struct InitConfig<'a> {
    token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    org: Option<&'a str>,
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Team Snapshot Configuration");
    println!("===========================\n");

    let token = prompt("Enter a GitHub token with read:org scope: ")?;
    if token.is_empty() {
        return Err(SnapshotError::MissingToken);
    }

    let org = prompt("Enter default organization login [optional]: ")?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SnapshotError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let contents = toml::to_string(&InitConfig {
        token: &token,
        org: Some(org.as_str()).filter(|org| !org.is_empty()),
    })?;

    std::fs::write(&config_path, contents).map_err(|e| SnapshotError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now run 'team-snapshot'!");

    Ok(())
}
