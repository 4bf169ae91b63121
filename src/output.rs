use std::path::Path;

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use crate::error::{Result, SnapshotError};
use crate::fetch::{Pass, Snapshot};

/// Serialize the snapshot: two-space indent, sorted keys, trailing newline.
pub fn render_snapshot(snapshot: &Snapshot) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(&snapshot.teams)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write the rendered snapshot, creating missing parent directories.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let rendered = render_snapshot(snapshot)?;
    let write_err = |source| SnapshotError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, rendered).map_err(write_err)
}

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "Team")]
    name: String,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Invitations")]
    invitations: usize,
    #[tabled(rename = "Pass")]
    pass: String,
}

fn pass_colored(pass: Pass) -> String {
    match pass {
        Pass::Bulk => "bulk".green().to_string(),
        Pass::Followup => "followup".yellow().to_string(),
    }
}

pub fn summary_table(snapshot: &Snapshot) -> String {
    let rows: Vec<TeamRow> = snapshot
        .teams
        .iter()
        .map(|(name, team)| TeamRow {
            name: name.clone(),
            members: team.members.len(),
            invitations: team.invitations.len(),
            pass: pass_colored(snapshot.pass(name)),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
