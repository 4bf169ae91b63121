use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::ChunkOverrides;

pub const DEFAULT_OUTPUT: &str = "output/members-v4.json";

#[derive(Parser)]
#[command(name = "team-snapshot")]
#[command(about = "Snapshot an organization's team members and pending invitations", version)]
#[command(after_help = "EXAMPLES:
    team-snapshot                          Snapshot $GITHUB_ORG to output/members-v4.json
    team-snapshot --org acme -o acme.json  Snapshot a specific organization
    team-snapshot --summary                Also print a per-team table")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub fetch: FetchArgs,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Debug logging and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    team-snapshot completions bash > ~/.bash_completion.d/team-snapshot
    team-snapshot completions zsh > ~/.zfunc/_team-snapshot")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    team-snapshot init")]
    Init,
}

#[derive(Args, Clone, Debug)]
pub struct FetchArgs {
    /// Output file
    #[arg(long, short = 'o', default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Organization login (default: $GITHUB_ORG or config file)
    #[arg(long)]
    pub org: Option<String>,

    /// Teams requested per page (1-100)
    #[arg(long)]
    pub teams_chunk: Option<u32>,

    /// Members requested per page (1-100)
    #[arg(long)]
    pub members_chunk: Option<u32>,

    /// Invitations requested per page (1-100)
    #[arg(long)]
    pub invitations_chunk: Option<u32>,

    /// Print a per-team summary table after writing the snapshot
    #[arg(long)]
    pub summary: bool,
}

impl FetchArgs {
    pub fn chunk_overrides(&self) -> ChunkOverrides {
        ChunkOverrides {
            teams: self.teams_chunk,
            members: self.members_chunk,
            invitations: self.invitations_chunk,
        }
    }
}
