mod cli;
mod client;
mod commands;
mod config;
mod error;
mod fetch;
mod logging;
mod output;
mod query;
mod responses;
mod types;

use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};
use config::Config;
use error::Result;
use std::error::Error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    logging::init(verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        // Show error chain if verbose flag was passed
        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = std::error::Error::source(cause);
            }
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "team-snapshot", &mut io::stdout());
        }
        Some(Commands::Init) => {
            commands::init::run().await?;
        }
        None => {
            let config = Config::load()?;
            commands::snapshot::run(&config, &cli.fetch, cli.quiet).await?;
        }
    }

    Ok(())
}
