use colored::Colorize;

use crate::cli::FetchArgs;
use crate::client::GraphQLClient;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::SnapshotFetcher;
use crate::logging::RunLog;
use crate::output;
use crate::query::QueryBuilder;

/// Fetch the organization's teams and write the snapshot file.
///
/// Nothing is written unless every page of every team was fetched.
pub async fn run(config: &Config, args: &FetchArgs, quiet: bool) -> Result<()> {
    let org = config.resolve_org(args.org.as_deref())?;
    let queries = QueryBuilder::new(config.chunk_sizes(args.chunk_overrides())?);
    let log = RunLog::for_org(&org);
    let client = GraphQLClient::new(
        config.endpoint()?,
        config.token()?,
        config.timeout(),
        log.clone(),
    )?;

    let snapshot = SnapshotFetcher::new(&client, &queries, &log)
        .fetch(&org)
        .await?;

    output::write_snapshot(&args.output, &snapshot)?;

    if args.summary {
        println!("{}", output::summary_table(&snapshot));
    }
    if !quiet {
        println!(
            "{} {} teams to {}",
            "Wrote".green(),
            snapshot.teams.len(),
            args.output.display()
        );
    }

    Ok(())
}
