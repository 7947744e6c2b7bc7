mod cli;

use crate::cli::Cli;
use anyhow::Context;
use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use std::sync::Arc;
use weather_harvest::{
    build_authorized_client, parse_locations, ArtifactLayout, Harvester, HistoryClient,
    LocationOutcome, ObjectStore, S3ObjectStore, TokenProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose).context("Failed to initialize logging")?;

    let range = cli.date_range()?;

    // Everything up to the first location query is fatal on failure.
    let token = TokenProvider::new(&cli.token_url, &cli.client_id, &cli.client_secret)
        .fetch_token()
        .await
        .context("Could not authenticate against the token endpoint")?;
    let http = build_authorized_client(&token, cli.timeout())
        .context("Could not build the weather API client")?;

    let store = Arc::new(S3ObjectStore::from_env().await);
    let source = Arc::new(HistoryClient::new(
        http,
        &cli.api_url,
        &cli.units,
        &cli.data_source,
    ));

    let table = store
        .download(&cli.locations_bucket, &cli.locations_key)
        .await
        .with_context(|| {
            format!(
                "Could not fetch the location table s3://{}/{}",
                cli.locations_bucket, cli.locations_key
            )
        })?;
    let locations = parse_locations(&table)?;

    let harvester = Harvester::builder()
        .source(source)
        .store(store)
        .layout(ArtifactLayout::new(
            &cli.output_bucket,
            &cli.output_prefix,
            &cli.staging_dir,
        ))
        .build();

    let outcomes = harvester.run(&locations, range).await;
    report(&outcomes);

    Ok(())
}

/// Final report: enumerate every failed location with its index, trial id
/// and the full error chain. Per-location failures are not fatal; the
/// process still exits cleanly once they are reported.
fn report(outcomes: &[LocationOutcome]) {
    let failures: Vec<_> = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            LocationOutcome::Failed {
                index,
                trial_id,
                error,
            } => Some((index, trial_id, error)),
            LocationOutcome::Stored { .. } => None,
        })
        .collect();

    if failures.is_empty() {
        info!("All {} locations stored successfully", outcomes.len());
        return;
    }

    error!(
        "{} of {} locations failed:",
        failures.len(),
        outcomes.len()
    );
    for (index, trial_id, failure) in failures {
        error!(
            "  location {} (trial {}): {}",
            index,
            trial_id,
            describe(failure)
        );
    }
}

/// Renders an error with its full source chain, outermost first.
fn describe(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn init_logging(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Error)
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

#[cfg(test)]
mod tests {
    use super::describe;

    #[test]
    fn describe_walks_the_source_chain() {
        let root = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let wrapped = weather_harvest::PersistError::StagingIo("out.csv".into(), root);

        let text = describe(&wrapped);
        assert!(text.contains("out.csv"));
        assert!(text.contains("disk gone"));
    }
}
