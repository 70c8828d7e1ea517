use anyhow::Context;
use champcast::{
    cli::Cli,
    error::Error,
    report::write_report,
    signals::{SignalEvent, wait_for_signal},
};
use chrono::{Datelike, Utc};
use clap::Parser;
use config::Config;
use feed::{OpenF1Client, SeasonSource, SnapshotFile, SnapshotSource};
use flume::bounded;
use forecast::ForecastEngine;
use std::io::Write;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_log::AsTrace;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.log_level_filter().as_trace())
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();

    debug!(config = ?cli);

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        _ => Config::from_env()?,
    };
    cli.apply_overrides(&mut config);

    if cli.dump_config {
        let mut out = std::io::stdout().lock();
        out.write_all(config.to_toml()?.as_bytes())?;
        return Ok(());
    }

    // Validate before spending time on the network.
    let engine = ForecastEngine::new(&config).context("invalid configuration")?;

    let year = config.feed.year.unwrap_or_else(|| Utc::now().year());
    let source: Box<dyn SeasonSource> = match &cli.snapshot {
        Some(path) => Box::new(SnapshotSource::new(path)),
        _ => Box::new(OpenF1Client::new(&config.feed)?),
    };
    let snapshot = source
        .fetch(year)
        .await
        .with_context(|| format!("failed to fetch the {year} season"))?;
    if let Some(path) = &cli.save_snapshot {
        SnapshotFile::save(path, &snapshot).await?;
        info!(path = %path.display(), "snapshot saved");
    }

    let feed = Arc::new(snapshot.into_season());
    let cancel = CancellationToken::new();
    let mut task = tokio::task::spawn_blocking({
        let feed = Arc::clone(&feed);
        let cancel = cancel.clone();
        move || engine.run(&feed.season, &cancel)
    });

    let (events_tx, events_rx) = bounded(8);
    let mut interrupted: Option<SignalEvent> = None;

    let result = loop {
        tokio::select! {
            res = &mut task => break res.context("forecast task failed")?,
            err = wait_for_signal(&events_tx) => {
                tracing::error!(error = ?err, "Error while waiting for signal");
                err?;
            }
            res = events_rx.recv_async() => {
                let event = res?;
                warn!(?event, "cancelling forecast");
                interrupted.get_or_insert(event);
                cancel.cancel();
            }
        }
    };

    let report = match (result, interrupted) {
        (Err(forecast::Error::Cancelled { .. }), Some(event)) => {
            return Err(Error::Interrupted(event).into());
        }
        (result, _) => result?,
    };

    let mut out = std::io::stdout().lock();
    write_report(&mut out, &report, &feed)?;
    Ok(())
}
