use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use reel_engine::{
    DebugRecorder, DownloadWatcher, HarvestLayout, HarvestRunner, ItemTiming, RunOutcome,
    RunSettings, SiteProfile, WatchSettings,
};
use reel_logging::{reel_error, reel_info, LogDestination};

use super::browser::{ChromeAutomation, LaunchOptions};
use super::cli::Cli;
use super::config::load_site_profile;

pub fn run_app() -> anyhow::Result<()> {
    let cli = Cli::parse();
    reel_logging::initialize(LogDestination::Both);

    let mut profile = load_site_profile(&cli.profiles, &cli.site)?;
    if let Some(entry_url) = cli.entry_url.clone() {
        profile.entry_url = entry_url;
        profile.validate()?;
    }

    let layout = HarvestLayout::new(cli.download_base.clone(), cli.site.clone());
    layout.ensure().with_context(|| {
        format!(
            "could not create staging directory {:?}",
            layout.staging_dir()
        )
    })?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("tokio runtime")?;

    runtime.block_on(run_pipeline(&cli, &profile, &layout))
}

async fn run_pipeline(
    cli: &Cli,
    profile: &SiteProfile,
    layout: &HarvestLayout,
) -> anyhow::Result<()> {
    let browser = ChromeAutomation::launch(&LaunchOptions {
        headless: !cli.headed,
        staging_dir: layout.staging_dir(),
    })
    .await
    .context("could not launch browser session")?;

    let debug = DebugRecorder::new(cli.debug_base.clone());
    let watcher = DownloadWatcher::new(
        layout.staging_dir(),
        WatchSettings {
            poll_interval: Duration::from_secs(cli.poll_interval_secs),
            stability_threshold: cli.stability_threshold,
            ..WatchSettings::default()
        },
    );
    let timing = ItemTiming {
        verify_timeout: Duration::from_secs(cli.verify_timeout_secs),
        download_timeout: Duration::from_secs(cli.download_timeout_secs),
        ..ItemTiming::default()
    };

    let runner = HarvestRunner::new(&browser, profile, layout, &debug, &watcher, timing);
    let settings = RunSettings {
        limit: cli.limit,
        download_enabled: cli.download,
    };

    reel_info!(
        "Starting harvest of {} (limit {}, download {})",
        layout.site(),
        settings.limit,
        settings.download_enabled
    );

    let result = runner.run(&settings).await;
    browser.close().await;
    let summary = result.context("run aborted on entry navigation")?;

    match &summary.outcome {
        RunOutcome::Completed => reel_info!(
            "Harvest completed: {} handled, {} skipped, {} recovered",
            summary.handled,
            summary.skipped,
            summary.recovered
        ),
        RunOutcome::AbortedOnNavigation { at_index, reason } => {
            reel_error!("Harvest aborted after item {at_index}: {reason}");
        }
    }
    Ok(())
}
