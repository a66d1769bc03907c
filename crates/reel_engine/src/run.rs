use serde::Serialize;

use reel_core::ItemId;
use reel_logging::{reel_error, reel_info, reel_warn};

use crate::automation::{Automation, AutomationError};
use crate::clock::unix_millis;
use crate::debug::DebugRecorder;
use crate::layout::HarvestLayout;
use crate::persist::AtomicFileWriter;
use crate::processor::{ItemOutcome, ItemProcessor, ItemTiming};
use crate::profile::SiteProfile;
use crate::watch::DownloadWatcher;

/// File name of the per-run summary manifest in the site directory.
pub const SUMMARY_FILENAME: &str = "run_summary.json";

/// Parameters for one harvest run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub limit: usize,
    pub download_enabled: bool,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    /// The item limit was exhausted.
    Completed,
    /// Advancing to the next item failed; the session position cannot be
    /// recovered, so no further items were attempted.
    AbortedOnNavigation { at_index: usize, reason: String },
}

/// Operator-facing tally for one run. Written as `run_summary.json` into
/// the site directory when the loop ends.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub limit: usize,
    pub attempted: usize,
    pub handled: usize,
    pub skipped: usize,
    pub recovered: usize,
    pub outcome: RunOutcome,
    pub started_unix_ms: u64,
    pub finished_unix_ms: u64,
}

/// Entry navigation failed; nothing was harvested.
#[derive(Debug, thiserror::Error)]
#[error("initial navigation to {url} failed: {source}")]
pub struct RunError {
    pub url: String,
    #[source]
    pub source: AutomationError,
}

/// Drives a bounded sequence of items through the item processor.
///
/// Items are processed strictly in session order; "next" navigation is
/// stateful relative to the live position, so there is no reordering and no
/// parallel fan-out.
pub struct HarvestRunner<'a> {
    automation: &'a dyn Automation,
    profile: &'a SiteProfile,
    layout: &'a HarvestLayout,
    debug: &'a DebugRecorder,
    watcher: &'a DownloadWatcher,
    timing: ItemTiming,
}

impl<'a> HarvestRunner<'a> {
    pub fn new(
        automation: &'a dyn Automation,
        profile: &'a SiteProfile,
        layout: &'a HarvestLayout,
        debug: &'a DebugRecorder,
        watcher: &'a DownloadWatcher,
        timing: ItemTiming,
    ) -> Self {
        Self {
            automation,
            profile,
            layout,
            debug,
            watcher,
            timing,
        }
    }

    pub async fn run(&self, settings: &RunSettings) -> Result<RunSummary, RunError> {
        let started_unix_ms = unix_millis();

        if let Err(source) = self.enter_first_item().await {
            reel_error!("Run aborted before the first item: {source}");
            self.debug
                .capture(self.automation, None, "entry_navigation")
                .await;
            return Err(RunError {
                url: self.profile.entry_url.clone(),
                source,
            });
        }

        let processor = ItemProcessor::new(
            self.automation,
            self.profile,
            self.layout,
            self.debug,
            self.watcher,
            self.timing.clone(),
            settings.download_enabled,
        );

        let mut summary = RunSummary {
            limit: settings.limit,
            attempted: 0,
            handled: 0,
            skipped: 0,
            recovered: 0,
            outcome: RunOutcome::Completed,
            started_unix_ms,
            finished_unix_ms: 0,
        };

        for index in 0..settings.limit {
            match processor.process(index).await {
                Ok(ItemOutcome::Handled) => summary.handled += 1,
                Ok(ItemOutcome::Skipped) => summary.skipped += 1,
                Err(fault) => {
                    // Recovered at the loop boundary; the run advances
                    // exactly as on success.
                    reel_error!("Item {index} failed, recovering: {fault}");
                    let bucket = self.best_effort_id().await;
                    self.debug
                        .capture(
                            self.automation,
                            bucket.as_deref(),
                            &format!("item{index}_unhandled_error"),
                        )
                        .await;
                    summary.recovered += 1;
                }
            }
            summary.attempted += 1;

            let is_last = index + 1 == settings.limit;
            if !is_last {
                if let Err(err) = self.advance_to_next().await {
                    reel_error!("Could not advance past item {index}, terminating run: {err}");
                    self.debug
                        .capture(
                            self.automation,
                            None,
                            &format!("item{index}_next_navigation"),
                        )
                        .await;
                    summary.outcome = RunOutcome::AbortedOnNavigation {
                        at_index: index,
                        reason: err.to_string(),
                    };
                    break;
                }
            }
        }

        summary.finished_unix_ms = unix_millis();
        self.write_summary(&summary);
        reel_info!(
            "Run finished: {} attempted, {} handled, {} skipped, {} recovered",
            summary.attempted,
            summary.handled,
            summary.skipped,
            summary.recovered
        );
        Ok(summary)
    }

    async fn enter_first_item(&self) -> Result<(), AutomationError> {
        self.automation.navigate(&self.profile.entry_url).await?;
        self.automation
            .wait_visible(&self.profile.listing_ready_selector, self.timing.verify_timeout)
            .await?;
        self.automation.click(&self.profile.first_item_selector).await
    }

    async fn advance_to_next(&self) -> Result<(), AutomationError> {
        self.automation
            .wait_visible(&self.profile.next_item_selector, self.timing.trigger_timeout)
            .await?;
        self.automation.click(&self.profile.next_item_selector).await
    }

    /// Best-effort re-extraction of an id to name a failure capture.
    async fn best_effort_id(&self) -> Option<String> {
        let raw = self
            .automation
            .read_text(&self.profile.id_selector)
            .await
            .ok();
        let id = ItemId::from_raw(raw.as_deref(), unix_millis());
        id.debug_bucket().map(String::from)
    }

    fn write_summary(&self, summary: &RunSummary) {
        let json = match serde_json::to_string_pretty(summary) {
            Ok(json) => json,
            Err(err) => {
                reel_warn!("Could not serialize run summary: {err}");
                return;
            }
        };
        let writer = AtomicFileWriter::new(self.layout.site_dir());
        if let Err(err) = writer.write(SUMMARY_FILENAME, &json) {
            reel_warn!("Could not write run summary: {err}");
        }
    }
}
