use std::time::Duration;

use reel_core::{compose_text_record, ItemId, ItemMetadata, UNKNOWN_TITLE};
use reel_logging::{reel_error, reel_info, reel_warn};

use crate::automation::{Automation, AutomationError};
use crate::clock::unix_millis;
use crate::debug::DebugRecorder;
use crate::layout::HarvestLayout;
use crate::ledger::is_already_processed;
use crate::persist::AtomicFileWriter;
use crate::profile::SiteProfile;
use crate::relocate::relocate;
use crate::watch::DownloadWatcher;

/// Bounds for the waits one item can incur.
#[derive(Debug, Clone)]
pub struct ItemTiming {
    pub verify_timeout: Duration,
    pub trigger_timeout: Duration,
    pub download_timeout: Duration,
}

impl Default for ItemTiming {
    fn default() -> Self {
        Self {
            verify_timeout: Duration::from_secs(30),
            trigger_timeout: Duration::from_secs(15),
            // Artifacts can be large; hours, not minutes.
            download_timeout: Duration::from_secs(2 * 60 * 60),
        }
    }
}

/// Terminal outcomes for one item. Both count as loop progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    Handled,
    Skipped,
}

/// The session became unusable while establishing the item; recovery
/// happens at the loop boundary, not here.
#[derive(Debug, thiserror::Error)]
#[error("item {sequence_index}: {source}")]
pub struct ItemFault {
    pub sequence_index: usize,
    #[source]
    pub source: AutomationError,
}

/// Runs the per-item state machine against the current session position:
/// verify readiness, extract metadata, consult the resume ledger, optionally
/// download and relocate the artifact, persist the text record.
pub struct ItemProcessor<'a> {
    automation: &'a dyn Automation,
    profile: &'a SiteProfile,
    layout: &'a HarvestLayout,
    debug: &'a DebugRecorder,
    watcher: &'a DownloadWatcher,
    timing: ItemTiming,
    download_enabled: bool,
}

impl<'a> ItemProcessor<'a> {
    pub fn new(
        automation: &'a dyn Automation,
        profile: &'a SiteProfile,
        layout: &'a HarvestLayout,
        debug: &'a DebugRecorder,
        watcher: &'a DownloadWatcher,
        timing: ItemTiming,
        download_enabled: bool,
    ) -> Self {
        Self {
            automation,
            profile,
            layout,
            debug,
            watcher,
            timing,
            download_enabled,
        }
    }

    pub async fn process(&self, sequence_index: usize) -> Result<ItemOutcome, ItemFault> {
        // VerifyReady: a detail view that never appears is a soft failure;
        // the loop still advances past this item.
        if let Err(err) = self
            .automation
            .wait_visible(&self.profile.detail_ready_selector, self.timing.verify_timeout)
            .await
        {
            if err.is_session_failure() {
                return Err(ItemFault {
                    sequence_index,
                    source: err,
                });
            }
            reel_warn!("Item {sequence_index}: detail view never became ready: {err}");
            self.debug
                .capture(
                    self.automation,
                    None,
                    &format!("item{sequence_index}_detail_not_ready"),
                )
                .await;
            return Ok(ItemOutcome::Handled);
        }

        let metadata = self
            .extract_metadata(sequence_index)
            .await
            .map_err(|source| ItemFault {
                sequence_index,
                source,
            })?;
        reel_info!(
            "Item {sequence_index}: id {} title {:?}",
            metadata.id,
            metadata.title
        );

        if is_already_processed(&metadata.id, &self.layout.site_dir()) {
            reel_info!(
                "Item {sequence_index}: {} already materialized on disk, skipping",
                metadata.id
            );
            return Ok(ItemOutcome::Skipped);
        }

        self.debug
            .capture(self.automation, metadata.id.debug_bucket(), "content_visible")
            .await;

        if self.download_enabled {
            self.download_artifact(&metadata).await;
        }

        self.persist_text(&metadata).await;

        Ok(ItemOutcome::Handled)
    }

    /// Reads id and title. Extraction failure is recovered with a
    /// placeholder id and a `"N/A"` title; only a dead session is fatal.
    async fn extract_metadata(
        &self,
        sequence_index: usize,
    ) -> Result<ItemMetadata, AutomationError> {
        let raw_id = match self.read_raw_id().await {
            Ok(value) => Some(value),
            Err(err) if err.is_session_failure() => return Err(err),
            Err(err) => {
                reel_warn!("Item {sequence_index}: id extraction failed: {err}");
                None
            }
        };
        let id = ItemId::from_raw(raw_id.as_deref(), unix_millis());

        let title = match self.automation.read_text(&self.profile.title_selector).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => UNKNOWN_TITLE.to_string(),
            Err(err) if err.is_session_failure() => return Err(err),
            Err(err) => {
                reel_warn!("Item {sequence_index}: title extraction failed: {err}");
                UNKNOWN_TITLE.to_string()
            }
        };

        Ok(ItemMetadata {
            id,
            title,
            sequence_index,
        })
    }

    async fn read_raw_id(&self) -> Result<String, AutomationError> {
        match &self.profile.id_attribute {
            Some(attribute) => {
                let value = self
                    .automation
                    .read_attribute(&self.profile.id_selector, attribute)
                    .await?;
                Ok(value.unwrap_or_default())
            }
            None => self.automation.read_text(&self.profile.id_selector).await,
        }
    }

    /// Triggers the download, waits for the artifact to settle in staging
    /// and relocates it. Every failure in here is non-fatal to the item.
    async fn download_artifact(&self, metadata: &ItemMetadata) {
        let index = metadata.sequence_index;

        if let Err(err) = self.trigger_download().await {
            reel_warn!("Item {index}: download trigger failed, continuing without artifact: {err}");
            return;
        }

        let completed = match self
            .watcher
            .await_completed(self.timing.download_timeout)
            .await
        {
            Ok(path) => path,
            Err(err) => {
                reel_warn!("Item {index}: no completed download detected: {err}");
                return;
            }
        };

        match &metadata.id {
            ItemId::Placeholder(_) => {
                // No valid target key; the raw file stays in staging.
                reel_warn!(
                    "Item {index}: no genuine id, leaving {:?} in staging",
                    completed
                );
            }
            ItemId::Genuine(value) => {
                match relocate(&completed, value, &self.layout.site_dir()) {
                    Ok(target) => reel_info!("Item {index}: artifact stored at {:?}", target),
                    Err(err) => reel_error!("Item {index}: relocation failed: {err}"),
                }
            }
        }
    }

    async fn trigger_download(&self) -> Result<(), AutomationError> {
        self.automation
            .wait_visible(
                &self.profile.download_trigger_selector,
                self.timing.trigger_timeout,
            )
            .await?;
        self.automation
            .click(&self.profile.download_trigger_selector)
            .await
    }

    /// Persists `"Title: {title}\n\n{body}"`. Skipped only when both title
    /// and body are unavailable; placeholder ids still get their record.
    async fn persist_text(&self, metadata: &ItemMetadata) {
        let index = metadata.sequence_index;

        let body = match self.automation.read_text(&self.profile.body_selector).await {
            Ok(text) => Some(text),
            Err(err) => {
                reel_warn!("Item {index}: body extraction failed: {err}");
                None
            }
        };

        let title = (metadata.title != UNKNOWN_TITLE).then_some(metadata.title.as_str());
        let Some(record) = compose_text_record(
            title,
            body.as_deref(),
            self.profile.section_separator.as_deref(),
        ) else {
            reel_info!("Item {index}: no text available, skipping text record");
            return;
        };

        let writer = AtomicFileWriter::new(self.layout.item_dir(metadata.id.as_str()));
        match writer.write(&format!("{}.txt", metadata.id.as_str()), &record) {
            Ok(path) => reel_info!("Item {index}: text stored at {:?}", path),
            Err(err) => reel_error!("Item {index}: text persistence failed: {err}"),
        }
    }
}
