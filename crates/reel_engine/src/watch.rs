use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use thiserror::Error;

use reel_core::{FileObservation, StagingTracker};
use reel_logging::reel_info;

use crate::clock::unix_millis;

/// Tuning for the staging-directory poll loop.
#[derive(Debug, Clone)]
pub struct WatchSettings {
    pub poll_interval: Duration,
    /// Consecutive unchanged-size polls required before a file counts as
    /// fully downloaded.
    pub stability_threshold: u32,
    /// Extra polls of grace before an unseen tracking entry is evicted.
    pub cleanup_margin: u32,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            stability_threshold: 5,
            cleanup_margin: 3,
        }
    }
}

impl WatchSettings {
    fn eviction_window(&self) -> Duration {
        self.poll_interval * (self.stability_threshold + self.cleanup_margin)
    }
}

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("no completed download appeared within {0:?}")]
    TimedOut(Duration),
    #[error("staging directory {path:?} unreadable mid-watch: {source}")]
    DirMissing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Polls the staging directory until an in-flight download settles.
///
/// Browser downloads write through a temporary name and grow incrementally;
/// a fixed number of unchanged-size polls is the completion signal. The
/// watcher remembers every name it has promoted for its lifetime, so a file
/// a failed relocation left behind is never certified twice.
pub struct DownloadWatcher {
    staging_dir: PathBuf,
    settings: WatchSettings,
    promoted: Mutex<HashSet<String>>,
}

impl DownloadWatcher {
    pub fn new(staging_dir: impl Into<PathBuf>, settings: WatchSettings) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            settings,
            promoted: Mutex::new(HashSet::new()),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Waits for the next download to finish writing and returns its path.
    pub async fn await_completed(&self, timeout: Duration) -> Result<PathBuf, WatchError> {
        let mut tracker = StagingTracker::new(
            self.settings.stability_threshold,
            self.settings.eviction_window().as_millis() as u64,
        );
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let listing = self.list_staging()?;
            if let Some(name) = tracker.observe(&listing, unix_millis()) {
                self.promoted
                    .lock()
                    .expect("promoted set lock")
                    .insert(name.clone());
                reel_info!("Download settled in staging: {}", name);
                return Ok(self.staging_dir.join(name));
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(WatchError::TimedOut(timeout));
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }

    fn list_staging(&self) -> Result<Vec<FileObservation>, WatchError> {
        let entries = fs::read_dir(&self.staging_dir).map_err(|source| WatchError::DirMissing {
            path: self.staging_dir.clone(),
            source,
        })?;

        let promoted = self.promoted.lock().expect("promoted set lock");
        let mut listing = Vec::new();
        for entry in entries {
            let Ok(entry) = entry else { continue };
            let Ok(metadata) = entry.metadata() else { continue };
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if promoted.contains(&name) {
                continue;
            }
            listing.push(FileObservation::new(name, metadata.len()));
        }
        // read_dir order is platform-dependent; keep promotion deterministic.
        listing.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listing)
    }
}
