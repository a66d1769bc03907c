use std::fs;
use std::path::PathBuf;

use reel_logging::reel_warn;

use crate::automation::Automation;

/// Shared bucket for captures that have no genuine item id to hang off.
pub const GENERAL_ERRORS_BUCKET: &str = "general_errors";

/// Writes diagnostic page snapshots under the debug base directory.
///
/// Captures are best-effort and append-only; a failed capture is logged and
/// never interrupts the run.
pub struct DebugRecorder {
    debug_base: PathBuf,
}

impl DebugRecorder {
    pub fn new(debug_base: impl Into<PathBuf>) -> Self {
        Self {
            debug_base: debug_base.into(),
        }
    }

    /// Snapshots the rendered page and raw source for `step`, keyed by the
    /// item bucket, or the shared general-errors bucket when `None`.
    pub async fn capture(&self, automation: &dyn Automation, bucket: Option<&str>, step: &str) {
        let dir = self.debug_base.join(bucket.unwrap_or(GENERAL_ERRORS_BUCKET));
        if let Err(err) = fs::create_dir_all(&dir) {
            reel_warn!("Debug capture for step {step:?} skipped: {err}");
            return;
        }

        match automation.capture_screenshot().await {
            Ok(bytes) => {
                if let Err(err) = fs::write(dir.join(format!("{step}.png")), &bytes) {
                    reel_warn!("Could not write screenshot for step {step:?}: {err}");
                }
            }
            Err(err) => reel_warn!("Screenshot for step {step:?} unavailable: {err}"),
        }

        match automation.capture_page_source().await {
            Ok(html) => {
                if let Err(err) = fs::write(dir.join(format!("{step}.html")), html) {
                    reel_warn!("Could not write page source for step {step:?}: {err}");
                }
            }
            Err(err) => reel_warn!("Page source for step {step:?} unavailable: {err}"),
        }
    }
}
