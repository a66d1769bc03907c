//! Harvest engine: the I/O pipeline around the automation seam.
mod automation;
mod clock;
mod debug;
mod layout;
mod ledger;
mod persist;
mod poll;
mod processor;
mod profile;
mod relocate;
mod run;
mod watch;

pub use automation::{Automation, AutomationError};
pub use debug::{DebugRecorder, GENERAL_ERRORS_BUCKET};
pub use layout::{HarvestLayout, STAGING_DIR_NAME};
pub use ledger::is_already_processed;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use poll::{poll_until, PollError};
pub use processor::{ItemFault, ItemOutcome, ItemProcessor, ItemTiming};
pub use profile::{ProfileError, SiteProfile};
pub use relocate::{relocate, RelocateError};
pub use run::{
    HarvestRunner, RunError, RunOutcome, RunSettings, RunSummary, SUMMARY_FILENAME,
};
pub use watch::{DownloadWatcher, WatchError, WatchSettings};
